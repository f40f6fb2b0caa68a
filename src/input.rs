//! Input-type descriptors used by the rendering layer.
//!
//! The controller is input-type agnostic. Behaviour that depends on the
//! kind of input, such as a select committing as soon as an option is
//! picked, is expressed here as events the rendering layer sends.

use crate::controller::Event;
use serde::{Deserialize, Serialize};

/// Kind of draft input the rendering layer shows.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InputKind {
    #[default]
    Text,
    TextArea,
    Select,
    Checkbox,
}

impl InputKind {
    /// True if picking a value is also a confirmation.
    pub fn auto_confirms(&self) -> bool {
        matches!(self, Self::Select | Self::Checkbox)
    }

    /// Events to send for a draft change from this kind of input.
    pub fn change_events<V>(&self, value: V) -> Vec<Event<V>> {
        if self.auto_confirms() {
            vec![Event::Change(value), Event::Confirm]
        } else {
            vec![Event::Change(value)]
        }
    }
}
