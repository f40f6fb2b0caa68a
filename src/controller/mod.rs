//! The lifecycle controller.
//!
//! Holds the confirmed value, the draft and its validity, and moves between
//! the six [`EditState`](crate::core::EditState)s in response to events:
//!
//! ```text
//! view ──activate──► edit ──confirm (valid, optimistic)──► saved ──timer──► view
//!                     │  └──confirm (valid, pessimistic)─► pending ──ack──► saved
//!                     │                                      └──timeout──► error
//!                     ├──confirm (invalid)──► error ──timer──► edit
//!                     └──cancel──► view
//! ```
//!
//! `disabled` can be entered from any state through configuration and
//! resumes the state it interrupted.
//!
//! With `allow_edit_while_pending`, `activate` in `pending` opens `edit`
//! over the outstanding commit. Its save timeout keeps running there, and
//! `cancel` drops back to `pending` instead of `view`.

mod context;
mod event;
mod machine;

pub use context::{Context, Snapshot};
pub use event::{Event, Step};
pub use machine::Controller;

use std::fmt::Debug;

/// Bound for values the controller can edit.
pub trait Value: Clone + PartialEq + Debug + Send + Sync + 'static {}

impl<T> Value for T where T: Clone + PartialEq + Debug + Send + Sync + 'static {}
