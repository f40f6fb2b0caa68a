//! Core lifecycle types.
//!
//! This module contains the pure vocabulary of the controller:
//! - State definitions via the `State` trait and the `EditState` enum
//! - Bounded transition history
//!
//! Nothing in here performs side effects; timers, callbacks and logging
//! live in the controller that drives these types.

mod history;
mod state;

pub use history::{StateHistory, StateTransition, DEFAULT_HISTORY_CAPACITY};
pub use state::{EditState, State};
