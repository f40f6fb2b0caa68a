//! Editstate: lifecycle controller for inline editable values
//!
//! An editable value is shown read-only until activated, then edited as a
//! draft, validated, committed through a host callback, and followed by a
//! short `saved` or `error` display. Editstate is the state machine behind
//! that widget; painting each state and persisting the value stay with the
//! host.
//!
//! # Core Concepts
//!
//! - **Controller**: owns confirmed value, draft and validity; handles one
//!   event at a time
//! - **Commit modes**: optimistic (assume success) or pessimistic (wait for
//!   an acknowledgment or the save timeout)
//! - **Timer**: exactly one timer armed at a time, reported back as events
//! - **Validator**: accumulating rules run on every draft change and before
//!   every commit
//!
//! # Example
//!
//! ```rust
//! use editstate::builder::ControllerBuilder;
//! use editstate::config::CommitMode;
//! use editstate::controller::Event;
//! use editstate::core::EditState;
//! use std::time::Duration;
//!
//! let mut editor = ControllerBuilder::new()
//!     .value("Alice".to_string())
//!     .mode(CommitMode::Pessimistic)
//!     .save_timeout(Duration::from_secs(3))
//!     .validate_with(|v: &String| !v.is_empty())
//!     .build()
//!     .unwrap();
//!
//! editor.handle(Event::Activate);
//! editor.handle(Event::Change("Bob".to_string()));
//! editor.handle(Event::Confirm);
//! assert_eq!(editor.state(), EditState::Pending);
//!
//! // No acknowledgment arrives in time.
//! editor.advance(Duration::from_secs(3));
//! assert_eq!(editor.state(), EditState::Error);
//! assert_eq!(editor.context().confirmed, "Alice");
//! ```

pub mod builder;
pub mod checkpoint;
pub mod commit;
pub mod config;
pub mod controller;
pub mod core;
pub mod input;
pub mod runtime;
pub mod timer;
pub mod validation;

// Re-export commonly used types
pub use builder::{BuildError, ControllerBuilder};
pub use config::{CommitMode, ConfigUpdate, EditConfig};
pub use controller::{Controller, Event, Snapshot, Step};
pub use crate::core::{EditState, State};
pub use validation::{Validator, Violation};
