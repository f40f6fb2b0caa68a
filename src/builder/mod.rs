//! Builder API for controller construction.
//!
//! # Example
//!
//! ```
//! use editstate::builder::ControllerBuilder;
//! use editstate::config::CommitMode;
//! use editstate::controller::Event;
//! use editstate::core::EditState;
//!
//! let mut controller = ControllerBuilder::new()
//!     .value("Alice".to_string())
//!     .mode(CommitMode::Optimistic)
//!     .validate_with(|v: &String| !v.is_empty())
//!     .on_commit(|v: &String| println!("saving {v}"))
//!     .build()
//!     .unwrap();
//!
//! controller.handle(Event::Activate);
//! controller.handle(Event::Change("Bob".to_string()));
//! controller.handle(Event::Confirm);
//!
//! assert_eq!(controller.state(), EditState::Saved);
//! assert_eq!(controller.context().confirmed, "Bob");
//! ```

pub mod controller;
pub mod error;

pub use controller::ControllerBuilder;
pub use error::BuildError;
