//! Draft validation.
//!
//! Every rule runs on every check; failures accumulate through Stillwater's
//! `Validation` type so the rendering layer can show all problems at once.
//!
//! # Example
//!
//! ```rust
//! use editstate::validation::{Validator, Violation};
//!
//! let validator = Validator::new()
//!     .require_non_empty()
//!     .require(|v: &String| v.len() <= 16, "At most 16 characters");
//!
//! assert!(validator.is_valid(&"Alice".to_string()));
//! assert_eq!(validator.violations(&String::new()), vec![Violation::Empty]);
//! ```

pub mod rules;
pub mod violations;

pub use rules::{Rule, Validator, Verdict};
pub use violations::Violation;
