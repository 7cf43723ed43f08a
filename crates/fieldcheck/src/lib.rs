//! # fieldcheck
//!
//! Declarative per-field validation. Each field carries a value, a key, and
//! a rule string such as `"required|email|min:8"`; a [`Validator`] runs a
//! batch of fields and reports which ones failed and why.
//!
//! ```
//! use fieldcheck::{FieldSpec, RuleKind, Validator};
//!
//! let fields = vec![
//!     FieldSpec::new("email", "test@email.com", "required|email|min:8"),
//!     FieldSpec::new("debt", 123.456, ["required", "decimal:2"]),
//! ];
//!
//! let batch = Validator::default().validate(&fields).unwrap();
//! assert!(batch.failed);
//! assert_eq!(
//!     batch.results["debt"].message_for(RuleKind::Decimal),
//!     Some("debt must have 2 decimal places")
//! );
//! ```

pub mod config;
pub mod error;
pub mod messages;
pub mod rule;
pub mod rules;
pub mod validator;
pub mod validators;

pub use config::{ConfigError, MalformedRulePolicy, ValidatorConfig, ValidatorSetup};
pub use error::{ParamError, ValidationError, ValidationResult};
pub use messages::Messages;
pub use rule::{ParsedRule, RuleKind, RuleSpec, RuleTokenError};
pub use rules::{FieldResult, FieldSpec, Rules};
pub use validator::{BatchResult, Validator};
pub use validators::{RuleFailure, RuleOutcome};
