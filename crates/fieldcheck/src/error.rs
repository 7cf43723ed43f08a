//! Validation error types and handling

use thiserror::Error;

pub type ValidationResult<T> = Result<T, ValidationError>;

/// Errors that abort validation instead of being reported as field data.
///
/// Ordinary rule failures never show up here: they are recorded in the
/// field's [`FieldResult`](crate::FieldResult) messages.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A field declares both `required` and `nullable`
    #[error("field `{key}` declares both `required` and `nullable`")]
    Configuration { key: String },

    /// A rule token is neither a known rule name nor `name:param`
    #[error("field `{key}` has malformed rule token `{token}`")]
    MalformedRule { key: String, token: String },
}

impl ValidationError {
    /// Create a configuration error for the given field
    pub fn configuration(key: impl Into<String>) -> Self {
        Self::Configuration { key: key.into() }
    }

    /// Create a malformed rule error
    pub fn malformed(key: impl Into<String>, token: impl Into<String>) -> Self {
        Self::MalformedRule {
            key: key.into(),
            token: token.into(),
        }
    }

    /// Name of the field the error belongs to
    pub fn key(&self) -> &str {
        match self {
            Self::Configuration { key } | Self::MalformedRule { key, .. } => key,
        }
    }
}

/// A rule parameter that the rule cannot interpret.
///
/// The display text is appended to the field key to form the message, so
/// `NotANumber` on field `age` reads "age is not a number".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ParamError {
    #[error("is not a number")]
    NotANumber,

    #[error("has an invalid date parameter")]
    InvalidDate,

    #[error("has an invalid range parameter")]
    InvalidRange,

    #[error("has an invalid list parameter")]
    InvalidList,

    #[error("has an invalid pattern parameter")]
    InvalidPattern,

    #[error("is missing a rule parameter")]
    Missing,
}

impl ParamError {
    /// Render the message recorded for a field with this parameter problem
    pub fn message_for(&self, key: &str) -> String {
        format!("{} {}", key, self)
    }
}
