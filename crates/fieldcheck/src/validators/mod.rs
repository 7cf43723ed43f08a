//! Built-in rule predicates
//!
//! Every [`RuleKind`] maps to one predicate through [`RuleKind::check`].
//! Predicates are pure: they read the field value and the rule's raw
//! parameter and report either success or a [`RuleFailure`].

pub mod numeric;
pub mod pattern;
pub mod presence;
pub mod set;
pub mod temporal;
pub mod types;

use crate::error::ParamError;
use crate::rule::RuleKind;
use serde_json::Value;

/// Why a single rule did not pass
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleFailure {
    /// The value does not satisfy the rule
    Invalid,
    /// The rule's own parameter could not be interpreted
    Param(ParamError),
}

impl From<ParamError> for RuleFailure {
    fn from(error: ParamError) -> Self {
        RuleFailure::Param(error)
    }
}

pub type RuleOutcome = Result<(), RuleFailure>;

/// Turn a predicate answer into an outcome
pub(crate) fn ensure(passed: bool) -> RuleOutcome {
    if passed {
        Ok(())
    } else {
        Err(RuleFailure::Invalid)
    }
}

impl RuleKind {
    /// Evaluate this rule against `value` with an optional raw parameter
    pub fn check(&self, value: &Value, param: Option<&str>) -> RuleOutcome {
        match self {
            RuleKind::Required => presence::required(value),
            RuleKind::Nullable => Ok(()),

            RuleKind::String => types::string(value),
            RuleKind::Number => types::number(value),
            RuleKind::Boolean => types::boolean(value),
            RuleKind::Array => types::array(value),
            RuleKind::Object => types::object(value),
            RuleKind::Date => temporal::date(value),
            RuleKind::Uuid => types::uuid(value),
            RuleKind::Integer => types::integer(value),
            RuleKind::Decimal => types::decimal(value, param),

            RuleKind::Min => numeric::min(value, param),
            RuleKind::Max => numeric::max(value, param),
            RuleKind::MinDigit => numeric::min_digit(value, param),
            RuleKind::MaxDigit => numeric::max_digit(value, param),

            RuleKind::Email => pattern::email(value),
            RuleKind::Password => pattern::password(value),
            RuleKind::Alpha => pattern::alpha(value),
            RuleKind::AlphaNumeric => pattern::alpha_numeric(value),
            RuleKind::Url => pattern::url(value),
            RuleKind::Regex => pattern::regex(value, param),

            RuleKind::Accepted => set::accepted(value),
            RuleKind::Declined => set::declined(value),

            RuleKind::After => temporal::after(value, param),
            RuleKind::Before => temporal::before(value, param),
            RuleKind::AfterOrEqual => temporal::after_or_equal(value, param),
            RuleKind::BeforeOrEqual => temporal::before_or_equal(value, param),
            RuleKind::DateBetween => temporal::date_between(value, param),

            RuleKind::EqualTo => set::equal_to(value, param),
            RuleKind::NotEqualTo => set::not_equal_to(value, param),
            RuleKind::In => set::in_list(value, param),
            RuleKind::NotIn => set::not_in_list(value, param),
            RuleKind::NumberBetween => numeric::number_between(value, param),
        }
    }
}

/// Scalar values rendered the way they would appear in a rule string
pub(crate) fn value_as_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Numbers, or strings that parse as finite numbers
pub(crate) fn value_as_number(value: &Value) -> Option<f64> {
    let number = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => parse_number(s),
        _ => None,
    };
    number.filter(|n| n.is_finite())
}

pub(crate) fn parse_number(text: &str) -> Option<f64> {
    text.trim().parse::<f64>().ok().filter(|n| n.is_finite())
}

/// A parameter that must be a finite number
pub(crate) fn numeric_param(param: Option<&str>) -> Result<f64, ParamError> {
    param.and_then(parse_number).ok_or(ParamError::NotANumber)
}

pub(crate) fn required_param(param: Option<&str>) -> Result<&str, ParamError> {
    param.ok_or(ParamError::Missing)
}
