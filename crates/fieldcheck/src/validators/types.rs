//! Type and shape rules

use super::{ensure, numeric_param, parse_number, RuleOutcome};
use crate::error::ParamError;
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;
use uuid::{Uuid, Variant};

static DECIMAL_LITERAL_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^-?\d+(?:\.(\d+))?$").unwrap());

pub fn string(value: &Value) -> RuleOutcome {
    ensure(value.is_string())
}

pub fn number(value: &Value) -> RuleOutcome {
    ensure(value.is_number())
}

pub fn boolean(value: &Value) -> RuleOutcome {
    ensure(value.is_boolean())
}

pub fn array(value: &Value) -> RuleOutcome {
    ensure(value.is_array())
}

pub fn object(value: &Value) -> RuleOutcome {
    ensure(value.is_object())
}

/// Hyphenated version 4 UUIDs with the RFC 4122 variant, any letter case
pub fn uuid(value: &Value) -> RuleOutcome {
    let valid = value
        .as_str()
        .filter(|s| s.len() == 36)
        .and_then(|s| Uuid::try_parse(s).ok())
        .is_some_and(|id| id.get_version_num() == 4 && id.get_variant() == Variant::RFC4122);
    ensure(valid)
}

/// Positive whole numbers
pub fn integer(value: &Value) -> RuleOutcome {
    let valid = value
        .as_f64()
        .is_some_and(|n| n.is_finite() && n > 0.0 && n.fract() == 0.0);
    ensure(valid)
}

/// Exactly `places` fractional digits in the value as written.
///
/// Numbers are read through their shortest decimal rendering, so `123.40`
/// counts as one fractional digit.
pub fn decimal(value: &Value, param: Option<&str>) -> RuleOutcome {
    let places = numeric_param(param)?;
    if places < 0.0 || places.fract() != 0.0 {
        return Err(ParamError::NotANumber.into());
    }

    let literal = match value {
        Value::Number(n) => n.to_string(),
        Value::String(s) if parse_number(s).is_some() => s.trim().to_string(),
        _ => return ensure(false),
    };

    let fraction_digits = DECIMAL_LITERAL_REGEX
        .captures(&literal)
        .map(|captures| captures.get(1).map_or(0, |m| m.as_str().len()));

    ensure(fraction_digits == Some(places as usize))
}
