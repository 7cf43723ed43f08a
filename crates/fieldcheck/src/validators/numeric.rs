//! Magnitude, digit count, and numeric range rules

use super::{ensure, numeric_param, parse_number, value_as_number, RuleOutcome};
use crate::error::ParamError;
use serde_json::Value;

/// Numbers compare by value, strings by character count, arrays by length
fn magnitude(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => Some(s.chars().count() as f64),
        Value::Array(items) => Some(items.len() as f64),
        _ => None,
    }
}

/// Fails when the value or length is below the bound. Equal passes.
pub fn min(value: &Value, param: Option<&str>) -> RuleOutcome {
    let bound = numeric_param(param)?;
    ensure(magnitude(value).map_or(true, |m| m >= bound))
}

/// Fails when the value or length is above the bound. Equal passes.
pub fn max(value: &Value, param: Option<&str>) -> RuleOutcome {
    let bound = numeric_param(param)?;
    ensure(magnitude(value).map_or(true, |m| m <= bound))
}

/// Digits in the decimal rendering, ignoring sign and decimal point
fn digit_count(value: &Value) -> Option<usize> {
    let literal = match value {
        Value::Number(n) => n.to_string(),
        Value::String(s) if parse_number(s).is_some() => s.trim().to_string(),
        _ => return None,
    };
    Some(literal.chars().filter(char::is_ascii_digit).count())
}

/// The threshold is the character length of the parameter text, counting
/// every character and not only digits. `minDigit:100` demands at least
/// three digits and `minDigit:1.5` demands three as well. The parameter
/// must still parse as a number.
fn digit_threshold(param: Option<&str>) -> Result<usize, ParamError> {
    numeric_param(param)?;
    Ok(param.map_or(0, |p| p.chars().count()))
}

pub fn min_digit(value: &Value, param: Option<&str>) -> RuleOutcome {
    let threshold = digit_threshold(param)?;
    ensure(digit_count(value).is_some_and(|count| count >= threshold))
}

pub fn max_digit(value: &Value, param: Option<&str>) -> RuleOutcome {
    let threshold = digit_threshold(param)?;
    ensure(digit_count(value).is_some_and(|count| count <= threshold))
}

/// Parse `[min,max]` or `min,max`
fn range_param(param: Option<&str>) -> Result<(f64, f64), ParamError> {
    let raw = param.ok_or(ParamError::NotANumber)?.trim();
    let inner = raw
        .strip_prefix('[')
        .and_then(|r| r.strip_suffix(']'))
        .unwrap_or(raw);

    let mut bounds = inner.split(',').map(parse_number);
    match (bounds.next(), bounds.next(), bounds.next()) {
        (Some(Some(low)), Some(Some(high)), None) => Ok((low, high)),
        _ => Err(ParamError::NotANumber),
    }
}

/// Inclusive numeric range
pub fn number_between(value: &Value, param: Option<&str>) -> RuleOutcome {
    let (low, high) = range_param(param)?;
    ensure(value_as_number(value).is_some_and(|n| n >= low && n <= high))
}
