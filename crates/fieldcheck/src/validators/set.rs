//! Boolean-ish, equality, and membership rules

use super::{ensure, required_param, value_as_number, value_as_text, RuleOutcome};
use crate::error::ParamError;
use serde_json::Value;

const ACCEPTED_WORDS: [&str; 3] = ["yes", "on", "true"];
const DECLINED_WORDS: [&str; 3] = ["no", "off", "false"];

fn truthy_match(value: &Value, words: &[&str], flag: bool) -> bool {
    match value {
        Value::String(s) => words.contains(&s.as_str()),
        Value::Bool(b) => *b == flag,
        Value::Number(n) => n.as_f64() == Some(if flag { 1.0 } else { 0.0 }),
        _ => false,
    }
}

/// `"yes"`, `"on"`, `"true"`, `true` or `1`
pub fn accepted(value: &Value) -> RuleOutcome {
    ensure(truthy_match(value, &ACCEPTED_WORDS, true))
}

/// `"no"`, `"off"`, `"false"`, `false` or `0`
pub fn declined(value: &Value) -> RuleOutcome {
    ensure(truthy_match(value, &DECLINED_WORDS, false))
}

/// Scalar equality where `1`, `1.0` and `"1"` are all the same value
fn loosely_equal(value: &Value, other: &Value) -> bool {
    if value == other {
        return true;
    }
    if let (Some(a), Some(b)) = (value_as_number(value), value_as_number(other)) {
        return a == b;
    }
    match (value_as_text(value), value_as_text(other)) {
        (Some(a), Some(b)) => a == b,
        _ => false,
    }
}

pub fn equal_to(value: &Value, param: Option<&str>) -> RuleOutcome {
    let expected = Value::String(required_param(param)?.to_string());
    ensure(loosely_equal(value, &expected))
}

pub fn not_equal_to(value: &Value, param: Option<&str>) -> RuleOutcome {
    let expected = Value::String(required_param(param)?.to_string());
    ensure(!loosely_equal(value, &expected))
}

/// Membership parameter of `in` and `notIn`
enum Membership<'a> {
    /// `["a","b"]` or `a,b`: the value must equal one item
    Items(Vec<Value>),
    /// Anything else: the value's text must occur inside the parameter
    Literal(&'a str),
}

impl Membership<'_> {
    fn contains(&self, value: &Value) -> bool {
        match self {
            Membership::Items(items) => items.iter().any(|item| loosely_equal(value, item)),
            Membership::Literal(raw) => {
                value_as_text(value).is_some_and(|text| raw.contains(text.as_str()))
            }
        }
    }
}

fn membership_param(param: Option<&str>) -> Result<Membership<'_>, ParamError> {
    let raw = required_param(param)?.trim();
    if raw.starts_with('[') {
        let items =
            serde_json::from_str::<Vec<Value>>(raw).map_err(|_| ParamError::InvalidList)?;
        return Ok(Membership::Items(items));
    }
    if raw.contains(',') {
        return Ok(Membership::Items(
            raw.split(',')
                .map(|item| Value::String(item.trim().to_string()))
                .collect(),
        ));
    }
    Ok(Membership::Literal(raw))
}

pub fn in_list(value: &Value, param: Option<&str>) -> RuleOutcome {
    ensure(membership_param(param)?.contains(value))
}

pub fn not_in_list(value: &Value, param: Option<&str>) -> RuleOutcome {
    ensure(!membership_param(param)?.contains(value))
}
