//! Presence rules

use super::{ensure, RuleOutcome};
use serde_json::Value;

/// Whether a value counts as absent.
///
/// Null, the empty string, and the empty array are empty. Numbers and
/// booleans never are, including `0` and `false`.
pub fn is_empty(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.is_empty(),
        Value::Array(items) => items.is_empty(),
        _ => false,
    }
}

pub fn required(value: &Value) -> RuleOutcome {
    ensure(!is_empty(value))
}
