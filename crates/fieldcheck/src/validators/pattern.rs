//! Pattern-based validators using regular expressions

use super::{ensure, required_param, value_as_text, RuleOutcome};
use crate::error::ParamError;
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;
use url::Url;

static EMAIL_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").unwrap());

static ALPHA_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[a-zA-Z]+$").unwrap());

static ALPHA_NUMERIC_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[a-zA-Z0-9]+$").unwrap());

const PASSWORD_MIN_LENGTH: usize = 8;
const PASSWORD_SYMBOLS: &str = "@$!%*?&#^()-_=+[]{};:,.<>/~";

fn matches(pattern: &Regex, value: &Value) -> RuleOutcome {
    ensure(value.as_str().is_some_and(|s| pattern.is_match(s)))
}

pub fn email(value: &Value) -> RuleOutcome {
    matches(&EMAIL_REGEX, value)
}

pub fn alpha(value: &Value) -> RuleOutcome {
    matches(&ALPHA_REGEX, value)
}

pub fn alpha_numeric(value: &Value) -> RuleOutcome {
    matches(&ALPHA_NUMERIC_REGEX, value)
}

/// At least eight characters with a lowercase letter, an uppercase letter,
/// a digit, and one of [`PASSWORD_SYMBOLS`]
pub fn password(value: &Value) -> RuleOutcome {
    let Some(text) = value.as_str() else {
        return ensure(false);
    };

    let long_enough = text.chars().count() >= PASSWORD_MIN_LENGTH;
    let has_lower = text.chars().any(|c| c.is_ascii_lowercase());
    let has_upper = text.chars().any(|c| c.is_ascii_uppercase());
    let has_digit = text.chars().any(|c| c.is_ascii_digit());
    let has_symbol = text.chars().any(|c| PASSWORD_SYMBOLS.contains(c));

    ensure(long_enough && has_lower && has_upper && has_digit && has_symbol)
}

/// Absolute http(s) URLs with a host
pub fn url(value: &Value) -> RuleOutcome {
    let valid = value
        .as_str()
        .and_then(|s| Url::parse(s).ok())
        .is_some_and(|u| matches!(u.scheme(), "http" | "https") && u.host_str().is_some());
    ensure(valid)
}

/// Search the value for the pattern given as the rule parameter.
///
/// The pattern is not anchored; write `^...$` for a full match.
pub fn regex(value: &Value, param: Option<&str>) -> RuleOutcome {
    let source = required_param(param)?;
    let pattern = Regex::new(source).map_err(|_| ParamError::InvalidPattern)?;
    ensure(value_as_text(value).is_some_and(|text| pattern.is_match(&text)))
}
