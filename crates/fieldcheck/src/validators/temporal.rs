//! Date parsing and temporal comparison rules

use super::{ensure, RuleOutcome};
use crate::error::ParamError;
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde_json::Value;

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%m-%d-%Y", "%m/%d/%Y"];

/// Parse a date or date-time string.
///
/// Offsets in RFC 3339 input are normalized to UTC. Bare dates are
/// midnight.
pub fn parse_datetime(text: &str) -> Option<NaiveDateTime> {
    let text = text.trim();

    if let Ok(parsed) = DateTime::parse_from_rfc3339(text) {
        return Some(parsed.naive_utc());
    }

    DATETIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(text, format).ok())
        .or_else(|| {
            DATE_FORMATS
                .iter()
                .find_map(|format| NaiveDate::parse_from_str(text, format).ok())
                .and_then(|date| date.and_hms_opt(0, 0, 0))
        })
}

/// Strings are parsed, numbers are epoch milliseconds
fn value_as_datetime(value: &Value) -> Option<NaiveDateTime> {
    match value {
        Value::String(s) => parse_datetime(s),
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.is_finite()).map(|f| f as i64))
            .and_then(DateTime::<Utc>::from_timestamp_millis)
            .map(|dt| dt.naive_utc()),
        _ => None,
    }
}

/// Rule parameters additionally accept `now` and `today`
fn parse_bound(text: &str) -> Result<NaiveDateTime, ParamError> {
    match text.trim() {
        "now" => Ok(Utc::now().naive_utc()),
        "today" => Utc::now()
            .date_naive()
            .and_hms_opt(0, 0, 0)
            .ok_or(ParamError::InvalidDate),
        other => parse_datetime(other).ok_or(ParamError::InvalidDate),
    }
}

fn compare(
    value: &Value,
    param: Option<&str>,
    accept: impl Fn(NaiveDateTime, NaiveDateTime) -> bool,
) -> RuleOutcome {
    let bound = parse_bound(param.ok_or(ParamError::Missing)?)?;
    ensure(value_as_datetime(value).is_some_and(|dt| accept(dt, bound)))
}

pub fn date(value: &Value) -> RuleOutcome {
    ensure(value_as_datetime(value).is_some())
}

pub fn after(value: &Value, param: Option<&str>) -> RuleOutcome {
    compare(value, param, |dt, bound| dt > bound)
}

pub fn before(value: &Value, param: Option<&str>) -> RuleOutcome {
    compare(value, param, |dt, bound| dt < bound)
}

pub fn after_or_equal(value: &Value, param: Option<&str>) -> RuleOutcome {
    compare(value, param, |dt, bound| dt >= bound)
}

pub fn before_or_equal(value: &Value, param: Option<&str>) -> RuleOutcome {
    compare(value, param, |dt, bound| dt <= bound)
}

/// Inclusive range given as `from,to`
pub fn date_between(value: &Value, param: Option<&str>) -> RuleOutcome {
    let (from, to) = param
        .ok_or(ParamError::Missing)?
        .split_once(',')
        .ok_or(ParamError::InvalidRange)?;
    let from = parse_bound(from)?;
    let to = parse_bound(to)?;

    ensure(value_as_datetime(value).is_some_and(|dt| dt >= from && dt <= to))
}
