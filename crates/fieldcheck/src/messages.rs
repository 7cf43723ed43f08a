//! Message templates and placeholder substitution
//!
//! Templates may contain `:attr`, replaced with the field key, and a
//! placeholder named after the rule itself (`:min`, `:decimal`, ...),
//! replaced with the rule's raw parameter.

use crate::rule::RuleKind;
use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

static PLACEHOLDER_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r":(\w+)").unwrap());

/// Built-in template for a rule, if it has one
pub fn default_template(kind: RuleKind) -> Option<&'static str> {
    let template = match kind {
        RuleKind::Required => ":attr is required",
        RuleKind::Nullable => return None,
        RuleKind::String => ":attr must be a string",
        RuleKind::Number => ":attr must be a number",
        RuleKind::Boolean => ":attr must be a boolean",
        RuleKind::Array => ":attr must be an array",
        RuleKind::Object => ":attr must be an object",
        RuleKind::Date => ":attr is not a valid date",
        RuleKind::Uuid => ":attr must be a valid UUID",
        RuleKind::Integer => ":attr must be a positive integer",
        RuleKind::Decimal => ":attr must have :decimal decimal places",
        RuleKind::Min => ":attr must not be smaller than :min",
        RuleKind::Max => ":attr must not be larger than :max",
        RuleKind::MinDigit => ":attr must have at least as many digits as :minDigit",
        RuleKind::MaxDigit => ":attr must have no more digits than :maxDigit",
        RuleKind::Email => ":attr is not a valid email",
        RuleKind::Password => ":attr is not a strong enough password",
        RuleKind::Alpha => ":attr may only contain letters",
        RuleKind::AlphaNumeric => ":attr may only contain letters and numbers",
        RuleKind::Url => ":attr is not a valid URL",
        RuleKind::Regex => ":attr does not match the pattern :regex",
        RuleKind::Accepted => ":attr must be accepted",
        RuleKind::Declined => ":attr must be declined",
        RuleKind::After => ":attr must be a date after :after",
        RuleKind::Before => ":attr must be a date before :before",
        RuleKind::AfterOrEqual => ":attr must be a date after or equal to :afterOrEqual",
        RuleKind::BeforeOrEqual => ":attr must be a date before or equal to :beforeOrEqual",
        RuleKind::DateBetween => ":attr must be a date between :dateBetween",
        RuleKind::EqualTo => ":attr must be equal to :equalTo",
        RuleKind::NotEqualTo => ":attr must not be equal to :notEqualTo",
        RuleKind::In => ":attr must be one of :in",
        RuleKind::NotIn => ":attr must not be one of :notIn",
        RuleKind::NumberBetween => ":attr must be between :numberBetween",
    };
    Some(template)
}

/// Substitute placeholders in a single pass.
///
/// Replacement text is never rescanned, so a key or parameter that itself
/// contains `:attr` comes through verbatim.
pub fn render(template: &str, kind: RuleKind, key: &str, param: Option<&str>) -> String {
    PLACEHOLDER_REGEX
        .replace_all(template, |caps: &Captures| match &caps[1] {
            "attr" => key.to_string(),
            name if name == kind.as_str() => {
                param.map_or_else(|| caps[0].to_string(), str::to_string)
            }
            _ => caps[0].to_string(),
        })
        .into_owned()
}

/// Message for a failed rule: caller override, then built-in template,
/// then `"<key> is invalid"`
pub fn resolve(kind: RuleKind, key: &str, param: Option<&str>, custom: Option<&str>) -> String {
    match custom.or_else(|| default_template(kind)) {
        Some(template) => render(template, kind, key, param),
        None => format!("{} is invalid", key),
    }
}

/// Message templates keyed by rule
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Messages {
    templates: BTreeMap<RuleKind, String>,
}

impl Messages {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert
    pub fn with(mut self, kind: RuleKind, template: impl Into<String>) -> Self {
        self.insert(kind, template);
        self
    }

    pub fn insert(&mut self, kind: RuleKind, template: impl Into<String>) {
        self.templates.insert(kind, template.into());
    }

    pub fn get(&self, kind: RuleKind) -> Option<&str> {
        self.templates.get(&kind).map(String::as_str)
    }
}

impl<S: Into<String>> FromIterator<(RuleKind, S)> for Messages {
    fn from_iter<I: IntoIterator<Item = (RuleKind, S)>>(iter: I) -> Self {
        Self {
            templates: iter.into_iter().map(|(k, v)| (k, v.into())).collect(),
        }
    }
}
