//! Rule names and the rule grammar
//!
//! A rule specification is either one `|`-joined string such as
//! `"required|email|min:8"` or an ordered list of tokens such as
//! `["required", "decimal:2"]`. Each token is a bare rule name or
//! `name:param`, where the parameter is everything after the first colon.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

static PARAM_TOKEN_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(\w+):(.+)$").unwrap());

/// Every rule the engine knows how to evaluate
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RuleKind {
    // Presence
    Required,
    Nullable,

    // Type and shape
    String,
    Number,
    Boolean,
    Array,
    Object,
    Date,
    Uuid,
    Integer,
    Decimal,

    // Magnitude and digit count
    Min,
    Max,
    MinDigit,
    MaxDigit,

    // Pattern and format
    Email,
    Password,
    Alpha,
    AlphaNumeric,
    Url,
    Regex,

    // Boolean-ish
    Accepted,
    Declined,

    // Temporal
    After,
    Before,
    AfterOrEqual,
    BeforeOrEqual,
    DateBetween,

    // Set and relational
    EqualTo,
    NotEqualTo,
    In,
    NotIn,
    NumberBetween,
}

impl RuleKind {
    pub const ALL: [RuleKind; 33] = [
        RuleKind::Required,
        RuleKind::Nullable,
        RuleKind::String,
        RuleKind::Number,
        RuleKind::Boolean,
        RuleKind::Array,
        RuleKind::Object,
        RuleKind::Date,
        RuleKind::Uuid,
        RuleKind::Integer,
        RuleKind::Decimal,
        RuleKind::Min,
        RuleKind::Max,
        RuleKind::MinDigit,
        RuleKind::MaxDigit,
        RuleKind::Email,
        RuleKind::Password,
        RuleKind::Alpha,
        RuleKind::AlphaNumeric,
        RuleKind::Url,
        RuleKind::Regex,
        RuleKind::Accepted,
        RuleKind::Declined,
        RuleKind::After,
        RuleKind::Before,
        RuleKind::AfterOrEqual,
        RuleKind::BeforeOrEqual,
        RuleKind::DateBetween,
        RuleKind::EqualTo,
        RuleKind::NotEqualTo,
        RuleKind::In,
        RuleKind::NotIn,
        RuleKind::NumberBetween,
    ];

    /// The name used in rule strings and message maps
    pub fn as_str(&self) -> &'static str {
        match self {
            RuleKind::Required => "required",
            RuleKind::Nullable => "nullable",
            RuleKind::String => "string",
            RuleKind::Number => "number",
            RuleKind::Boolean => "boolean",
            RuleKind::Array => "array",
            RuleKind::Object => "object",
            RuleKind::Date => "date",
            RuleKind::Uuid => "uuid",
            RuleKind::Integer => "integer",
            RuleKind::Decimal => "decimal",
            RuleKind::Min => "min",
            RuleKind::Max => "max",
            RuleKind::MinDigit => "minDigit",
            RuleKind::MaxDigit => "maxDigit",
            RuleKind::Email => "email",
            RuleKind::Password => "password",
            RuleKind::Alpha => "alpha",
            RuleKind::AlphaNumeric => "alphaNumeric",
            RuleKind::Url => "url",
            RuleKind::Regex => "regex",
            RuleKind::Accepted => "accepted",
            RuleKind::Declined => "declined",
            RuleKind::After => "after",
            RuleKind::Before => "before",
            RuleKind::AfterOrEqual => "afterOrEqual",
            RuleKind::BeforeOrEqual => "beforeOrEqual",
            RuleKind::DateBetween => "dateBetween",
            RuleKind::EqualTo => "equalTo",
            RuleKind::NotEqualTo => "notEqualTo",
            RuleKind::In => "in",
            RuleKind::NotIn => "notIn",
            RuleKind::NumberBetween => "numberBetween",
        }
    }

    /// Whether the rule reads a `:param` suffix
    pub fn takes_param(&self) -> bool {
        matches!(
            self,
            RuleKind::Decimal
                | RuleKind::Min
                | RuleKind::Max
                | RuleKind::MinDigit
                | RuleKind::MaxDigit
                | RuleKind::Regex
                | RuleKind::After
                | RuleKind::Before
                | RuleKind::AfterOrEqual
                | RuleKind::BeforeOrEqual
                | RuleKind::DateBetween
                | RuleKind::EqualTo
                | RuleKind::NotEqualTo
                | RuleKind::In
                | RuleKind::NotIn
                | RuleKind::NumberBetween
        )
    }
}

impl fmt::Display for RuleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A token that is neither a known rule name nor `name:param`
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unrecognized rule token `{token}`")]
pub struct RuleTokenError {
    pub token: String,
}

impl FromStr for RuleKind {
    type Err = RuleTokenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        RuleKind::ALL
            .iter()
            .copied()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| RuleTokenError {
                token: s.to_string(),
            })
    }
}

/// One rule token after parsing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedRule {
    pub kind: RuleKind,
    /// Raw parameter text, interpreted by the rule itself
    pub param: Option<String>,
}

impl ParsedRule {
    pub fn new(kind: RuleKind, param: Option<String>) -> Self {
        Self { kind, param }
    }

    /// Parse a single token.
    ///
    /// A bare rule name is tried first, then `name:param`. The parameter
    /// match is greedy, so `after:2024-01-01T10:00:00Z` keeps its colons.
    pub fn parse(token: &str) -> Result<Self, RuleTokenError> {
        if let Ok(kind) = token.parse::<RuleKind>() {
            return Ok(Self::new(kind, None));
        }

        let captures = PARAM_TOKEN_REGEX
            .captures(token)
            .ok_or_else(|| RuleTokenError {
                token: token.to_string(),
            })?;

        let kind = captures[1].parse::<RuleKind>().map_err(|_| RuleTokenError {
            token: token.to_string(),
        })?;

        Ok(Self::new(kind, Some(captures[2].to_string())))
    }

    pub fn param(&self) -> Option<&str> {
        self.param.as_deref()
    }
}

impl fmt::Display for ParsedRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.param {
            Some(param) => write!(f, "{}:{}", self.kind, param),
            None => write!(f, "{}", self.kind),
        }
    }
}

/// Rules attached to a field, as a piped string or a token list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RuleSpec {
    Piped(String),
    List(Vec<String>),
}

impl RuleSpec {
    /// Raw tokens in declaration order, skipping empty ones
    pub fn tokens(&self) -> Vec<&str> {
        match self {
            RuleSpec::Piped(rules) => rules.split('|').filter(|t| !t.is_empty()).collect(),
            RuleSpec::List(rules) => rules
                .iter()
                .map(String::as_str)
                .filter(|t| !t.is_empty())
                .collect(),
        }
    }

    /// Parse every token, failing on the first unrecognized one
    pub fn parse(&self) -> Result<Vec<ParsedRule>, RuleTokenError> {
        self.tokens().into_iter().map(ParsedRule::parse).collect()
    }

    /// Whether any well-formed token names `kind`
    pub fn contains(&self, kind: RuleKind) -> bool {
        self.tokens()
            .into_iter()
            .filter_map(|token| ParsedRule::parse(token).ok())
            .any(|rule| rule.kind == kind)
    }

    pub fn is_empty(&self) -> bool {
        self.tokens().is_empty()
    }
}

impl Default for RuleSpec {
    fn default() -> Self {
        RuleSpec::List(Vec::new())
    }
}

impl From<&str> for RuleSpec {
    fn from(rules: &str) -> Self {
        RuleSpec::Piped(rules.to_string())
    }
}

impl From<String> for RuleSpec {
    fn from(rules: String) -> Self {
        RuleSpec::Piped(rules)
    }
}

impl From<Vec<String>> for RuleSpec {
    fn from(rules: Vec<String>) -> Self {
        RuleSpec::List(rules)
    }
}

impl From<Vec<&str>> for RuleSpec {
    fn from(rules: Vec<&str>) -> Self {
        RuleSpec::List(rules.into_iter().map(str::to_string).collect())
    }
}

impl<const N: usize> From<[&str; N]> for RuleSpec {
    fn from(rules: [&str; N]) -> Self {
        RuleSpec::List(rules.iter().map(|r| r.to_string()).collect())
    }
}
