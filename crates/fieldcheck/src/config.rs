//! Batch validation configuration
//!
//! Configuration is a plain value owned by each [`Validator`](crate::Validator)
//! rather than process-wide state, so concurrent batches never share it.

use crate::messages::Messages;
use serde::{Deserialize, Serialize};
use std::env;
use std::str::FromStr;
use thiserror::Error;

pub const ENV_DATA_IN_RESULT: &str = "FIELDCHECK_DATA_IN_RESULT";
pub const ENV_RETURN_INVALID_ONLY: &str = "FIELDCHECK_RETURN_INVALID_ONLY";
pub const ENV_MALFORMED_RULES: &str = "FIELDCHECK_MALFORMED_RULES";
pub const ENV_MESSAGES: &str = "FIELDCHECK_MESSAGES";

/// What to do with a rule token that does not parse
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MalformedRulePolicy {
    /// Stop evaluating the field and keep what has been recorded so far
    #[default]
    Skip,
    /// Fail the whole batch with
    /// [`ValidationError::MalformedRule`](crate::ValidationError::MalformedRule)
    Reject,
}

impl FromStr for MalformedRulePolicy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "skip" => Ok(MalformedRulePolicy::Skip),
            "reject" => Ok(MalformedRulePolicy::Reject),
            _ => Err(ConfigError::InvalidValue {
                field: "malformed_rules".to_string(),
                value: s.to_string(),
                expected: "skip or reject".to_string(),
            }),
        }
    }
}

/// Options applied to every field in a batch
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ValidatorConfig {
    /// Echo each field's input value in its result
    pub data_in_result: bool,
    /// Leave passing fields out of the result map
    pub return_invalid_only: bool,
    /// Templates used for any rule a field does not override itself
    pub set_message: Option<Messages>,
    pub malformed_rules: MalformedRulePolicy,
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        Self {
            data_in_result: false,
            return_invalid_only: true,
            set_message: None,
            malformed_rules: MalformedRulePolicy::Skip,
        }
    }
}

/// A partial update; `None` leaves the current setting untouched
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ValidatorSetup {
    pub data_in_result: Option<bool>,
    pub return_invalid_only: Option<bool>,
    pub set_message: Option<Messages>,
    pub malformed_rules: Option<MalformedRulePolicy>,
}

impl ValidatorConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn data_in_result(mut self, enabled: bool) -> Self {
        self.data_in_result = enabled;
        self
    }

    pub fn return_invalid_only(mut self, enabled: bool) -> Self {
        self.return_invalid_only = enabled;
        self
    }

    pub fn set_message(mut self, messages: Messages) -> Self {
        self.set_message = Some(messages);
        self
    }

    pub fn malformed_rules(mut self, policy: MalformedRulePolicy) -> Self {
        self.malformed_rules = policy;
        self
    }

    /// Overwrite only the options present in `setup`
    pub fn apply(&mut self, setup: ValidatorSetup) {
        if let Some(enabled) = setup.data_in_result {
            self.data_in_result = enabled;
        }
        if let Some(enabled) = setup.return_invalid_only {
            self.return_invalid_only = enabled;
        }
        if let Some(messages) = setup.set_message {
            self.set_message = Some(messages);
        }
        if let Some(policy) = setup.malformed_rules {
            self.malformed_rules = policy;
        }
    }

    /// Restore every option to its default
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Load configuration from `FIELDCHECK_*` environment variables.
    ///
    /// Unset variables keep their defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(value) = get_env_optional(ENV_DATA_IN_RESULT) {
            config.data_in_result = parse_bool("data_in_result", &value)?;
        }
        if let Some(value) = get_env_optional(ENV_RETURN_INVALID_ONLY) {
            config.return_invalid_only = parse_bool("return_invalid_only", &value)?;
        }
        if let Some(value) = get_env_optional(ENV_MALFORMED_RULES) {
            config.malformed_rules = value.parse()?;
        }
        if let Some(value) = get_env_optional(ENV_MESSAGES) {
            let messages = serde_json::from_str::<Messages>(&value).map_err(|e| ConfigError::Parse {
                field: "set_message".to_string(),
                reason: e.to_string(),
            })?;
            config.set_message = Some(messages);
        }

        Ok(config)
    }
}

fn get_env_optional(key: &str) -> Option<String> {
    env::var(key).ok()
}

fn parse_bool(field: &str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Ok(true),
        "false" | "0" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidValue {
            field: field.to_string(),
            value: value.to_string(),
            expected: "a boolean (true/false, 1/0, yes/no, on/off)".to_string(),
        }),
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid value for {field}: '{value}', expected {expected}")]
    InvalidValue {
        field: String,
        value: String,
        expected: String,
    },

    #[error("Configuration parsing error for {field}: {reason}")]
    Parse { field: String, reason: String },
}
