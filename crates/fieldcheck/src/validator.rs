//! Batch validation over many fields

use crate::config::{ValidatorConfig, ValidatorSetup};
use crate::error::ValidationResult;
use crate::rules::{FieldResult, FieldSpec, Rules};
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::debug;

/// Aggregated outcome of a batch
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BatchResult {
    /// True when at least one field failed
    pub failed: bool,
    /// Results keyed by field key; passing fields are omitted when
    /// `return_invalid_only` is set
    pub results: BTreeMap<String, FieldResult>,
}

impl BatchResult {
    pub fn is_failed(&self) -> bool {
        self.failed
    }

    pub fn get(&self, key: &str) -> Option<&FieldResult> {
        self.results.get(key)
    }

    /// The `(failed, results)` pair
    pub fn into_parts(self) -> (bool, BTreeMap<String, FieldResult>) {
        (self.failed, self.results)
    }

    /// JSON body suitable for an API response
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "failed": self.failed,
            "results": self.results,
        })
    }
}

/// Validates batches of fields under one configuration
#[derive(Debug, Clone, Default)]
pub struct Validator {
    config: ValidatorConfig,
}

impl Validator {
    pub fn new(config: ValidatorConfig) -> Self {
        Self { config }
    }

    /// Adjust the options present in `setup`, keeping the rest
    pub fn setup(mut self, setup: ValidatorSetup) -> Self {
        self.config.apply(setup);
        self
    }

    /// Back to the default configuration
    pub fn reset(&mut self) {
        self.config.reset();
    }

    pub fn config(&self) -> &ValidatorConfig {
        &self.config
    }

    /// Validate one field under this configuration
    pub fn validate_field(&self, field: &FieldSpec) -> ValidationResult<FieldResult> {
        Rules::new(field)
            .default_messages(self.config.set_message.as_ref())
            .echo_data(self.config.data_in_result)
            .malformed_rules(self.config.malformed_rules)
            .validate()
    }

    /// Validate every field independently and aggregate the results.
    ///
    /// Only a configuration error (or a malformed rule under the `reject`
    /// policy) makes this return `Err`; rule failures are reported in the
    /// [`BatchResult`]. A later field with a duplicate key replaces the
    /// earlier one's entry.
    pub fn validate(&self, fields: &[FieldSpec]) -> ValidationResult<BatchResult> {
        let mut batch = BatchResult::default();

        for field in fields {
            let result = self.validate_field(field)?;
            if !result.valid {
                batch.failed = true;
            }
            if !self.config.return_invalid_only || !result.valid {
                batch.results.insert(field.key.clone(), result);
            }
        }

        debug!(
            fields = fields.len(),
            reported = batch.results.len(),
            failed = batch.failed,
            "batch validated"
        );
        Ok(batch)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MalformedRulePolicy;
    use crate::error::ValidationError;
    use crate::messages::Messages;
    use crate::rule::RuleKind;
    use serde_json::{json, Value};

    fn sample_fields() -> Vec<FieldSpec> {
        vec![
            FieldSpec::new("email", "test@email.com", "required|email|min:8"),
            FieldSpec::new("age", "old", "required|number"),
        ]
    }

    #[test]
    fn test_default_config_reports_invalid_only() {
        let batch = Validator::default().validate(&sample_fields()).unwrap();

        assert!(batch.is_failed());
        assert_eq!(batch.results.len(), 1);
        assert!(batch.get("age").is_some());
        assert!(batch.get("age").unwrap().data.is_none());
    }

    #[test]
    fn test_return_all_with_data() {
        let validator = Validator::default().setup(ValidatorSetup {
            data_in_result: Some(true),
            return_invalid_only: Some(false),
            ..Default::default()
        });
        let batch = validator.validate(&sample_fields()).unwrap();

        assert_eq!(batch.results.len(), 2);
        assert!(batch.get("email").unwrap().valid);
        assert_eq!(batch.get("email").unwrap().data, Some(json!("test@email.com")));
    }

    #[test]
    fn test_set_message_applies_without_field_override() {
        let validator = Validator::new(
            ValidatorConfig::default()
                .set_message(Messages::new().with(RuleKind::Number, ":attr needs digits")),
        );
        let fields = vec![
            FieldSpec::new("age", "old", "number"),
            FieldSpec::new("height", "tall", "number")
                .with_message(RuleKind::Number, "height override"),
        ];

        let batch = validator.validate(&fields).unwrap();

        assert_eq!(
            batch.get("age").unwrap().message_for(RuleKind::Number),
            Some("age needs digits")
        );
        assert_eq!(
            batch.get("height").unwrap().message_for(RuleKind::Number),
            Some("height override")
        );
    }

    #[test]
    fn test_configuration_error_aborts_batch() {
        let fields = vec![
            FieldSpec::new("email", "test@email.com", "email"),
            FieldSpec::new("note", Value::Null, "required|nullable"),
        ];
        assert_eq!(
            Validator::default().validate(&fields),
            Err(ValidationError::configuration("note"))
        );
    }

    #[test]
    fn test_malformed_rule_policies() {
        let fields = vec![
            FieldSpec::new("code", "abc", "string|what?"),
            FieldSpec::new("email", "nope", "email"),
        ];

        let batch = Validator::default().validate(&fields).unwrap();
        assert!(batch.failed);
        assert!(batch.get("code").is_none());
        assert!(batch.get("email").is_some());

        let strict =
            Validator::new(ValidatorConfig::default().malformed_rules(MalformedRulePolicy::Reject));
        assert_eq!(
            strict.validate(&fields),
            Err(ValidationError::malformed("code", "what?"))
        );
    }

    #[test]
    fn test_reset() {
        let mut validator = Validator::default().setup(ValidatorSetup {
            return_invalid_only: Some(false),
            ..Default::default()
        });
        validator.reset();
        assert_eq!(validator.config(), &ValidatorConfig::default());
    }

    #[test]
    fn test_to_json_and_parts() {
        let batch = Validator::default().validate(&sample_fields()).unwrap();
        let body = batch.to_json();
        assert_eq!(body["failed"], json!(true));
        assert_eq!(body["results"]["age"]["message"]["number"], json!("age must be a number"));

        let (failed, results) = batch.into_parts();
        assert!(failed);
        assert!(results.contains_key("age"));
    }
}
