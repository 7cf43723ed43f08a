//! Field specifications and the per-field rule evaluator

use crate::config::MalformedRulePolicy;
use crate::error::{ValidationError, ValidationResult};
use crate::messages::{self, Messages};
use crate::rule::{ParsedRule, RuleKind, RuleSpec};
use crate::validators::{presence, RuleFailure};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use tracing::{debug, trace, warn};

/// One named value plus the rules it must satisfy
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldSpec {
    /// The value under validation; a missing value is `null`
    #[serde(default)]
    pub data: Value,
    /// Field name, also substituted for `:attr` in messages
    pub key: String,
    pub rules: RuleSpec,
    /// Per-rule message overrides for this field only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<Messages>,
}

impl FieldSpec {
    pub fn new(key: impl Into<String>, data: impl Into<Value>, rules: impl Into<RuleSpec>) -> Self {
        Self {
            data: data.into(),
            key: key.into(),
            rules: rules.into(),
            message: None,
        }
    }

    /// Override the message for one rule on this field
    pub fn with_message(mut self, kind: RuleKind, template: impl Into<String>) -> Self {
        self.message
            .get_or_insert_with(Messages::new)
            .insert(kind, template);
        self
    }

    pub fn with_messages(mut self, messages: Messages) -> Self {
        self.message = Some(messages);
        self
    }
}

/// Outcome of validating one field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldResult {
    pub key: String,
    pub valid: bool,
    /// One resolved message per failed rule
    #[serde(default)]
    pub message: BTreeMap<RuleKind, String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

impl FieldResult {
    pub fn passed(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            valid: true,
            message: BTreeMap::new(),
            data: None,
        }
    }

    /// Record a failed rule. Earlier failures are kept.
    pub fn fail(&mut self, kind: RuleKind, message: impl Into<String>) {
        self.valid = false;
        self.message.insert(kind, message.into());
    }

    pub fn is_valid(&self) -> bool {
        self.valid
    }

    pub fn message_for(&self, kind: RuleKind) -> Option<&str> {
        self.message.get(&kind).map(String::as_str)
    }

    /// Rules that failed, in `RuleKind` order
    pub fn failed_rules(&self) -> impl Iterator<Item = RuleKind> + '_ {
        self.message.keys().copied()
    }
}

/// Evaluates one field's rules.
///
/// An evaluator is single-use: [`Rules::validate`] consumes it, so a fresh
/// one is built for every field.
#[derive(Debug)]
pub struct Rules<'a> {
    field: &'a FieldSpec,
    default_messages: Option<&'a Messages>,
    echo_data: bool,
    malformed_rules: MalformedRulePolicy,
    result: FieldResult,
}

impl<'a> Rules<'a> {
    pub fn new(field: &'a FieldSpec) -> Self {
        Self {
            field,
            default_messages: None,
            echo_data: false,
            malformed_rules: MalformedRulePolicy::default(),
            result: FieldResult::passed(field.key.clone()),
        }
    }

    /// Templates consulted when the field has no override for a rule
    pub fn default_messages(mut self, messages: Option<&'a Messages>) -> Self {
        self.default_messages = messages;
        self
    }

    /// Copy the input value into the result
    pub fn echo_data(mut self, echo: bool) -> Self {
        self.echo_data = echo;
        self
    }

    pub fn malformed_rules(mut self, policy: MalformedRulePolicy) -> Self {
        self.malformed_rules = policy;
        self
    }

    /// Run every rule in declaration order.
    ///
    /// A field carrying both `required` and `nullable` is rejected before
    /// any rule runs. An empty `nullable` field passes without running its
    /// other rules. Under [`MalformedRulePolicy::Skip`] an unparseable token
    /// ends the field with whatever has been recorded so far.
    pub fn validate(mut self) -> ValidationResult<FieldResult> {
        let field = self.field;
        let key = field.key.as_str();
        let tokens = field.rules.tokens();
        debug!(field = key, rules = tokens.len(), "validating field");

        if field.rules.contains(RuleKind::Nullable) {
            if field.rules.contains(RuleKind::Required) {
                return Err(ValidationError::configuration(key));
            }
            if presence::is_empty(&field.data) {
                debug!(field = key, "nullable field is empty, skipping rules");
                return Ok(self.finish());
            }
        }

        for token in tokens {
            let rule = match ParsedRule::parse(token) {
                Ok(rule) => rule,
                Err(err) => match self.malformed_rules {
                    MalformedRulePolicy::Skip => {
                        warn!(field = key, %err, "skipping remaining rules");
                        break;
                    }
                    MalformedRulePolicy::Reject => {
                        return Err(ValidationError::malformed(key, token));
                    }
                },
            };

            trace!(field = key, rule = %rule, "applying rule");
            if let Err(failure) = rule.kind.check(&field.data, rule.param()) {
                self.record(&rule, failure);
            }
        }

        Ok(self.finish())
    }

    fn record(&mut self, rule: &ParsedRule, failure: RuleFailure) {
        let field = self.field;
        let key = field.key.as_str();
        let message = match failure {
            RuleFailure::Invalid => {
                let custom = field
                    .message
                    .as_ref()
                    .and_then(|m| m.get(rule.kind))
                    .or_else(|| self.default_messages.and_then(|m| m.get(rule.kind)));
                messages::resolve(rule.kind, key, rule.param(), custom)
            }
            RuleFailure::Param(error) => error.message_for(key),
        };

        trace!(field = key, rule = %rule.kind, %message, "rule failed");
        self.result.fail(rule.kind, message);
    }

    fn finish(mut self) -> FieldResult {
        if self.echo_data {
            self.result.data = Some(self.field.data.clone());
        }
        debug!(field = %self.result.key, valid = self.result.valid, "field validated");
        self.result
    }
}
