//! End-to-end tests for batch validation through the public API

use fieldcheck::{
    FieldSpec, MalformedRulePolicy, Messages, RuleKind, ValidationError, Validator,
    ValidatorConfig, ValidatorSetup,
};
use serde_json::{json, Value};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::TRACE)
        .try_init();
}

fn email_field() -> FieldSpec {
    FieldSpec::new("email", "test@email.com", "required|email|min:8")
}

fn password_field() -> FieldSpec {
    FieldSpec::new("password", "p@$$w0Rd", "required|password|min:8|max:20")
}

fn debt_field() -> FieldSpec {
    FieldSpec::new("debt", 123.456, ["required", "decimal:2"])
}

#[test]
fn test_valid_email_field() {
    let result = Validator::default().validate_field(&email_field()).unwrap();
    assert!(result.valid);
    assert!(result.message.is_empty());
}

#[test]
fn test_valid_password_field() {
    let result = Validator::default().validate_field(&password_field()).unwrap();
    assert!(result.valid);
}

#[test]
fn test_invalid_decimal_field() {
    let result = Validator::default().validate_field(&debt_field()).unwrap();
    assert!(!result.valid);
    assert_eq!(result.failed_rules().collect::<Vec<_>>(), vec![RuleKind::Decimal]);
}

#[test]
fn test_mixed_batch_with_default_config() {
    init_tracing();
    let fields = vec![
        email_field(),
        password_field(),
        debt_field(),
        FieldSpec::new("email", "testemail.com", "email"),
    ];

    let (failed, results) = Validator::default().validate(&fields).unwrap().into_parts();

    assert!(failed);
    assert!(!results.contains_key("password"));
    assert!(results.contains_key("debt"));

    // Both fields share the `email` key; only the failing one is reported
    let email = &results["email"];
    assert!(!email.valid);
    assert_eq!(email.message_for(RuleKind::Email), Some("email is not a valid email"));
    assert!(email.data.is_none());
}

#[test]
fn test_reference_batch_passes() {
    let fields = vec![
        FieldSpec::new("email", "test@email.com", ["required", "email", "min:8"])
            .with_message(RuleKind::Required, "value must not be empty"),
        FieldSpec::new("password", "p@$$w0Rd", "required|password|min:8|max:20"),
        FieldSpec::new("age", 28, "required|number"),
        FieldSpec::new("hobby", "fishing", "required|string"),
        FieldSpec::new("birth_date", "12-12-2022", "required|date")
            .with_message(RuleKind::Date, "value must be a valid birth date"),
        FieldSpec::new("uuid", "5fcb09a4-f5cc-46ef-aa76-8d185e6490ab", "required|uuid"),
        FieldSpec::new("hutang", 123.45, ["required", "decimal:2"]),
        FieldSpec::new("gaji", 200_000_000, ["required", "integer"]),
    ];

    let validator = Validator::default().setup(ValidatorSetup {
        data_in_result: Some(true),
        ..Default::default()
    });
    let batch = validator.validate(&fields).unwrap();

    assert!(!batch.failed);
    assert!(batch.results.is_empty());
}

#[test]
fn test_return_every_field_with_data() {
    let validator = Validator::new(
        ValidatorConfig::default()
            .data_in_result(true)
            .return_invalid_only(false),
    );
    let batch = validator
        .validate(&[email_field(), password_field(), debt_field()])
        .unwrap();

    assert!(batch.failed);
    assert_eq!(batch.results.len(), 3);
    assert_eq!(batch.results["debt"].data, Some(json!(123.456)));
    assert!(batch.results["password"].valid);
}

#[test]
fn test_empty_or_nullable_only_fields_pass() {
    let fields = vec![
        FieldSpec::new("a", Value::Null, ""),
        FieldSpec::new("b", Value::Null, "nullable"),
        FieldSpec::new("c", "", "nullable"),
        FieldSpec::new("d", json!([]), Vec::<String>::new()),
    ];
    let batch = Validator::default().validate(&fields).unwrap();
    assert!(!batch.failed);
}

#[test]
fn test_required_with_nullable_always_errors() {
    for data in [Value::Null, json!("present"), json!(0)] {
        let fields = vec![FieldSpec::new("flag", data, "nullable|required")];
        assert_eq!(
            Validator::default().validate(&fields),
            Err(ValidationError::configuration("flag"))
        );
    }
}

#[test]
fn test_message_precedence() {
    let global = Messages::new()
        .with(RuleKind::Required, "global: :attr missing")
        .with(RuleKind::Min, "global: :attr under :min");
    let validator = Validator::new(ValidatorConfig::default().set_message(global));

    let fields = vec![
        FieldSpec::new("name", "", "required|min:3")
            .with_message(RuleKind::Required, "field: :attr missing"),
        FieldSpec::new("title", "", "required|max:3"),
    ];
    let batch = validator.validate(&fields).unwrap();

    let name = &batch.results["name"];
    assert_eq!(name.message_for(RuleKind::Required), Some("field: name missing"));
    assert_eq!(name.message_for(RuleKind::Min), Some("global: name under 3"));

    let title = &batch.results["title"];
    assert_eq!(title.message_for(RuleKind::Required), Some("global: title missing"));
    assert!(title.message_for(RuleKind::Max).is_none());
}

#[test]
fn test_boundaries_are_inclusive() {
    let fields = vec![
        FieldSpec::new("low", 5, "min:5"),
        FieldSpec::new("high", 5, "max:5"),
        FieldSpec::new("code", "abcde", "min:5|max:5"),
    ];
    let batch = Validator::default().validate(&fields).unwrap();
    assert!(!batch.failed);
}

#[test]
fn test_not_a_number_is_reported_on_the_rule() {
    let fields = vec![FieldSpec::new("age", 30, "required|max:old")];
    let batch = Validator::default().validate(&fields).unwrap();

    assert!(batch.failed);
    assert_eq!(
        batch.results["age"].message_for(RuleKind::Max),
        Some("age is not a number")
    );
}

#[test]
fn test_malformed_rule_skips_rest_of_field_only() {
    let fields = vec![
        FieldSpec::new("zip", "12a", "required|nonsense|numberBetween:[1,99999]"),
        FieldSpec::new("country", "", "required"),
    ];

    let batch = Validator::default().validate(&fields).unwrap();
    assert!(batch.failed);
    // `numberBetween` would have failed, but never ran
    assert!(batch.results.get("zip").is_none());
    assert!(batch.results.contains_key("country"));

    let strict =
        Validator::new(ValidatorConfig::default().malformed_rules(MalformedRulePolicy::Reject));
    assert_eq!(
        strict.validate(&fields),
        Err(ValidationError::malformed("zip", "nonsense"))
    );
}

#[test]
fn test_validation_is_repeatable() {
    let validator = Validator::default();
    let fields = vec![email_field(), debt_field(), FieldSpec::new("email", "x", "email|min:3")];
    assert_eq!(validator.validate(&fields), validator.validate(&fields));
}

#[test]
fn test_temporal_and_set_rules_in_batch() {
    let fields = vec![
        FieldSpec::new(
            "starts",
            "2024-06-01T09:00:00Z",
            "required|date|after:2024-01-01|beforeOrEqual:2024-12-31",
        ),
        FieldSpec::new("window", "2024-03-15", "dateBetween:2024-03-01,2024-03-31"),
        FieldSpec::new("role", "editor", r#"in:["admin","editor"]|notIn:root,guest"#),
        FieldSpec::new("size", "m", "in:sml|notIn:xl"),
        FieldSpec::new("terms", "yes", "accepted"),
        FieldSpec::new("marketing", false, "declined"),
        FieldSpec::new("confirm", "secret", "equalTo:secret|notEqualTo:public"),
        FieldSpec::new("slug", "hello-world", ["regex:^[a-z]+(-[a-z]+)*$"]),
        FieldSpec::new("pin", 1234, "minDigit:1000|maxDigit:9999"),
        FieldSpec::new("site", "https://example.com", "url"),
        FieldSpec::new("handle", "user42", "alphaNumeric"),
        FieldSpec::new("tags", json!(["a", "b"]), "array|min:1|max:3"),
        FieldSpec::new("meta", json!({"k": "v"}), "object"),
    ];

    let batch = Validator::default().validate(&fields).unwrap();
    assert!(!batch.failed, "unexpected failures: {:?}", batch.results);
}

#[test]
fn test_batch_result_serializes_rule_names() {
    let fields = vec![FieldSpec::new("nick", "a!", "alphaNumeric|min:3")];
    let body = Validator::default().validate(&fields).unwrap().to_json();

    assert_eq!(body["failed"], json!(true));
    let messages = body["results"]["nick"]["message"].as_object().unwrap();
    assert!(messages.contains_key("alphaNumeric"));
    assert!(messages.contains_key("min"));
    assert!(body["results"]["nick"].get("data").is_none());
}

#[test]
fn test_fields_deserialize_from_json() {
    let fields: Vec<FieldSpec> = serde_json::from_value(json!([
        { "data": "test@email.com", "key": "email", "rules": ["required", "email"] },
        { "key": "nickname", "rules": "nullable|alpha" },
        {
            "data": 7,
            "key": "rating",
            "rules": "numberBetween:[1,5]",
            "message": { "numberBetween": ":attr must be :numberBetween" }
        }
    ]))
    .unwrap();

    let batch = Validator::default().validate(&fields).unwrap();
    assert!(batch.failed);
    assert_eq!(batch.results.len(), 1);
    assert_eq!(
        batch.results["rating"].message_for(RuleKind::NumberBetween),
        Some("rating must be [1,5]")
    );
}
