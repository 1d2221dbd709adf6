//! Tests for field validation rules.

use serde_json::json;

use crate::validators::*;

#[test]
fn clean_char_trims_and_accepts_numbers() {
    assert_eq!(
        clean_char(&json!("  buy milk "), CharRule::default()),
        Ok(Some("buy milk".to_string()))
    );
    assert_eq!(
        clean_char(&json!(42), CharRule::default()),
        Ok(Some("42".to_string()))
    );
}

#[test]
fn clean_char_null_handling() {
    assert_eq!(
        clean_char(&json!(null), CharRule::max(10)),
        Err(NOT_NULL.to_string())
    );
    assert_eq!(clean_char(&json!(null), CharRule::max(10).nullable()), Ok(None));
}

#[test]
fn clean_char_rejects_blank_and_non_strings() {
    assert_eq!(
        clean_char(&json!(""), CharRule::default()),
        Err(NOT_BLANK.to_string())
    );
    assert_eq!(
        clean_char(&json!(true), CharRule::default()),
        Err(INVALID_STRING.to_string())
    );
    assert_eq!(
        clean_char(&json!({"a": 1}), CharRule::default()),
        Err(INVALID_STRING.to_string())
    );
}

#[test]
fn clean_char_counts_characters_not_bytes() {
    let five_umlauts = "üüüüü";
    assert!(clean_char(&json!(five_umlauts), CharRule::max(5)).is_ok());
    assert_eq!(
        clean_char(&json!("üüüüüü"), CharRule::max(5)),
        Err("Ensure this field has no more than 5 characters.".to_string())
    );
}

#[test]
fn clean_bool_accepts_common_forms() {
    assert_eq!(clean_bool(&json!(true)), Ok(true));
    assert_eq!(clean_bool(&json!("false")), Ok(false));
    assert_eq!(clean_bool(&json!(1)), Ok(true));
    assert_eq!(clean_bool(&json!("0")), Ok(false));
    assert_eq!(clean_bool(&json!("maybe")), Err(INVALID_BOOLEAN.to_string()));
    assert_eq!(clean_bool(&json!(2)), Err(INVALID_BOOLEAN.to_string()));
    assert_eq!(clean_bool(&json!(1.0)), Ok(true));
    assert_eq!(clean_bool(&json!(0.0)), Ok(false));
    assert_eq!(clean_bool(&json!(0.5)), Err(INVALID_BOOLEAN.to_string()));
    assert_eq!(clean_bool(&json!(-1)), Err(INVALID_BOOLEAN.to_string()));
    assert_eq!(clean_bool(&json!(null)), Err(NOT_NULL.to_string()));
}

#[test]
fn clean_email_checks_format() {
    assert_eq!(
        clean_email(&json!("ada@example.com"), CharRule::default()),
        Ok("ada@example.com".to_string())
    );
    for bad in ["ada", "ada@", "@example.com", "ada@example", "a da@example.com"] {
        assert_eq!(
            clean_email(&json!(bad), CharRule::default()),
            Err(INVALID_EMAIL.to_string()),
            "{bad} should be rejected"
        );
    }
}

#[test]
fn expect_object_names_the_received_type() {
    let errors = expect_object(&json!("text")).unwrap_err();
    assert_eq!(
        errors.get(NON_FIELD_ERRORS),
        Some(&["Invalid data. Expected a dictionary, but got str.".to_string()][..])
    );
    assert!(expect_object(&json!({})).is_ok());
}

#[test]
fn validation_errors_collect_and_summarise() {
    let mut errors = ValidationErrors::new();
    assert!(errors.is_empty());

    errors.add("details", REQUIRED);
    errors.add("task", NOT_BLANK);
    errors.add("task", "second");

    assert_eq!(
        errors.summary(),
        "details: This field is required.; task: This field may not be blank. second"
    );
    assert_eq!(
        serde_json::to_value(&errors).unwrap(),
        json!({
            "details": ["This field is required."],
            "task": ["This field may not be blank.", "second"]
        })
    );
    assert!(errors.into_result(()).is_err());
}

#[test]
fn unique_violation_maps_columns_to_fields() {
    let cases = [
        ("UNIQUE constraint failed: todo.task", "task", TASK_TAKEN),
        (
            "UNIQUE constraint failed: contact.phone_number",
            "phone_number",
            PHONE_NUMBER_TAKEN,
        ),
        ("UNIQUE constraint failed: contact.email", "email", EMAIL_TAKEN),
        (
            "UNIQUE constraint failed: contact.name, contact.phone_number",
            NON_FIELD_ERRORS,
            NAME_AND_PHONE_NUMBER_TAKEN,
        ),
    ];

    for (message, field, expected) in cases {
        let errors = unique_violation(message);
        assert_eq!(errors.get(field), Some(&[expected.to_string()][..]), "{message}");
    }
}

#[test]
fn unique_violation_never_leaks_engine_text() {
    let errors = unique_violation("UNIQUE constraint failed: other.column");
    assert_eq!(
        errors.get(NON_FIELD_ERRORS),
        Some(&[RECORD_TAKEN.to_string()][..])
    );
    assert!(!errors.summary().contains("UNIQUE"));
}
