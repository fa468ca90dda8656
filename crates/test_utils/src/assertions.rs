//! Custom Test Assertions
//!
//! Assertion helpers for rule-engine results that print every reported
//! violation when they fail.

use domain_tercero::{validate_record, FieldError, ThirdParty, ThirdPartyError, ThirdPartyRecord};

fn describe(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(|error| error.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}

/// Asserts that a record passes every rule
pub fn assert_record_valid(record: &ThirdPartyRecord) {
    if let Err(errors) = validate_record(record) {
        panic!("Expected a valid record, got: {}", describe(&errors));
    }
}

/// Asserts that the violations name exactly `fields`, in order
pub fn assert_field_errors(errors: &[FieldError], fields: &[&str]) {
    let actual: Vec<&str> = errors.iter().map(|error| error.field.as_str()).collect();
    assert_eq!(
        actual,
        fields,
        "Unexpected violations: {}",
        describe(errors)
    );
}

/// Asserts that at least one violation concerns `field`
pub fn assert_has_field_error(errors: &[FieldError], field: &str) {
    assert!(
        errors.iter().any(|error| error.field == field),
        "Expected a violation on {}, got: {}",
        field,
        describe(errors)
    );
}

/// Asserts that a record fails validation on exactly `fields`
pub fn assert_record_rejected(record: &ThirdPartyRecord, fields: &[&str]) {
    match validate_record(record) {
        Ok(()) => panic!("Expected violations on {:?}, record was valid", fields),
        Err(errors) => assert_field_errors(&errors, fields),
    }
}

/// Asserts that a workflow result is a validation failure on exactly `fields`
pub fn assert_validation_failure(result: &Result<ThirdParty, ThirdPartyError>, fields: &[&str]) {
    match result {
        Err(ThirdPartyError::Validation(errors)) => assert_field_errors(errors, fields),
        other => panic!("Expected validation failure on {:?}, got {:?}", fields, other),
    }
}
