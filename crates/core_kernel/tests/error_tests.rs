//! Tests for core_kernel error types

use core_kernel::error::CoreError;
use core_kernel::{ClaimId, Username};

#[test]
fn test_invalid_identifier_names_kind_and_value() {
    let error = "CLM-x".parse::<ClaimId>().unwrap_err();

    assert_eq!(error, CoreError::invalid_identifier("CLM", "CLM-x"));
    assert_eq!(error.to_string(), "Invalid CLM identifier: 'CLM-x'");
}

#[test]
fn test_blank_username() {
    let error = Username::new("").unwrap_err();
    assert!(matches!(error, CoreError::InvalidUsername(_)));
    assert!(error.to_string().contains("must not be blank"));
}

#[test]
fn test_username_rejected_during_deserialization() {
    let result: Result<Username, _> = serde_json::from_str("\"  \"");
    assert!(result.is_err());

    let ok: Username = serde_json::from_str("\"dave\"").unwrap();
    assert_eq!(ok.as_str(), "dave");
}
