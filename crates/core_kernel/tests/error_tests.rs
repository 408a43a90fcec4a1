//! Tests for core_kernel error types

use core_kernel::error::CoreError;
use core_kernel::temporal::{parse_date, TemporalError};

#[test]
fn test_core_error_invalid_argument() {
    let error = CoreError::invalid_argument("Invalid account number");

    match error {
        CoreError::InvalidArgument(msg) => assert_eq!(msg, "Invalid account number"),
        _ => panic!("Expected InvalidArgument error"),
    }
}

#[test]
fn test_core_error_configuration() {
    let error = CoreError::configuration("Missing config");

    match error {
        CoreError::Configuration(msg) => assert_eq!(msg, "Missing config"),
        _ => panic!("Expected Configuration error"),
    }
}

#[test]
fn test_core_error_from_temporal_error() {
    let temporal_error = parse_date("yesterday").unwrap_err();
    let core_error: CoreError = temporal_error.into();

    assert!(matches!(core_error, CoreError::Temporal(TemporalError::InvalidDate(_))));
}

#[test]
fn test_core_error_display() {
    let error = CoreError::invalid_argument("Test error");
    let display = format!("{}", error);

    assert!(display.contains("Invalid argument"));
    assert!(display.contains("Test error"));
}

#[test]
fn test_temporal_error_display_names_input() {
    let error = parse_date("2012-13-01").unwrap_err();

    assert_eq!(error.to_string(), "Invalid date: 2012-13-01");
}
