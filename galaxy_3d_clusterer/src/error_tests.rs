//! Unit tests for error.rs
//!
//! Tests all Error variants and their implementations (Display, Debug, Clone, std::error::Error).

use crate::error::{Error, Result};

// ============================================================================
// ERROR DISPLAY TESTS
// ============================================================================

#[test]
fn test_invalid_config_display() {
    let err = Error::InvalidConfig("cluster_count_z must be at least 1".to_string());
    let display = format!("{}", err);
    assert!(display.contains("Invalid configuration"));
    assert!(display.contains("cluster_count_z"));
}

#[test]
fn test_initialization_failed_display() {
    let err = Error::InitializationFailed("worker pool".to_string());
    let display = format!("{}", err);
    assert_eq!(display, "Initialization failed: worker pool");
}

// ============================================================================
// ERROR TRAIT IMPLEMENTATIONS
// ============================================================================

#[test]
fn test_error_is_std_error() {
    let err = Error::InvalidConfig("x".to_string());
    let _: &dyn std::error::Error = &err;
}

#[test]
fn test_error_debug() {
    let debug1 = format!("{:?}", Error::InvalidConfig("grid".to_string()));
    assert!(debug1.contains("InvalidConfig"));

    let debug2 = format!("{:?}", Error::InitializationFailed("pool".to_string()));
    assert!(debug2.contains("InitializationFailed"));
}

#[test]
fn test_error_clone() {
    let err1 = Error::InvalidConfig("test".to_string());
    let err2 = err1.clone();
    assert_eq!(format!("{}", err1), format!("{}", err2));
}

// ============================================================================
// RESULT TYPE TESTS
// ============================================================================

#[test]
fn test_error_propagation_with_question_mark() {
    fn inner() -> Result<u32> {
        Err(Error::InitializationFailed("no threads".to_string()))
    }

    fn outer() -> Result<u32> {
        inner()?;
        Ok(42)
    }

    match outer() {
        Err(Error::InitializationFailed(msg)) => assert_eq!(msg, "no threads"),
        other => panic!("unexpected result: {:?}", other),
    }
}
