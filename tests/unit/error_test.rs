//! Tests for error types

use prometheus_task_pool::core::{PoolError, TaskError};
use std::time::Duration;

#[test]
fn test_config_error() {
    let err = PoolError::Config("concurrency must be greater than 0".to_string());
    assert_eq!(
        format!("{}", err),
        "invalid configuration: concurrency must be greater than 0"
    );
}

#[test]
fn test_validation_error() {
    let err = PoolError::Validation("queue full".to_string());
    assert_eq!(format!("{}", err), "invalid task: queue full");
}

#[test]
fn test_timeout_error() {
    let err = TaskError::Timeout(Duration::from_millis(100));
    assert_eq!(format!("{}", err), "task exceeded its time limit of 100ms");
    assert!(err.is_timeout());
}

#[test]
fn test_task_failure_is_transparent() {
    let err = TaskError::from(anyhow::anyhow!("connection reset"));
    assert_eq!(format!("{}", err), "connection reset");
    assert!(!err.is_timeout());
}

#[test]
fn test_panicked_error() {
    let err = TaskError::Panicked("boom".to_string());
    assert_eq!(format!("{}", err), "task panicked: boom");
}

#[test]
fn test_abandoned_error() {
    let err = TaskError::Abandoned;
    assert_eq!(format!("{}", err), "attempt was dropped before it settled");
    assert!(!err.is_timeout());
}
