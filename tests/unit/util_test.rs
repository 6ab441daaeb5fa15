//! Tests for utility functions

use prometheus_task_pool::core::backoff_delay;
use prometheus_task_pool::config::BackoffStrategy;
use prometheus_task_pool::util::{init_tracing, now_ms};
use std::time::Duration;

#[test]
fn test_now_ms_is_after_2020() {
    assert!(now_ms() > 1_577_836_800_000);
}

#[test]
fn test_init_tracing_is_idempotent() {
    init_tracing();
    init_tracing();
}

#[test]
fn test_backoff_sequence() {
    let base = Duration::from_millis(150);
    let exponential: Vec<_> = (0..4)
        .map(|attempt| backoff_delay(attempt, BackoffStrategy::Exponential, base))
        .collect();
    assert_eq!(
        exponential,
        vec![
            Duration::from_millis(150),
            Duration::from_millis(300),
            Duration::from_millis(600),
            Duration::from_millis(1200),
        ]
    );

    let constant: Vec<_> = (0..4)
        .map(|attempt| backoff_delay(attempt, BackoffStrategy::Constant, base))
        .collect();
    assert_eq!(constant, vec![base; 4]);
}
