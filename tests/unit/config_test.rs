//! Tests for configuration validation

use prometheus_task_pool::config::{BackoffStrategy, PoolConfig, SchedulerConfig, TimeoutAction};
use prometheus_task_pool::core::PoolError;
use std::collections::HashMap;
use std::time::Duration;

#[test]
fn test_pool_config_validation() {
    let valid = PoolConfig::new()
        .with_concurrency(4)
        .with_timeout(Duration::from_secs(2))
        .with_retries(2);
    assert!(valid.validate().is_ok());
}

#[test]
fn test_pool_config_invalid_concurrency() {
    let invalid = PoolConfig::new().with_concurrency(0);
    assert!(matches!(invalid.validate(), Err(PoolError::Config(_))));
}

#[test]
fn test_pool_config_zero_timeout_is_accepted() {
    let config = PoolConfig::new().with_timeout(Duration::ZERO);
    assert!(config.validate().is_ok());
    assert_eq!(config.timeout(), Some(Duration::ZERO));
}

#[test]
fn test_pool_config_keeps_sub_millisecond_durations() {
    let config = PoolConfig::new()
        .with_timeout(Duration::from_micros(500))
        .with_backoff(BackoffStrategy::Exponential, Duration::from_micros(900));
    assert!(config.validate().is_ok());
    assert_eq!(config.timeout(), Some(Duration::from_micros(500)));
    assert_eq!(config.backoff_base(), Duration::from_micros(900));
}

#[test]
fn test_pool_config_from_json_accepts_fractional_millis() {
    let config = PoolConfig::from_json_str(r#"{ "timeout_ms": 0.5, "backoff_base_ms": 0 }"#).unwrap();
    let timeout = config.timeout().expect("timeout set");
    assert!(timeout.abs_diff(Duration::from_micros(500)) < Duration::from_micros(1));
    assert_eq!(config.backoff_base(), Duration::ZERO);
}

#[test]
fn test_pool_config_from_json_rejects_negative_millis() {
    let err = PoolConfig::from_json_str(r#"{ "timeout_ms": -5 }"#).unwrap_err();
    assert!(err.to_string().starts_with("invalid configuration: parse error"));
}

#[test]
fn test_pool_config_json_round_trip_keeps_millis() {
    let config = PoolConfig::new()
        .with_timeout(Duration::from_millis(1200))
        .with_backoff(BackoffStrategy::Constant, Duration::from_millis(150));
    let json = serde_json::to_value(&config).unwrap();
    assert_eq!(json["timeout_ms"], 1200);
    assert_eq!(json["backoff_base_ms"], 150);
    assert_eq!(PoolConfig::from_json_str(&json.to_string()).unwrap(), config);
}

#[test]
fn test_pool_config_invalid_queue_depth() {
    let invalid = PoolConfig::new().with_max_queue_depth(0);
    assert!(invalid.validate().is_err());
}

#[test]
fn test_pool_config_from_json() {
    let json = r#"{
        "concurrency": 3,
        "timeout_ms": 1200,
        "retries": 2,
        "backoff_strategy": "constant",
        "backoff_base_ms": 150,
        "timeout_action": "cancel"
    }"#;

    let config = PoolConfig::from_json_str(json).unwrap();
    assert_eq!(config.concurrency, 3);
    assert_eq!(config.timeout(), Some(Duration::from_millis(1200)));
    assert_eq!(config.retries, 2);
    assert_eq!(config.backoff_strategy, BackoffStrategy::Constant);
    assert_eq!(config.backoff_base(), Duration::from_millis(150));
    assert_eq!(config.timeout_action, TimeoutAction::Cancel);
    assert_eq!(config.max_queue_depth, None);
}

#[test]
fn test_pool_config_from_json_uses_defaults() {
    let config = PoolConfig::from_json_str("{}").unwrap();
    assert_eq!(config, PoolConfig::default());
}

#[test]
fn test_pool_config_from_json_rejects_negative_concurrency() {
    let err = PoolConfig::from_json_str(r#"{ "concurrency": -1 }"#).unwrap_err();
    assert!(err.to_string().starts_with("invalid configuration: parse error"));
}

#[test]
fn test_pool_config_from_json_rejects_zero_concurrency() {
    let err = PoolConfig::from_json_str(r#"{ "concurrency": 0 }"#).unwrap_err();
    assert!(matches!(err, PoolError::Config(_)));
}

#[test]
fn test_scheduler_config_validation() {
    let mut pools = HashMap::new();
    pools.insert("pool1".to_string(), PoolConfig::default());
    let config = SchedulerConfig { pools };
    assert!(config.validate().is_ok());
}

#[test]
fn test_scheduler_config_empty_pools() {
    let config = SchedulerConfig {
        pools: HashMap::new(),
    };
    assert!(config.validate().is_err());
}

#[test]
fn test_scheduler_config_names_invalid_pool() {
    let mut pools = HashMap::new();
    pools.insert("broken".to_string(), PoolConfig::new().with_concurrency(0));
    let err = SchedulerConfig { pools }.validate().unwrap_err();
    assert!(err.to_string().contains("pool `broken` invalid"));
}

#[test]
fn test_scheduler_config_from_json() {
    let json = r#"{
        "pools": {
            "fetch": { "concurrency": 8, "timeout_ms": 2000, "retries": 1 },
            "render": { "concurrency": 2 }
        }
    }"#;

    let config = SchedulerConfig::from_json_str(json).unwrap();
    assert_eq!(config.pools.len(), 2);
    assert_eq!(config.pools["fetch"].concurrency, 8);
    assert_eq!(config.pools["render"].timeout(), None);
}
