//! Tests for builder modules

use prometheus_task_pool::builders::build_pools;
use prometheus_task_pool::config::{PoolConfig, SchedulerConfig};
use prometheus_task_pool::core::{AppResult, TaskPool};
use prometheus_task_pool::runtime::TokioSpawner;
use std::collections::HashMap;

fn scheduler_config() -> SchedulerConfig {
    let mut pools = HashMap::new();
    pools.insert("fast".to_string(), PoolConfig::new().with_concurrency(8));
    pools.insert("slow".to_string(), PoolConfig::new().with_concurrency(1).with_retries(3));
    SchedulerConfig { pools }
}

#[test]
fn test_build_pools_from_config() {
    let pools: HashMap<String, TaskPool<u32>> =
        build_pools(&scheduler_config(), &TokioSpawner::default()).unwrap();

    assert_eq!(pools.len(), 2);
    assert_eq!(pools["fast"].config().concurrency, 8);
    assert_eq!(pools["slow"].config().retries, 3);
}

#[test]
fn test_build_pools_rejects_invalid_config() {
    let cfg = SchedulerConfig {
        pools: HashMap::new(),
    };
    let built = build_pools::<u32, _>(&cfg, &TokioSpawner::default());
    assert!(built.is_err());
}

#[tokio::test]
async fn test_built_pools_are_independent() {
    let mut pools: HashMap<String, TaskPool<u32>> =
        build_pools(&scheduler_config(), &TokioSpawner::default()).unwrap();

    let fast = pools.get_mut("fast").unwrap();
    fast.add(|| async { AppResult::Ok(1_u32) }).unwrap();
    fast.add(|| async { AppResult::Ok(2_u32) }).unwrap();
    let outcome = fast.run().await;
    assert_eq!(outcome.stats.total, 2);

    assert_eq!(pools["slow"].stats().total, 0);
}
