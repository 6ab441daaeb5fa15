//! Builders to construct task pools from configuration.

use std::collections::HashMap;

use crate::config::SchedulerConfig;
use crate::core::{PoolError, TaskPool};

/// Build one independent pool per entry of the scheduler configuration.
///
/// Every pool gets its own clone of `spawner`; queues, counters and hooks are
/// never shared between pools.
pub fn build_pools<T, S>(
    cfg: &SchedulerConfig,
    spawner: &S,
) -> Result<HashMap<String, TaskPool<T, S>>, PoolError>
where
    T: Send + 'static,
    S: Clone,
{
    cfg.validate()?;

    let mut pools = HashMap::with_capacity(cfg.pools.len());
    for (name, pool_cfg) in &cfg.pools {
        let pool = TaskPool::with_spawner(pool_cfg.clone(), spawner.clone())?;
        tracing::debug!(pool = %name, concurrency = pool_cfg.concurrency, "pool built");
        pools.insert(name.clone(), pool);
    }

    Ok(pools)
}
