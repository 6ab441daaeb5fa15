//! Configuration models for pools, backoff, and timeouts.

pub mod pool;

pub use pool::{BackoffStrategy, PoolConfig, SchedulerConfig, TimeoutAction};
