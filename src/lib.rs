//! # Prometheus Task Pool
//!
//! A bounded-concurrency executor for asynchronous units of work.
//!
//! The pool holds a FIFO queue of tasks and drains it while keeping at most
//! `concurrency` tasks in flight. Every admitted task runs through a retry
//! wrapper and a per-attempt timeout, and the pool reports its progress through
//! optional lifecycle hooks and an audit trail.
//!
//! ## Key Features
//!
//! - **Bounded Admission**: Never more than `concurrency` tasks in flight
//! - **Per-Attempt Timeouts**: Late results are recorded as timeouts, never as successes
//! - **Retry with Backoff**: Constant or exponential delays between attempts
//! - **Progress Hooks**: `on_start`, `on_progress`, `on_error`, `on_done`, isolated from the scheduler
//! - **Audit Trail**: Pluggable sink receiving enqueue/admit/complete/fail events
//!
//! ## Usage
//!
//! ```rust,ignore
//! use prometheus_task_pool::config::{BackoffStrategy, PoolConfig};
//! use prometheus_task_pool::core::TaskPool;
//! use std::time::Duration;
//!
//! let mut pool = TaskPool::new(
//!     PoolConfig::new()
//!         .with_concurrency(4)
//!         .with_timeout(Duration::from_secs(2))
//!         .with_retries(2)
//!         .with_backoff(BackoffStrategy::Exponential, Duration::from_millis(150)),
//! )?;
//!
//! pool.on_progress(|stats| println!("{stats:?}"));
//! pool.add(|| async { Ok::<_, anyhow::Error>(fetch_page().await?) })?;
//!
//! let outcome = pool.run().await;
//! println!("{} ok, {} failed", outcome.results.len(), outcome.errors.len());
//! ```
//!
//! For complete examples, see:
//! - `tests/pool_test.rs` - Scheduling scenarios
//! - `tests/retry_timeout_test.rs` - Retry, backoff and timeout behaviour

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

/// Core scheduling, retry and observability primitives.
pub mod core;
/// Configuration models for pools, backoff and timeouts.
pub mod config;
/// Builders to construct pools from configuration.
pub mod builders;
/// Runtime adapters used to detach timed-out work.
pub mod runtime;
/// Shared utilities.
pub mod util;
