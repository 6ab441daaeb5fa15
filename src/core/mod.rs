//! Core scheduling, retry and observability primitives.

pub mod audit;
pub mod backoff;
pub mod error;
pub mod hooks;
pub mod pool;
pub mod retry;
pub mod stats;
pub mod task;
pub mod timeout;

mod scheduler;

pub use audit::{build_audit_event, AuditAction, AuditEvent, AuditSink, InMemoryAuditSink};
pub use backoff::backoff_delay;
pub use error::{AppResult, PoolError, TaskError};
pub use hooks::Hooks;
pub use pool::{PoolState, RunResult, TaskPool};
pub use retry::{run_with_retry, RetryOutcome, RetryPolicy};
pub use stats::PoolStats;
pub use task::{Spawn, Task, TaskId};
pub use timeout::run_with_timeout;
