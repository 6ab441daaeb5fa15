//! Error types for pool operations.

use std::time::Duration;

use thiserror::Error;

/// Caller-facing errors returned synchronously by pool operations.
///
/// These never reflect the outcome of a task; they abort only the call that
/// produced them and leave the pool untouched.
#[derive(Debug, Error)]
pub enum PoolError {
    /// Invalid configuration supplied at construction.
    #[error("invalid configuration: {0}")]
    Config(String),
    /// A task could not be accepted by `add`.
    #[error("invalid task: {0}")]
    Validation(String),
}

/// Terminal failure of a single task, recorded in the run outcome.
#[derive(Debug, Error)]
pub enum TaskError {
    /// The wrapped attempt did not settle before its deadline.
    #[error("task exceeded its time limit of {0:?}")]
    Timeout(Duration),
    /// The task itself reported a failure.
    #[error(transparent)]
    Failed(#[from] anyhow::Error),
    /// The task panicked while running.
    #[error("task panicked: {0}")]
    Panicked(String),
    /// A detached attempt was dropped by its spawner before it settled,
    /// typically because the runtime shut down.
    #[error("attempt was dropped before it settled")]
    Abandoned,
}

impl TaskError {
    /// Whether this failure came from the deadline rather than the task.
    #[must_use]
    pub const fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout(_))
    }
}

/// Application-facing result returned by task bodies.
pub type AppResult<T> = Result<T, anyhow::Error>;
