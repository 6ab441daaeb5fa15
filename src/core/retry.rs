//! Retry wrapper around the timeout wrapper.

use std::sync::Arc;
use std::time::Duration;

use crate::config::{BackoffStrategy, PoolConfig, TimeoutAction};

use super::backoff::backoff_delay;
use super::timeout::run_with_timeout;
use super::{Spawn, Task, TaskError, TaskId};

/// Attempt and backoff parameters applied to every task of a pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Extra attempts after the first failure.
    pub retries: u32,
    /// Backoff growth strategy.
    pub strategy: BackoffStrategy,
    /// Backoff base delay.
    pub base: Duration,
    /// Per-attempt deadline.
    pub timeout: Option<Duration>,
    /// Handling of attempts that exceed the deadline.
    pub timeout_action: TimeoutAction,
}

impl From<&PoolConfig> for RetryPolicy {
    fn from(cfg: &PoolConfig) -> Self {
        Self {
            retries: cfg.retries,
            strategy: cfg.backoff_strategy,
            base: cfg.backoff_base(),
            timeout: cfg.timeout(),
            timeout_action: cfg.timeout_action,
        }
    }
}

/// Result of running a task through the retry wrapper.
#[derive(Debug)]
pub struct RetryOutcome<T> {
    /// Number of attempts made, at least one.
    pub attempts: u32,
    /// Value of the successful attempt or the error of the last one.
    pub outcome: Result<T, TaskError>,
}

/// Run `task` up to `retries + 1` times, sleeping between failed attempts.
///
/// Only the last error is kept; an earlier success ends the loop at once.
pub async fn run_with_retry<T, S>(
    id: TaskId,
    task: Arc<dyn Task<T>>,
    policy: RetryPolicy,
    spawner: S,
) -> RetryOutcome<T>
where
    T: Send + 'static,
    S: Spawn,
{
    let mut attempt: u32 = 0;
    loop {
        match run_with_timeout(&task, policy.timeout, policy.timeout_action, &spawner).await {
            Ok(value) => {
                return RetryOutcome {
                    attempts: attempt + 1,
                    outcome: Ok(value),
                }
            }
            Err(err) if attempt >= policy.retries => {
                return RetryOutcome {
                    attempts: attempt + 1,
                    outcome: Err(err),
                }
            }
            Err(err) => {
                let delay = backoff_delay(attempt, policy.strategy, policy.base);
                tracing::debug!(
                    task_id = id,
                    attempt,
                    delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX),
                    error = %err,
                    "attempt failed, backing off"
                );
                tokio::time::sleep(delay).await;
                attempt += 1;
            }
        }
    }
}
