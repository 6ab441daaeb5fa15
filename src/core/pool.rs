//! Bounded-concurrency task pool.
//!
//! `TaskPool` owns a FIFO queue of tasks and drains it on `run`, keeping at
//! most `concurrency` tasks in flight. Every admitted task goes through the
//! retry wrapper and the per-attempt timeout; outcomes are counted in
//! [`PoolStats`] and reported through the hook slots and the audit sink.
//!
//! # Example
//!
//! ```rust,ignore
//! use prometheus_task_pool::config::PoolConfig;
//! use prometheus_task_pool::core::TaskPool;
//!
//! let mut pool = TaskPool::new(PoolConfig::new().with_concurrency(2))?;
//! for n in 1..=3 {
//!     pool.add(move || async move { Ok::<_, anyhow::Error>(n) })?;
//! }
//! let outcome = pool.run().await;
//! assert_eq!(outcome.stats.completed, 3);
//! ```

use std::collections::VecDeque;
use std::sync::Arc;

use tracing::{info, Instrument};
use uuid::Uuid;

use crate::config::PoolConfig;
use crate::runtime::TokioSpawner;

use super::audit::{build_audit_event, AuditAction, AuditSink};
use super::hooks::Hooks;
use super::retry::RetryPolicy;
use super::scheduler::{Dispatch, QueuedTask};
use super::stats::StatsTracker;
use super::{PoolError, PoolStats, Spawn, Task, TaskError, TaskId};

/// Pool lifecycle, advanced once per `run`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PoolState {
    /// No run has started yet.
    Idle,
    /// A run is draining the queue.
    Running,
    /// The last run finished.
    Done,
}

/// Aggregate outcome of a single `run`.
#[derive(Debug)]
pub struct RunResult<T> {
    /// Values of successful tasks, in settlement order.
    pub results: Vec<T>,
    /// One error per task that exhausted its retries, in settlement order.
    pub errors: Vec<TaskError>,
    /// Counters at the end of the run.
    pub stats: PoolStats,
}

/// Bounded-concurrency executor with per-task timeout and retry.
///
/// Counters are cumulative over the lifetime of the pool: `total` counts every
/// task ever added, and `clear` discards queued tasks without touching them.
pub struct TaskPool<T, S = TokioSpawner>
where
    T: Send + 'static,
{
    config: PoolConfig,
    policy: RetryPolicy,
    spawner: S,
    queue: VecDeque<QueuedTask<T>>,
    stats: StatsTracker,
    hooks: Hooks,
    audit: Option<Arc<dyn AuditSink>>,
    state: PoolState,
    next_id: TaskId,
}

impl<T> TaskPool<T, TokioSpawner>
where
    T: Send + 'static,
{
    /// Create a pool that detaches timed-out attempts onto the ambient tokio runtime.
    pub fn new(config: PoolConfig) -> Result<Self, PoolError> {
        Self::with_spawner(config, TokioSpawner::default())
    }
}

impl<T, S> TaskPool<T, S>
where
    T: Send + 'static,
{
    /// Create a pool with an explicit spawner.
    pub fn with_spawner(config: PoolConfig, spawner: S) -> Result<Self, PoolError> {
        config.validate()?;
        Ok(Self {
            policy: RetryPolicy::from(&config),
            config,
            spawner,
            queue: VecDeque::new(),
            stats: StatsTracker::default(),
            hooks: Hooks::default(),
            audit: None,
            state: PoolState::Idle,
            next_id: 0,
        })
    }

    /// Attach an audit sink.
    #[must_use]
    pub fn with_audit(mut self, audit: Arc<dyn AuditSink>) -> Self {
        self.audit = Some(audit);
        self
    }

    /// Enqueue a task at the back of the queue.
    ///
    /// Fails without side effects when the queue is at `max_queue_depth`.
    pub fn add<K>(&mut self, task: K) -> Result<&mut Self, PoolError>
    where
        K: Task<T>,
    {
        if let Some(max) = self.config.max_queue_depth {
            if self.queue.len() >= max {
                tracing::warn!(queued = self.queue.len(), max, "task rejected: queue full");
                return Err(PoolError::Validation(format!(
                    "queue already holds the maximum of {max} tasks"
                )));
            }
        }

        let id = self.next_id;
        self.next_id += 1;
        self.queue.push_back(QueuedTask {
            id,
            task: Arc::new(task),
        });
        self.stats.enqueued();
        self.record(id, AuditAction::Enqueued);
        Ok(self)
    }

    /// Discard every queued task; in-flight work and counters are untouched.
    ///
    /// Returns the number of discarded tasks.
    pub fn clear(&mut self) -> usize {
        let discarded = self.queue.len();
        for queued in std::mem::take(&mut self.queue) {
            self.record(queued.id, AuditAction::Cleared);
        }
        if discarded > 0 {
            info!(discarded, "queue cleared");
        }
        discarded
    }

    /// Set the handler called once at the start of every run, before any
    /// admission. It fires even when the queue is empty.
    pub fn on_start(&mut self, f: impl Fn(PoolStats) + Send + Sync + 'static) -> &mut Self {
        self.hooks.set_start(f);
        self
    }

    /// Set the handler called after every admission and every settlement.
    pub fn on_progress(&mut self, f: impl Fn(PoolStats) + Send + Sync + 'static) -> &mut Self {
        self.hooks.set_progress(f);
        self
    }

    /// Set the handler called once per task that exhausts its retries.
    pub fn on_error(
        &mut self,
        f: impl Fn(&TaskError, PoolStats) + Send + Sync + 'static,
    ) -> &mut Self {
        self.hooks.set_error(f);
        self
    }

    /// Set the handler called once when a run has drained.
    pub fn on_done(&mut self, f: impl Fn(PoolStats) + Send + Sync + 'static) -> &mut Self {
        self.hooks.set_done(f);
        self
    }

    /// Current lifecycle state.
    #[must_use]
    pub const fn state(&self) -> PoolState {
        self.state
    }

    /// Snapshot of the counters.
    #[must_use]
    pub const fn stats(&self) -> PoolStats {
        self.stats.snapshot()
    }

    /// Number of tasks waiting in the queue.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    /// Configuration the pool was built with.
    #[must_use]
    pub const fn config(&self) -> &PoolConfig {
        &self.config
    }

    fn record(&self, id: TaskId, action: AuditAction) {
        if let Some(sink) = &self.audit {
            sink.record(build_audit_event(None, id, action, None));
        }
    }
}

impl<T, S> TaskPool<T, S>
where
    T: Send + 'static,
    S: Spawn + Clone + Send + Sync + 'static,
{
    /// Drain the queue and wait for every admitted task to settle.
    ///
    /// Individual task failures never fail the run; they are returned in
    /// [`RunResult::errors`].
    pub async fn run(&mut self) -> RunResult<T> {
        let run_id = Uuid::new_v4();
        let span = tracing::info_span!(
            "pool_run",
            %run_id,
            concurrency = self.config.concurrency
        );
        self.drive(run_id).instrument(span).await
    }

    async fn drive(&mut self, run_id: Uuid) -> RunResult<T> {
        self.state = PoolState::Running;
        self.stats.reset_active();
        info!(queued = self.queue.len(), "run started");
        self.hooks.start(self.stats.snapshot());

        let dispatch = Dispatch {
            run_id,
            concurrency: self.config.concurrency,
            policy: self.policy,
            spawner: &self.spawner,
            hooks: &self.hooks,
            audit: self.audit.as_ref(),
        };
        let (results, errors) = dispatch.drain(&mut self.queue, &mut self.stats).await;

        self.state = PoolState::Done;
        let stats = self.stats.snapshot();
        info!(
            completed = stats.completed,
            failed = stats.failed,
            total = stats.total,
            "run finished"
        );
        self.hooks.done(stats);

        RunResult {
            results,
            errors,
            stats,
        }
    }
}
