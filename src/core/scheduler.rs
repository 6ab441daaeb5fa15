//! Admission-control loop.
//!
//! All in-flight executions are polled from the run future itself, so queue,
//! in-flight set and counters are only touched between suspension points. The
//! capacity check and the admission that follows it contain no `.await`.

use std::collections::VecDeque;
use std::sync::Arc;

use futures::future::BoxFuture;
use futures::stream::{FuturesUnordered, StreamExt};
use futures::FutureExt;
use tracing::{debug, warn};
use uuid::Uuid;

use super::audit::{build_audit_event, AuditAction, AuditSink};
use super::hooks::Hooks;
use super::retry::{run_with_retry, RetryOutcome, RetryPolicy};
use super::stats::StatsTracker;
use super::{Spawn, Task, TaskError, TaskId};

/// A task waiting in the queue.
pub(crate) struct QueuedTask<T> {
    pub(crate) id: TaskId,
    pub(crate) task: Arc<dyn Task<T>>,
}

type Settled<T> = (TaskId, RetryOutcome<T>);

/// Borrowed view of everything the loop reads but never mutates.
pub(crate) struct Dispatch<'a, S> {
    pub(crate) run_id: Uuid,
    pub(crate) concurrency: usize,
    pub(crate) policy: RetryPolicy,
    pub(crate) spawner: &'a S,
    pub(crate) hooks: &'a Hooks,
    pub(crate) audit: Option<&'a Arc<dyn AuditSink>>,
}

impl<S> Dispatch<'_, S>
where
    S: Spawn + Clone + Send + Sync + 'static,
{
    /// Drain `queue`, keeping at most `concurrency` tasks in flight.
    ///
    /// Returns once the queue is empty and every admitted task has settled.
    /// Values and errors are in settlement order.
    pub(crate) async fn drain<T>(
        &self,
        queue: &mut VecDeque<QueuedTask<T>>,
        stats: &mut StatsTracker,
    ) -> (Vec<T>, Vec<TaskError>)
    where
        T: Send + 'static,
    {
        let mut in_flight: FuturesUnordered<BoxFuture<'static, Settled<T>>> =
            FuturesUnordered::new();
        let mut results = Vec::new();
        let mut errors = Vec::new();

        loop {
            while in_flight.len() < self.concurrency {
                let Some(QueuedTask { id, task }) = queue.pop_front() else {
                    break;
                };
                stats.admitted();
                in_flight.push(self.execute(id, task));
                debug!(task_id = id, active = in_flight.len(), queued = queue.len(), "task admitted");
                self.record(id, AuditAction::Admitted, None);
                self.hooks.progress(stats.snapshot());
            }
            debug_assert!(in_flight.len() <= self.concurrency);

            // Empty in-flight set means the queue is drained too.
            let Some((id, settled)) = in_flight.next().await else {
                break;
            };
            let RetryOutcome { attempts, outcome } = settled;
            match outcome {
                Ok(value) => {
                    stats.succeeded();
                    debug!(task_id = id, attempts, "task completed");
                    self.record(id, AuditAction::Completed, Some(format!("attempts={attempts}")));
                    results.push(value);
                }
                Err(err) => {
                    stats.failed();
                    warn!(task_id = id, attempts, error = %err, "task failed");
                    self.record(
                        id,
                        AuditAction::Failed,
                        Some(format!("attempts={attempts}: {err}")),
                    );
                    self.hooks.error(&err, stats.snapshot());
                    errors.push(err);
                }
            }
            self.hooks.progress(stats.snapshot());
        }

        (results, errors)
    }

    fn execute<T>(&self, id: TaskId, task: Arc<dyn Task<T>>) -> BoxFuture<'static, Settled<T>>
    where
        T: Send + 'static,
    {
        run_with_retry(id, task, self.policy, self.spawner.clone())
            .map(move |settled| (id, settled))
            .boxed()
    }

    fn record(&self, id: TaskId, action: AuditAction, detail: Option<String>) {
        if let Some(sink) = self.audit {
            sink.record(build_audit_event(Some(self.run_id), id, action, detail));
        }
    }
}
