//! Per-attempt deadline enforcement.

use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::time::Duration;

use futures::FutureExt;
use tokio::sync::oneshot;

use crate::config::TimeoutAction;

use super::{Spawn, Task, TaskError};

/// Run a single attempt of `task`, racing it against `timeout` when set.
///
/// With `TimeoutAction::Detach` the attempt is spawned so that it keeps
/// running after the deadline; its eventual result is dropped with the
/// receiver. If the spawner drops a detached attempt without running it to
/// completion, the attempt fails with `TaskError::Abandoned`. With
/// `TimeoutAction::Cancel` the attempt future is dropped. A zero timeout
/// expires before a pending attempt can settle. The deadline timer is
/// released on every exit path.
pub async fn run_with_timeout<T, S>(
    task: &Arc<dyn Task<T>>,
    timeout: Option<Duration>,
    action: TimeoutAction,
    spawner: &S,
) -> Result<T, TaskError>
where
    T: Send + 'static,
    S: Spawn,
{
    let Some(limit) = timeout else {
        return invoke(task).await;
    };

    match action {
        TimeoutAction::Cancel => tokio::time::timeout(limit, invoke(task))
            .await
            .unwrap_or(Err(TaskError::Timeout(limit))),
        TimeoutAction::Detach => {
            let (tx, rx) = oneshot::channel();
            let task = Arc::clone(task);
            spawner.spawn(async move {
                let outcome = invoke(&task).await;
                if tx.send(outcome).is_err() {
                    tracing::debug!("discarding result of abandoned attempt");
                }
            });
            match tokio::time::timeout(limit, rx).await {
                Ok(Ok(outcome)) => outcome,
                Ok(Err(_closed)) => Err(TaskError::Abandoned),
                Err(_elapsed) => Err(TaskError::Timeout(limit)),
            }
        }
    }
}

/// Invoke the task once, turning a panic into a task failure.
async fn invoke<T>(task: &Arc<dyn Task<T>>) -> Result<T, TaskError>
where
    T: Send + 'static,
{
    match AssertUnwindSafe(task.call()).catch_unwind().await {
        Ok(outcome) => outcome.map_err(TaskError::Failed),
        Err(payload) => Err(TaskError::Panicked(panic_message(payload.as_ref()))),
    }
}

pub(crate) fn panic_message(payload: &(dyn Any + Send)) -> String {
    payload
        .downcast_ref::<&str>()
        .map(ToString::to_string)
        .or_else(|| payload.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "non-string panic payload".into())
}
