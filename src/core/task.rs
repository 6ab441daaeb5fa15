//! Task and spawner abstractions.

use std::future::Future;

use async_trait::async_trait;

use super::AppResult;

/// Sequence number assigned to a task when it is enqueued.
pub type TaskId = u64;

/// A zero-argument asynchronous unit of work.
///
/// A task may be invoked more than once: every retry calls it again. Any
/// `Fn() -> impl Future<Output = AppResult<T>>` closure is a task.
///
/// # Example
///
/// ```rust,ignore
/// use prometheus_task_pool::core::{AppResult, Task};
/// use async_trait::async_trait;
///
/// struct Ping { url: String }
///
/// #[async_trait]
/// impl Task<u16> for Ping {
///     async fn call(&self) -> AppResult<u16> {
///         Ok(probe(&self.url).await?)
///     }
/// }
/// ```
#[async_trait]
pub trait Task<T>: Send + Sync + 'static
where
    T: Send + 'static,
{
    /// Run one attempt of the task.
    async fn call(&self) -> AppResult<T>;
}

#[async_trait]
impl<T, F, Fut> Task<T> for F
where
    T: Send + 'static,
    F: Fn() -> Fut + Send + Sync + 'static,
    Fut: Future<Output = AppResult<T>> + Send + 'static,
{
    async fn call(&self) -> AppResult<T> {
        (self)().await
    }
}

/// Abstraction for spawning detached work on a runtime.
///
/// Used to run timed attempts that must be allowed to outlive their deadline.
pub trait Spawn {
    /// Spawn a future that runs to completion independently of the caller.
    fn spawn<F>(&self, fut: F)
    where
        F: Future<Output = ()> + Send + 'static;
}
