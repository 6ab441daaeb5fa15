//! Runtime adapters used to detach timed-out work.

pub mod tokio_spawner;

pub use tokio_spawner::TokioSpawner;
