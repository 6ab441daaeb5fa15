//! Tests for tokio spawner utilities

use prometheus_task_pool::core::Spawn;
use prometheus_task_pool::runtime::tokio_spawner::TokioSpawner;

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_tokio_spawner_spawn() {
    let spawner = TokioSpawner::new(tokio::runtime::Handle::current());

    let (tx, rx) = tokio::sync::oneshot::channel();
    spawner.spawn(async move {
        tx.send(123).unwrap();
    });

    let result = rx.await.expect("oneshot result");
    assert_eq!(result, 123);
}

#[tokio::test]
async fn test_default_spawner_uses_ambient_runtime() {
    let spawner = TokioSpawner::default();

    let (tx, rx) = tokio::sync::oneshot::channel();
    spawner.spawn(async move {
        tx.send("ambient").unwrap();
    });

    assert_eq!(rx.await.unwrap(), "ambient");
}

#[test]
fn test_current_outside_runtime() {
    assert!(TokioSpawner::current().is_none());
}
