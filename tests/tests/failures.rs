use andamios_test_db::{memory::MemoryBackend, Backend, BackendKind, TestDatabaseManager};
use pretty_assertions::assert_eq;
use std::sync::Arc;
use tests::{backend_tests, BackendTest};

fn unreachable(name: &str) -> Arc<dyn Backend> {
    let backend = MemoryBackend::named(name);
    backend.set_unreachable(true);
    Arc::new(backend)
}

async fn setup_fails_when_second_backend_is_unreachable(test: BackendTest) {
    let manager = test.manager_with(&[unreachable("down")]);

    let err = manager.setup_worker_databases("0").await.unwrap_err();

    assert!(err.is_provisioning());
    assert_eq!(err.provisioning_backend(), Some(BackendKind::Memory));
    assert!(err.to_string().contains(&test.database_name("0")));
    assert!(err.to_string().contains("memory://down"));

    // The backend that succeeded was rolled back
    assert!(test.databases().await.is_empty());
    assert!(manager.record("0").is_none());
}

async fn setup_fails_when_first_backend_is_unreachable(test: BackendTest) {
    let manager = TestDatabaseManager::builder()
        .namespace(test.namespace().clone())
        .shared_backend(unreachable("down"))
        .shared_backend(test.backend())
        .build()
        .unwrap();

    let err = manager.setup_worker_databases("0").await.unwrap_err();

    assert!(err.is_provisioning());
    assert!(test.databases().await.is_empty());
    assert!(manager.is_empty());
}

async fn setup_fails_when_create_is_rejected(test: BackendTest) {
    let rejecting = MemoryBackend::named("rejecting");
    rejecting.fail_creates(true);
    let manager = test.manager_with(&[Arc::new(rejecting)]);

    let err = manager.setup_worker_databases("0").await.unwrap_err();

    assert!(err.is_provisioning());
    assert!(test.databases().await.is_empty());
}

async fn failed_setup_can_be_retried(test: BackendTest) {
    let flaky = MemoryBackend::named("flaky");
    flaky.set_unreachable(true);
    let manager = test.manager_with(&[Arc::new(flaky.clone())]);

    manager.setup_worker_databases("0").await.unwrap_err();

    flaky.set_unreachable(false);
    manager.setup_worker_databases("0").await.unwrap();

    assert_eq!(test.databases().await, vec![test.database_name("0")]);
    assert!(flaky.contains(&test.database_name("0")));
}

async fn cleanup_reports_failed_backend_and_drops_the_rest(test: BackendTest) {
    let flaky = MemoryBackend::named("flaky");
    let manager = test.manager_with(&[Arc::new(flaky.clone())]);
    manager.setup_worker_databases("0").await.unwrap();

    flaky.fail_drops(true);
    let err = manager.cleanup_worker_databases("0").await.unwrap_err();

    assert!(err.is_aggregated_cleanup());
    let failures = err.cleanup_failures().unwrap();
    assert_eq!(failures.len(), 1);
    assert_eq!(failures[0].backend(), BackendKind::Memory);
    assert_eq!(failures[0].url(), "memory://flaky");
    assert_eq!(failures[0].database(), test.database_name("0"));

    // Every other backend was still cleaned, and the worker is forgotten
    assert!(test.databases().await.is_empty());
    assert!(flaky.contains(&test.database_name("0")));
    assert!(manager.is_empty());
}

async fn cleanup_reports_every_failed_backend(test: BackendTest) {
    let first = MemoryBackend::named("first");
    let second = MemoryBackend::named("second");
    let manager = test.manager_with(&[Arc::new(first.clone()), Arc::new(second.clone())]);
    manager.setup_worker_databases("0").await.unwrap();

    first.set_unreachable(true);
    second.fail_drops(true);
    let err = manager.cleanup_worker_databases("0").await.unwrap_err();

    let urls: Vec<_> = err
        .cleanup_failures()
        .unwrap()
        .iter()
        .map(|failure| failure.url().to_string())
        .collect();
    assert_eq!(urls, vec!["memory://first", "memory://second"]);
    assert!(test.databases().await.is_empty());
}

backend_tests!(
    setup_fails_when_second_backend_is_unreachable,
    setup_fails_when_first_backend_is_unreachable,
    setup_fails_when_create_is_rejected,
    failed_setup_can_be_retried,
    cleanup_reports_failed_backend_and_drops_the_rest,
    cleanup_reports_every_failed_backend,
);
