use andamios_test_db::{Backend, TestDatabaseManager};
use pretty_assertions::assert_eq;
use tests::{backend_tests, BackendTest};

async fn sweep_drops_databases_no_worker_owns(test: BackendTest) {
    // Left behind by a run that never tore down
    let crashed = test.manager();
    crashed.setup_worker_databases("0").await.unwrap();
    crashed.setup_worker_databases("1").await.unwrap();

    let manager = test.manager();
    manager.setup_worker_databases("2").await.unwrap();

    let report = manager.sweep_orphans().await.unwrap();

    assert_eq!(report.len(), 2);
    assert_eq!(test.databases().await, vec![test.database_name("2")]);
    assert!(manager.record("2").is_some());
}

async fn sweep_on_clean_server_drops_nothing(test: BackendTest) {
    let manager = test.manager();
    manager.setup_worker_databases("0").await.unwrap();

    let report = manager.sweep_orphans().await.unwrap();

    assert!(report.is_empty());
    assert_eq!(test.databases().await, vec![test.database_name("0")]);
}

async fn sweep_leaves_other_namespaces_alone(test: BackendTest) {
    // Shares the test's prefix as a string prefix, but is its own namespace
    let neighbour = TestDatabaseManager::builder()
        .prefix(format!("{}x", test.namespace().prefix()))
        .shared_backend(test.backend())
        .build()
        .unwrap();
    let neighbour_db = neighbour.setup_worker_databases("0").await.unwrap();

    let report = test.manager().sweep_orphans().await.unwrap();
    assert!(report.is_empty());

    let names = test.backend().list_databases().await.unwrap();
    assert!(names.iter().any(|name| name == neighbour_db.database_name().as_str()));

    neighbour.cleanup_worker_databases("0").await.unwrap();
}

backend_tests!(
    sweep_drops_databases_no_worker_owns,
    sweep_on_clean_server_drops_nothing,
    sweep_leaves_other_namespaces_alone,
);
