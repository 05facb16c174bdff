use andamios_test_db::{memory::MemoryBackend, TestDatabaseManager, WorkerId, WorkerTest};
use std::sync::Arc;

#[test]
fn worker_test_on_memory_backends() {
    let primary = MemoryBackend::named("primary");
    let documents = MemoryBackend::named("documents");
    let manager = Arc::new(
        TestDatabaseManager::builder()
            .prefix("harness")
            .backend(primary.clone())
            .backend(documents.clone())
            .build()
            .unwrap(),
    );

    let mut test = WorkerTest::new(manager.clone(), WorkerId::new("gw0").unwrap());
    let (seen_primary, seen_documents) = (primary.clone(), documents.clone());
    test.run(|record| async move {
        assert_eq!(record.database_name().as_str(), "harness_gw0");
        assert!(seen_primary.contains("harness_gw0"));
        assert!(seen_documents.contains("harness_gw0"));
    });

    assert!(primary.databases().is_empty());
    assert!(documents.databases().is_empty());
    assert!(manager.is_empty());
}

#[cfg(feature = "sqlite")]
mod sqlite {
    use super::*;
    use andamios_backend_sqlite::Sqlite;

    #[test]
    fn worker_test_creates_and_removes_database_file() {
        let dir = tempfile::tempdir().unwrap();
        let manager = Arc::new(
            TestDatabaseManager::builder()
                .backend(Sqlite::open_dir(dir.path()))
                .build()
                .unwrap(),
        );
        let path = dir.path().join("andamios_test_gw1.db");

        let mut test = WorkerTest::new(manager, WorkerId::new("gw1").unwrap());
        let seen = path.clone();
        test.run(|_| async move {
            assert!(seen.exists());
        });

        assert!(!path.exists());
    }

    #[test]
    fn worker_test_removes_database_file_after_panic() {
        let dir = tempfile::tempdir().unwrap();
        let manager = Arc::new(
            TestDatabaseManager::builder()
                .backend(Sqlite::open_dir(dir.path()))
                .build()
                .unwrap(),
        );

        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            let mut test = WorkerTest::new(manager.clone(), WorkerId::new("gw2").unwrap());
            test.run(|_| async { panic!("assertion in test body") });
        }));

        assert!(result.is_err());
        assert!(!dir.path().join("andamios_test_gw2.db").exists());
    }
}
