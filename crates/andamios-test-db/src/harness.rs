use crate::{TestDatabaseManager, WorkerDatabaseRecord};
use andamios_core::WorkerId;
use std::{future::Future, sync::Arc};

/// Runs one worker's tests against its own databases.
///
/// Owns a current-thread Tokio runtime so that it can be driven from a plain
/// `#[test]` and so that teardown can block in `Drop`. The worker's databases
/// are dropped after the test body, including when the body panics.
pub struct WorkerTest {
    runtime: tokio::runtime::Runtime,
    manager: Arc<TestDatabaseManager>,
    worker_id: WorkerId,

    /// Set while the worker's databases exist
    provisioned: bool,
}

impl WorkerTest {
    /// Create a new WorkerTest with a current-thread runtime.
    pub fn new(manager: Arc<TestDatabaseManager>, worker_id: WorkerId) -> Self {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .expect("failed to create Tokio runtime");

        Self {
            runtime,
            manager,
            worker_id,
            provisioned: false,
        }
    }

    /// Provisions the worker's databases, runs `test_fn`, then drops them.
    ///
    /// # Panics
    ///
    /// Panics if provisioning fails, since the test cannot run without
    /// isolation, and if teardown leaks a database.
    pub fn run<F, Fut>(&mut self, test_fn: F)
    where
        F: FnOnce(WorkerDatabaseRecord) -> Fut,
        Fut: Future<Output = ()>,
    {
        let manager = self.manager.clone();
        let worker_id = self.worker_id.as_str();

        let record = self
            .runtime
            .block_on(manager.setup_worker_databases(worker_id))
            .unwrap_or_else(|e| panic!("{e}"));
        self.provisioned = true;

        self.runtime.block_on(test_fn(record));

        self.provisioned = false;
        if let Err(e) = self
            .runtime
            .block_on(manager.cleanup_worker_databases(worker_id))
        {
            panic!("{e}");
        }
    }
}

impl Drop for WorkerTest {
    fn drop(&mut self) {
        // Still set only if the test body panicked
        if self.provisioned {
            let result = self
                .runtime
                .block_on(self.manager.cleanup_worker_databases(self.worker_id.as_str()));

            if let Err(e) = result {
                tracing::error!(worker_id = %self.worker_id, "worker databases leaked: {e}");
            }
        }
    }
}
