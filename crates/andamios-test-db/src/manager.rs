//! Per-worker database provisioning.

mod builder;
pub use builder::Builder;

use crate::{connect, Config, ManagerState, SweepReport, WorkerDatabaseRecord};
use andamios_core::{
    backend::Backend, BackendKind, CleanupFailure, DatabaseName, Error, Namespace, Result,
    WorkerId,
};
use futures::future::join_all;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::{debug, info, info_span, warn, Instrument};

/// Allocates, tracks and tears down one isolated database per test worker.
///
/// Each worker's database is named `{prefix}_{worker_id}` and is created on
/// every configured backend. The manager only remembers the workers it
/// provisioned itself; it is meant to be owned by the test-session bootstrap
/// and shared with whatever runs setup and cleanup.
///
/// Operations for different workers may run concurrently. Callers must not
/// race setup and cleanup for the *same* worker.
#[derive(Debug)]
pub struct TestDatabaseManager {
    namespace: Namespace,
    backends: Vec<Arc<dyn Backend>>,
    state: Mutex<ManagerState>,
}

impl TestDatabaseManager {
    pub fn builder() -> Builder {
        Builder::default()
    }

    /// Builds a manager with one backend per configured connection URL.
    pub async fn from_config(config: &Config) -> Result<TestDatabaseManager> {
        let mut builder = TestDatabaseManager::builder();
        builder.namespace(config.namespace()?);

        for url in &config.backend_urls {
            builder.shared_backend(connect(url).await?);
        }

        builder.build()
    }

    pub fn namespace(&self) -> &Namespace {
        &self.namespace
    }

    pub fn backends(&self) -> &[Arc<dyn Backend>] {
        &self.backends
    }

    /// Provisions the worker's database on every backend.
    ///
    /// Each backend first drops any database left under the same name, then
    /// creates it. The worker is registered only once every backend
    /// succeeded. On failure, backends that did succeed are rolled back and
    /// the worker is left unregistered.
    ///
    /// Calling this again for a registered worker provisions a fresh
    /// database and replaces the record.
    pub async fn setup_worker_databases(&self, worker_id: &str) -> Result<WorkerDatabaseRecord> {
        let worker = WorkerId::new(worker_id)?;
        let database = self.namespace.database_name(&worker)?;
        let span = info_span!("setup_worker_databases", worker_id = %worker, database = %database);

        async move {
            // Forget any previous record first so a failed re-setup leaves nothing behind.
            if self.state().remove(worker.as_str()).is_some() {
                debug!("worker already provisioned; recreating");
            }

            let results = join_all(
                self.backends
                    .iter()
                    .map(|backend| provision(backend.as_ref(), &database)),
            )
            .await;

            let mut provisioned = vec![];
            let mut failure = None;

            for (backend, result) in self.backends.iter().zip(results) {
                match result {
                    Ok(()) => provisioned.push(backend),
                    Err(err) if failure.is_none() => failure = Some((backend, err)),
                    Err(err) => {
                        warn!(backend = %backend.url(), error = %err, "provisioning failed")
                    }
                }
            }

            if let Some((backend, cause)) = failure {
                self.rollback(&provisioned, &database).await;

                return Err(cause.context(Error::provisioning(
                    &worker,
                    &database,
                    backend.kind(),
                    backend.url(),
                )));
            }

            let record = WorkerDatabaseRecord::new(worker, database);
            self.state().insert(record.clone());

            info!(backends = self.backends.len(), "provisioned worker databases");
            Ok(record)
        }
        .instrument(span)
        .await
    }

    /// Drops the worker's database on every backend and forgets the worker.
    ///
    /// Does nothing if the worker is not registered. Every backend is
    /// attempted even if some fail; the failures are returned together.
    pub async fn cleanup_worker_databases(&self, worker_id: &str) -> Result<()> {
        let span = info_span!("cleanup_worker_databases", worker_id);

        async move {
            let Some(record) = self.state().remove(worker_id) else {
                debug!("worker not provisioned; nothing to clean up");
                return Ok(());
            };

            self.drop_everywhere(record.database_name())
                .instrument(info_span!("drop", database = %record.database_name()))
                .await
        }
        .instrument(span)
        .await
    }

    /// Drops the worker's database on every backend whether or not the
    /// worker is registered, then forgets the worker.
    ///
    /// Reclaims databases left behind by an interrupted setup, and lets a
    /// process other than the one that ran setup tear a worker down.
    pub async fn purge_worker_databases(&self, worker_id: &str) -> Result<()> {
        let worker = WorkerId::new(worker_id)?;
        let database = self.namespace.database_name(&worker)?;
        let span = info_span!("purge_worker_databases", worker_id = %worker, database = %database);

        async move {
            self.state().remove(worker.as_str());
            self.drop_everywhere(&database).await
        }
        .instrument(span)
        .await
    }

    /// Drops every database carrying this manager's prefix that no worker of
    /// this manager owns.
    ///
    /// This is never run implicitly. Call it from the session bootstrap
    /// before workers start: workers registered with *other* managers, such
    /// as those of other worker processes, look like orphans here.
    pub async fn sweep_orphans(&self) -> Result<SweepReport> {
        let span = info_span!("sweep_orphans", prefix = self.namespace.prefix());

        async move {
            let results = join_all(
                self.backends
                    .iter()
                    .map(|backend| self.sweep_backend(backend.as_ref())),
            )
            .await;

            let mut report = SweepReport::default();
            let mut failures = vec![];

            for (dropped, failed) in results {
                for (kind, database) in dropped {
                    report.push(kind, database);
                }
                failures.extend(failed);
            }

            info!(dropped = report.len(), failed = failures.len(), "swept orphaned databases");

            if failures.is_empty() {
                Ok(report)
            } else {
                Err(Error::aggregated_cleanup(failures))
            }
        }
        .instrument(span)
        .await
    }

    /// The record of a registered worker.
    pub fn record(&self, worker_id: &str) -> Option<WorkerDatabaseRecord> {
        self.state().get(worker_id).cloned()
    }

    /// Records of all registered workers, ordered by worker id.
    pub fn records(&self) -> Vec<WorkerDatabaseRecord> {
        let mut records: Vec<_> = self.state().records().cloned().collect();
        records.sort_by(|a, b| a.worker_id().cmp(b.worker_id()));
        records
    }

    /// Number of registered workers.
    pub fn len(&self) -> usize {
        self.state().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn state(&self) -> MutexGuard<'_, ManagerState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    async fn drop_everywhere(&self, database: &DatabaseName) -> Result<()> {
        let results = join_all(
            self.backends
                .iter()
                .map(|backend| backend.drop_database_if_exists(database)),
        )
        .await;

        let failures: Vec<_> = self
            .backends
            .iter()
            .zip(results)
            .filter_map(|(backend, result)| {
                result.err().map(|err| {
                    CleanupFailure::new(backend.kind(), backend.url(), database.as_str(), err)
                })
            })
            .collect();

        if failures.is_empty() {
            info!(backends = self.backends.len(), "dropped worker databases");
            Ok(())
        } else {
            warn!(failed = failures.len(), "failed to drop worker databases");
            Err(Error::aggregated_cleanup(failures))
        }
    }

    async fn rollback(&self, provisioned: &[&Arc<dyn Backend>], database: &DatabaseName) {
        let results = join_all(
            provisioned
                .iter()
                .map(|backend| backend.drop_database_if_exists(database)),
        )
        .await;

        for (backend, result) in provisioned.iter().zip(results) {
            if let Err(err) = result {
                warn!(backend = %backend.url(), error = %err, "rollback failed; database may have leaked");
            }
        }
    }

    async fn sweep_backend(
        &self,
        backend: &dyn Backend,
    ) -> (Vec<(BackendKind, String)>, Vec<CleanupFailure>) {
        let mut dropped = vec![];
        let mut failures = vec![];

        let names = match backend.list_databases().await {
            Ok(names) => names,
            Err(err) => {
                let pattern = format!("{}_*", self.namespace.prefix());
                failures.push(CleanupFailure::new(backend.kind(), backend.url(), pattern, err));
                return (dropped, failures);
            }
        };

        let orphans: Vec<DatabaseName> = {
            let state = self.state();
            names
                .iter()
                .filter_map(|name| self.namespace.parse_database_name(name))
                .filter(|database| !state.owns(database))
                .collect()
        };

        for database in orphans {
            match backend.drop_database_if_exists(&database).await {
                Ok(()) => {
                    debug!(backend = %backend.url(), %database, "dropped orphan");
                    dropped.push((backend.kind(), database.to_string()));
                }
                Err(err) => failures.push(CleanupFailure::new(
                    backend.kind(),
                    backend.url(),
                    database.as_str(),
                    err,
                )),
            }
        }

        (dropped, failures)
    }
}

async fn provision(backend: &dyn Backend, database: &DatabaseName) -> Result<()> {
    backend.drop_database_if_exists(database).await?;
    backend.create_database(database).await
}
