use crate::WorkerDatabaseRecord;
use andamios_core::{DatabaseName, WorkerId};
use std::collections::HashMap;

/// Live worker namespaces of one manager, keyed by worker id.
#[derive(Debug, Default)]
pub(crate) struct ManagerState {
    records: HashMap<WorkerId, WorkerDatabaseRecord>,
}

impl ManagerState {
    pub(crate) fn insert(&mut self, record: WorkerDatabaseRecord) {
        debug_assert!(
            self.records.values().all(|existing| {
                existing.worker_id() == record.worker_id()
                    || existing.database_name() != record.database_name()
            }),
            "database name `{}` is already registered to another worker",
            record.database_name()
        );

        self.records.insert(record.worker_id().clone(), record);
    }

    pub(crate) fn remove(&mut self, worker_id: &str) -> Option<WorkerDatabaseRecord> {
        self.records.remove(worker_id)
    }

    pub(crate) fn get(&self, worker_id: &str) -> Option<&WorkerDatabaseRecord> {
        self.records.get(worker_id)
    }

    pub(crate) fn owns(&self, database: &DatabaseName) -> bool {
        self.records
            .values()
            .any(|record| record.database_name() == database)
    }

    pub(crate) fn records(&self) -> impl Iterator<Item = &WorkerDatabaseRecord> {
        self.records.values()
    }

    pub(crate) fn len(&self) -> usize {
        self.records.len()
    }
}
