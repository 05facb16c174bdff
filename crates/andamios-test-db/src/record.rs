use andamios_core::{DatabaseName, WorkerId};

/// One worker's private database namespace.
///
/// Records are never mutated; a worker that is provisioned again gets a new
/// record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkerDatabaseRecord {
    worker_id: WorkerId,
    database_name: DatabaseName,
}

impl WorkerDatabaseRecord {
    pub(crate) fn new(worker_id: WorkerId, database_name: DatabaseName) -> Self {
        Self {
            worker_id,
            database_name,
        }
    }

    pub fn worker_id(&self) -> &WorkerId {
        &self.worker_id
    }

    pub fn database_name(&self) -> &DatabaseName {
        &self.database_name
    }
}
