use super::Error;
use crate::{BackendKind, DatabaseName, WorkerId};

/// A drop or create step failed while provisioning a worker's namespace.
///
/// The backend failure itself is carried as the cause of the error chain.
#[derive(Debug)]
pub(super) struct ProvisioningError {
    worker_id: WorkerId,
    database: DatabaseName,
    backend: BackendKind,
    url: Box<str>,
}

impl Error {
    /// Creates a provisioning error. Attach the backend failure with
    /// [`Error::context`]:
    ///
    /// ```ignore
    /// cause.context(Error::provisioning(&worker, &database, backend.kind(), backend.url()))
    /// ```
    pub fn provisioning(
        worker_id: &WorkerId,
        database: &DatabaseName,
        backend: BackendKind,
        url: impl Into<String>,
    ) -> Error {
        Error::from(super::ErrorKind::Provisioning(ProvisioningError {
            worker_id: worker_id.clone(),
            database: database.clone(),
            backend,
            url: url.into().into(),
        }))
    }

    /// Returns `true` if this error is a provisioning failure.
    pub fn is_provisioning(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::Provisioning(_))
    }

    /// The kind of backend that failed, if this is a provisioning failure.
    pub fn provisioning_backend(&self) -> Option<BackendKind> {
        match self.kind() {
            super::ErrorKind::Provisioning(err) => Some(err.backend),
            _ => None,
        }
    }
}

impl core::fmt::Display for ProvisioningError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(
            f,
            "failed to provision `{}` for worker `{}` on {} ({})",
            self.database, self.worker_id, self.backend, self.url
        )
    }
}
