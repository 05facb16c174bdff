use super::Error;
use crate::BackendKind;

/// One or more backends failed to drop a namespace.
#[derive(Debug)]
pub(super) struct AggregatedCleanupError {
    failures: Box<[CleanupFailure]>,
}

/// A single failed drop, as reported by [`Error::cleanup_failures`].
#[derive(Debug, Clone)]
pub struct CleanupFailure {
    backend: BackendKind,
    url: Box<str>,
    database: Box<str>,
    error: Error,
}

impl CleanupFailure {
    pub fn new(
        backend: BackendKind,
        url: impl Into<String>,
        database: impl Into<String>,
        error: Error,
    ) -> CleanupFailure {
        CleanupFailure {
            backend,
            url: url.into().into(),
            database: database.into().into(),
            error,
        }
    }

    pub fn backend(&self) -> BackendKind {
        self.backend
    }

    /// Connection URL of the backend, password redacted.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Name of the database that may have leaked.
    pub fn database(&self) -> &str {
        &self.database
    }

    pub fn error(&self) -> &Error {
        &self.error
    }
}

impl Error {
    /// Creates an error reporting every failed drop of a cleanup pass.
    pub fn aggregated_cleanup(failures: Vec<CleanupFailure>) -> Error {
        Error::from(super::ErrorKind::AggregatedCleanup(AggregatedCleanupError {
            failures: failures.into_boxed_slice(),
        }))
    }

    /// Returns `true` if this error aggregates cleanup failures.
    pub fn is_aggregated_cleanup(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::AggregatedCleanup(_))
    }

    /// The individual drop failures, if this is an aggregated cleanup error.
    pub fn cleanup_failures(&self) -> Option<&[CleanupFailure]> {
        match self.kind() {
            super::ErrorKind::AggregatedCleanup(err) => Some(&err.failures),
            _ => None,
        }
    }
}

impl core::fmt::Display for AggregatedCleanupError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "failed to drop {} database(s): ", self.failures.len())?;

        for (i, failure) in self.failures.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(
                f,
                "`{}` on {} ({}): {}",
                failure.database, failure.backend, failure.url, failure.error
            )?;
        }

        Ok(())
    }
}
