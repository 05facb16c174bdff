use super::Error;

/// Error raised by a backend client library.
#[derive(Debug)]
pub(super) struct BackendError {
    pub(super) inner: Box<dyn std::error::Error + Send + Sync>,
}

impl std::error::Error for BackendError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(self.inner.as_ref())
    }
}

impl core::fmt::Display for BackendError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        // Display the error and walk its source chain
        core::fmt::Display::fmt(&self.inner, f)?;
        let mut source = self.inner.source();
        while let Some(err) = source {
            write!(f, ": {}", err)?;
            source = err.source();
        }
        Ok(())
    }
}

impl Error {
    /// Creates an error from a backend client error.
    ///
    /// This is the preferred way to convert client-specific errors (tokio-postgres,
    /// mysql_async, rusqlite, mongodb, I/O errors, etc.) into Andamios errors.
    pub fn backend(err: impl std::error::Error + Send + Sync + 'static) -> Error {
        Error::from(super::ErrorKind::Backend(BackendError {
            inner: Box::new(err),
        }))
    }

    /// Returns `true` if this error came from a backend client.
    pub fn is_backend(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::Backend(_))
    }
}
