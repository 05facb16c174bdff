use crate::Error;

#[derive(Debug)]
pub(super) struct UnsupportedBackend {
    pub(super) scheme: Box<str>,
}

impl Error {
    /// Creates an error for a connection URL scheme no compiled-in backend
    /// handles.
    pub fn unsupported_backend(scheme: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::UnsupportedBackend(UnsupportedBackend {
            scheme: scheme.into().into(),
        }))
    }

    pub fn is_unsupported_backend(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::UnsupportedBackend(_))
    }
}

impl std::fmt::Display for UnsupportedBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "unsupported backend `{}`; is the matching cargo feature enabled?",
            self.scheme
        )
    }
}
