use crate::Error;

/// A worker id or namespace prefix that cannot be turned into a database
/// name.
#[derive(Debug)]
pub(super) struct InvalidWorkerId {
    pub(super) message: Box<str>,
}

impl Error {
    pub fn invalid_worker_id(message: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::InvalidWorkerId(InvalidWorkerId {
            message: message.into().into(),
        }))
    }

    pub fn is_invalid_worker_id(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::InvalidWorkerId(_))
    }
}

impl std::fmt::Display for InvalidWorkerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "invalid worker id: {}", self.message)
    }
}
