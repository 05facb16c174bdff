use std::fmt;

/// The kind of database server behind a [`Backend`](super::Backend).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum BackendKind {
    PostgreSQL,
    MySQL,
    Sqlite,
    MongoDb,
    /// In-process backend used by tests.
    Memory,
}

impl BackendKind {
    /// Maps a connection URL scheme to a backend kind.
    pub fn from_scheme(scheme: &str) -> Option<BackendKind> {
        match scheme {
            "postgresql" | "postgres" => Some(BackendKind::PostgreSQL),
            "mysql" => Some(BackendKind::MySQL),
            "sqlite" => Some(BackendKind::Sqlite),
            "mongodb" => Some(BackendKind::MongoDb),
            "memory" => Some(BackendKind::Memory),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            BackendKind::PostgreSQL => "postgresql",
            BackendKind::MySQL => "mysql",
            BackendKind::Sqlite => "sqlite",
            BackendKind::MongoDb => "mongodb",
            BackendKind::Memory => "memory",
        }
    }
}

impl fmt::Display for BackendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
