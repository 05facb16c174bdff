//! Naming of per-worker databases.
//!
//! Every worker gets a database named `{prefix}_{worker_id}`. The name is a
//! pure function of the prefix and the worker id, so setup and cleanup in the
//! same test run always address the same database, and two distinct worker
//! ids never map to the same name.
//!
//! Names are spliced into DDL, so both halves are restricted to lowercase
//! ASCII letters, digits and `_`. Lowercase-only keeps names distinct on
//! servers that fold identifier case.

use crate::{Error, Result};
use std::{borrow::Borrow, fmt, str::FromStr};

/// Prefix used when none is configured.
pub const DEFAULT_PREFIX: &str = "andamios_test";

/// Longest database name accepted. PostgreSQL truncates identifiers past
/// 63 bytes and MySQL rejects names past 64.
pub const MAX_DATABASE_NAME_LEN: usize = 63;

/// Identifies one concurrent test worker.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WorkerId(Box<str>);

/// The database name derived for one worker.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DatabaseName(Box<str>);

/// The fixed prefix all worker databases of a test run share.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Namespace {
    prefix: Box<str>,
}

impl WorkerId {
    pub fn new(id: impl Into<String>) -> Result<WorkerId> {
        let id = id.into();

        if id.is_empty() {
            return Err(Error::invalid_worker_id("worker id must not be empty"));
        }

        if let Some(c) = id.chars().find(|c| !is_name_char(*c)) {
            return Err(Error::invalid_worker_id(format!(
                "unexpected character {c:?} in `{id}`; only `a-z`, `0-9` and `_` are allowed"
            )));
        }

        Ok(WorkerId(id.into()))
    }

    /// A worker id derived from the OS process id, for runners that do not
    /// assign worker ids themselves.
    pub fn from_process() -> WorkerId {
        WorkerId(format!("p{}", std::process::id()).into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for WorkerId {
    type Err = Error;

    fn from_str(s: &str) -> Result<WorkerId> {
        WorkerId::new(s)
    }
}

impl Borrow<str> for WorkerId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for WorkerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl DatabaseName {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for DatabaseName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DatabaseName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Namespace {
    pub fn new(prefix: impl Into<String>) -> Result<Namespace> {
        let prefix = prefix.into();

        if !prefix.starts_with(|c: char| c.is_ascii_lowercase()) {
            return Err(Error::invalid_worker_id(format!(
                "namespace prefix `{prefix}` must start with a lowercase letter"
            )));
        }

        if !prefix.chars().all(is_name_char) {
            return Err(Error::invalid_worker_id(format!(
                "namespace prefix `{prefix}` may only contain `a-z`, `0-9` and `_`"
            )));
        }

        // Leave room for `_` and at least one worker id character.
        if prefix.len() + 2 > MAX_DATABASE_NAME_LEN {
            return Err(Error::invalid_worker_id(format!(
                "namespace prefix `{prefix}` is too long"
            )));
        }

        Ok(Namespace {
            prefix: prefix.into(),
        })
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Derives the database name for a worker.
    pub fn database_name(&self, worker: &WorkerId) -> Result<DatabaseName> {
        let name = format!("{}_{}", self.prefix, worker);

        if name.len() > MAX_DATABASE_NAME_LEN {
            return Err(Error::invalid_worker_id(format!(
                "database name `{name}` exceeds {MAX_DATABASE_NAME_LEN} bytes"
            )));
        }

        Ok(DatabaseName(name.into()))
    }

    /// Parses a database name found on a server, returning it only if it was
    /// derived from this namespace.
    pub fn parse_database_name(&self, name: &str) -> Option<DatabaseName> {
        self.owns(name).then(|| DatabaseName(name.into()))
    }

    /// Check if a database name belongs to this namespace.
    pub fn owns(&self, name: &str) -> bool {
        name.strip_prefix(&*self.prefix)
            .and_then(|rest| rest.strip_prefix('_'))
            .is_some_and(|worker| {
                !worker.is_empty()
                    && worker.chars().all(is_name_char)
                    && name.len() <= MAX_DATABASE_NAME_LEN
            })
    }
}

impl Default for Namespace {
    fn default() -> Namespace {
        Namespace {
            prefix: DEFAULT_PREFIX.into(),
        }
    }
}

fn is_name_char(c: char) -> bool {
    c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_'
}
