//! An in-process backend for tests.
//!
//! [`MemoryBackend`] keeps its databases in a shared set, records every
//! statement that reaches it, and can be told to fail. Clones share state, so
//! a test can hand one clone to a manager and inspect another.

use andamios_core::{
    async_trait,
    backend::{Backend, BackendKind},
    err, DatabaseName, Error, Result,
};
use std::{
    borrow::Cow,
    collections::BTreeSet,
    io,
    sync::{Arc, Mutex, MutexGuard, PoisonError},
};

#[derive(Debug, Clone, Default)]
pub struct MemoryBackend {
    name: Arc<str>,
    inner: Arc<Mutex<Inner>>,
}

#[derive(Debug, Default)]
struct Inner {
    databases: BTreeSet<String>,
    log: Vec<Statement>,
    unreachable: bool,
    fail_creates: bool,
    fail_drops: bool,
}

/// A statement that reached a [`MemoryBackend`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Statement {
    DropDatabaseIfExists(String),
    CreateDatabase(String),
    ListDatabases,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// A backend whose URL is `memory://{name}`.
    pub fn named(name: impl AsRef<str>) -> Self {
        Self {
            name: name.as_ref().into(),
            ..Self::default()
        }
    }

    /// Makes every following operation fail as if the server were down.
    pub fn set_unreachable(&self, unreachable: bool) {
        self.lock().unreachable = unreachable;
    }

    /// Makes `CREATE DATABASE` fail.
    pub fn fail_creates(&self, fail: bool) {
        self.lock().fail_creates = fail;
    }

    /// Makes `DROP DATABASE` fail.
    pub fn fail_drops(&self, fail: bool) {
        self.lock().fail_drops = fail;
    }

    /// Adds a database without logging a statement, e.g. to simulate one
    /// leaked by an earlier run.
    pub fn insert_database(&self, name: impl Into<String>) {
        self.lock().databases.insert(name.into());
    }

    pub fn contains(&self, name: &str) -> bool {
        self.lock().databases.contains(name)
    }

    /// Names of all databases, sorted.
    pub fn databases(&self) -> Vec<String> {
        self.lock().databases.iter().cloned().collect()
    }

    /// Statements executed so far, oldest first.
    pub fn statements(&self) -> Vec<Statement> {
        self.lock().log.clone()
    }

    /// Returns the statements executed so far and clears the log.
    pub fn take_statements(&self) -> Vec<Statement> {
        std::mem::take(&mut self.lock().log)
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Yields once so concurrent callers interleave like they would on a
    /// real connection, then runs `f` against the server state.
    async fn exec<T>(
        &self,
        statement: Statement,
        f: impl FnOnce(&mut Inner) -> Result<T>,
    ) -> Result<T> {
        tokio::task::yield_now().await;

        let mut inner = self.lock();
        if inner.unreachable {
            return Err(Error::backend(io::Error::new(
                io::ErrorKind::ConnectionRefused,
                format!("memory://{} is unreachable", self.name),
            )));
        }

        inner.log.push(statement);
        f(&mut inner)
    }
}

#[async_trait]
impl Backend for MemoryBackend {
    fn kind(&self) -> BackendKind {
        BackendKind::Memory
    }

    fn url(&self) -> Cow<'_, str> {
        Cow::Owned(format!("memory://{}", self.name))
    }

    async fn drop_database_if_exists(&self, name: &DatabaseName) -> Result<()> {
        let statement = Statement::DropDatabaseIfExists(name.to_string());

        self.exec(statement, |inner| {
            if inner.fail_drops {
                return Err(err!("cannot drop database `{name}`"));
            }
            inner.databases.remove(name.as_str());
            Ok(())
        })
        .await
    }

    async fn create_database(&self, name: &DatabaseName) -> Result<()> {
        let statement = Statement::CreateDatabase(name.to_string());

        self.exec(statement, |inner| {
            if inner.fail_creates {
                return Err(err!("cannot create database `{name}`"));
            }
            if !inner.databases.insert(name.to_string()) {
                return Err(err!("database `{name}` already exists"));
            }
            Ok(())
        })
        .await
    }

    async fn list_databases(&self) -> Result<Vec<String>> {
        self.exec(Statement::ListDatabases, |inner| {
            Ok(inner.databases.iter().cloned().collect())
        })
        .await
    }
}
