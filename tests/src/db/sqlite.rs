use andamios_backend_sqlite::Sqlite;
use andamios_core::{backend::Backend, Result};
use std::sync::Arc;
use tempfile::TempDir;

use crate::Setup;

/// Worker databases live in a temporary directory that is removed with the
/// setup.
pub struct SetupSqlite {
    dir: TempDir,
}

impl SetupSqlite {
    pub fn new() -> Self {
        Self {
            dir: tempfile::tempdir().expect("failed to create temporary directory"),
        }
    }
}

impl Default for SetupSqlite {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl Setup for SetupSqlite {
    async fn connect(&self) -> Result<Arc<dyn Backend>> {
        Ok(Arc::new(Sqlite::open_dir(self.dir.path())))
    }
}
