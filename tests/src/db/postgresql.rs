use andamios_backend_postgresql::PostgreSQL;
use andamios_core::{backend::Backend, Result};
use std::sync::Arc;

use crate::Setup;

pub struct SetupPostgreSQL {
    url: String,
}

impl SetupPostgreSQL {
    pub fn new() -> Self {
        let url = std::env::var("ANDAMIOS_TEST_POSTGRES_URL")
            .unwrap_or_else(|_| "postgresql://localhost:5432/postgres".to_string());

        Self { url }
    }
}

impl Default for SetupPostgreSQL {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl Setup for SetupPostgreSQL {
    async fn connect(&self) -> Result<Arc<dyn Backend>> {
        Ok(Arc::new(PostgreSQL::new(&self.url)?))
    }
}
