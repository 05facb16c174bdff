use andamios_backend_mysql::MySQL;
use andamios_core::{backend::Backend, Result};
use std::sync::Arc;

use crate::Setup;

pub struct SetupMySQL {
    url: String,
}

impl SetupMySQL {
    pub fn new() -> Self {
        let url = std::env::var("ANDAMIOS_TEST_MYSQL_URL")
            .unwrap_or_else(|_| "mysql://root@localhost:3306/mysql".to_string());

        Self { url }
    }
}

impl Default for SetupMySQL {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl Setup for SetupMySQL {
    async fn connect(&self) -> Result<Arc<dyn Backend>> {
        // The pool is bound to the runtime that first uses it, so every test
        // builds its own.
        Ok(Arc::new(MySQL::new(self.url.as_str())?))
    }
}
