use andamios_backend_mongodb::MongoDb;
use andamios_core::{backend::Backend, Result};
use std::sync::Arc;

use crate::Setup;

pub struct SetupMongoDb {
    url: String,
}

impl SetupMongoDb {
    pub fn new() -> Self {
        let url = std::env::var("ANDAMIOS_TEST_MONGODB_URL")
            .unwrap_or_else(|_| "mongodb://localhost:27017".to_string());

        Self { url }
    }
}

impl Default for SetupMongoDb {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl Setup for SetupMongoDb {
    async fn connect(&self) -> Result<Arc<dyn Backend>> {
        Ok(Arc::new(MongoDb::connect(&self.url).await?))
    }
}
