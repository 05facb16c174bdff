//! MongoDB creates databases implicitly on first write and never removes
//! them on its own, so worker namespaces are created with a marker collection
//! and dropped explicitly like on the relational backends.

use andamios_core::{
    async_trait,
    backend::{redact_url, Backend, BackendKind},
    DatabaseName, Error, Result,
};
use mongodb::Client;
use std::borrow::Cow;
use url::Url;

/// Collection created to materialize a worker database.
pub const MARKER_COLLECTION: &str = "_andamios";

#[derive(Debug)]
pub struct MongoDb {
    client: Client,

    /// Redacted connection URL
    url: String,
}

impl MongoDb {
    pub fn new(client: Client, url: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
        }
    }

    /// Creates a MongoDB backend from a `mongodb://` connection string.
    ///
    /// The driver selects a server lazily, so this does not fail when the
    /// server is down.
    pub async fn connect(url: &str) -> Result<Self> {
        let parsed = Url::parse(url).map_err(|err| {
            Error::invalid_connection_url(format!("{err}; url={url}"))
        })?;

        if parsed.scheme() != "mongodb" {
            return Err(Error::invalid_connection_url(format!(
                "connection URL does not have a `mongodb` scheme; url={}",
                redact_url(&parsed)
            )));
        }

        let client = Client::with_uri_str(url)
            .await
            .map_err(|err| {
                Error::backend(err).context(Error::invalid_connection_url(redact_url(&parsed)))
            })?;

        Ok(Self::new(client, redact_url(&parsed)))
    }
}

#[async_trait]
impl Backend for MongoDb {
    fn kind(&self) -> BackendKind {
        BackendKind::MongoDb
    }

    fn url(&self) -> Cow<'_, str> {
        Cow::Borrowed(&self.url)
    }

    async fn drop_database_if_exists(&self, name: &DatabaseName) -> Result<()> {
        tracing::debug!(backend = %self.url, database = %name, "dropping database");
        self.client
            .database(name.as_str())
            .drop()
            .await
            .map_err(Error::backend)
    }

    async fn create_database(&self, name: &DatabaseName) -> Result<()> {
        tracing::debug!(backend = %self.url, database = %name, "creating database");
        self.client
            .database(name.as_str())
            .create_collection(MARKER_COLLECTION)
            .await
            .map_err(Error::backend)
    }

    async fn list_databases(&self) -> Result<Vec<String>> {
        self.client
            .list_database_names()
            .await
            .map_err(Error::backend)
    }
}
