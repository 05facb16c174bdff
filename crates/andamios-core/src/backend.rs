mod kind;
pub use kind::BackendKind;

use crate::{async_trait, DatabaseName, Result};

use std::{borrow::Cow, fmt::Debug};
use url::Url;

/// A database server on which worker namespaces are provisioned.
///
/// Implementations open a connection per call, so an unreachable server
/// surfaces on the operation that needs it rather than at construction.
#[async_trait]
pub trait Backend: Debug + Send + Sync + 'static {
    /// The kind of server this backend talks to.
    fn kind(&self) -> BackendKind;

    /// Connection URL used for logs and error reports, password redacted.
    fn url(&self) -> Cow<'_, str>;

    /// Drops the database if it exists. Dropping a missing database succeeds.
    async fn drop_database_if_exists(&self, name: &DatabaseName) -> Result<()>;

    /// Creates the database. Fails if it already exists.
    async fn create_database(&self, name: &DatabaseName) -> Result<()>;

    /// Lists the names of all databases on the server.
    async fn list_databases(&self) -> Result<Vec<String>>;
}

/// Redact the password portion of a connection URL for safe display.
pub fn redact_url(url: &Url) -> String {
    let mut url = url.clone();
    if url.password().is_some() {
        let _ = url.set_password(Some("***"));
    }
    url.to_string()
}
