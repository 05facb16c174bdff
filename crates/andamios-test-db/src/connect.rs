use crate::memory::MemoryBackend;
use andamios_core::{backend::Backend, BackendKind, Error, Result};
use std::sync::Arc;

/// Creates a backend for a connection URL, dispatching on its scheme.
///
/// Only backends whose cargo feature is enabled are available; `memory://`
/// is always available.
pub async fn connect(url: &str) -> Result<Arc<dyn Backend>> {
    let Some((scheme, rest)) = url.split_once(':') else {
        return Err(Error::invalid_connection_url(format!(
            "missing scheme in connection URL; url={url}"
        )));
    };

    let Some(kind) = BackendKind::from_scheme(scheme) else {
        return Err(Error::unsupported_backend(scheme));
    };

    match kind {
        BackendKind::Memory => Ok(Arc::new(MemoryBackend::named(
            rest.trim_start_matches('/'),
        ))),
        #[cfg(feature = "postgresql")]
        BackendKind::PostgreSQL => Ok(Arc::new(
            andamios_backend_postgresql::PostgreSQL::new(url)?,
        )),
        #[cfg(feature = "mysql")]
        BackendKind::MySQL => Ok(Arc::new(andamios_backend_mysql::MySQL::new(url)?)),
        #[cfg(feature = "sqlite")]
        BackendKind::Sqlite => Ok(Arc::new(andamios_backend_sqlite::Sqlite::new(url)?)),
        #[cfg(feature = "mongodb")]
        BackendKind::MongoDb => Ok(Arc::new(
            andamios_backend_mongodb::MongoDb::connect(url).await?,
        )),
        // Reached only when the backend's feature is disabled
        #[allow(unreachable_patterns)]
        _ => Err(Error::unsupported_backend(scheme)),
    }
}
