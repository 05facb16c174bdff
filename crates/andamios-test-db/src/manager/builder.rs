use super::TestDatabaseManager;
use crate::ManagerState;
use andamios_core::{backend::Backend, Namespace, Result};

use std::sync::{Arc, Mutex};

#[derive(Debug, Default)]
pub struct Builder {
    /// Validated namespace; takes precedence over `prefix`
    namespace: Option<Namespace>,

    /// Raw prefix, validated on `build`
    prefix: Option<String>,

    /// Backends, in provisioning order
    backends: Vec<Arc<dyn Backend>>,
}

impl Builder {
    /// Set the prefix of every worker database name
    pub fn prefix(&mut self, prefix: impl Into<String>) -> &mut Self {
        self.namespace = None;
        self.prefix = Some(prefix.into());
        self
    }

    pub fn namespace(&mut self, namespace: Namespace) -> &mut Self {
        self.prefix = None;
        self.namespace = Some(namespace);
        self
    }

    /// Add a backend to provision worker databases on
    pub fn backend(&mut self, backend: impl Backend) -> &mut Self {
        self.backends.push(Arc::new(backend));
        self
    }

    /// Add a backend that is also used elsewhere
    pub fn shared_backend(&mut self, backend: Arc<dyn Backend>) -> &mut Self {
        self.backends.push(backend);
        self
    }

    pub fn build(&mut self) -> Result<TestDatabaseManager> {
        let namespace = match (self.namespace.take(), self.prefix.take()) {
            (Some(namespace), _) => namespace,
            (None, Some(prefix)) => Namespace::new(prefix)?,
            (None, None) => Namespace::default(),
        };

        Ok(TestDatabaseManager {
            namespace,
            backends: std::mem::take(&mut self.backends),
            state: Mutex::new(ManagerState::default()),
        })
    }
}
