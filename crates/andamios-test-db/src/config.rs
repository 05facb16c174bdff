use andamios_core::{namespace::DEFAULT_PREFIX, Namespace, Result, WorkerId};

/// Environment variable holding the namespace prefix.
pub const PREFIX_VAR: &str = "ANDAMIOS_TEST_DB_PREFIX";

/// Environment variable holding the current process's worker id.
pub const WORKER_VAR: &str = "ANDAMIOS_TEST_WORKER";

/// Backend URL variables, in the order backends are configured.
pub const BACKEND_URL_VARS: [&str; 4] = [
    "ANDAMIOS_TEST_POSTGRES_URL",
    "ANDAMIOS_TEST_MYSQL_URL",
    "ANDAMIOS_TEST_SQLITE_URL",
    "ANDAMIOS_TEST_MONGODB_URL",
];

/// Configuration for a test database manager
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Config {
    /// Namespace prefix; `andamios_test` when unset
    pub prefix: Option<String>,

    /// Connection URL of every backend to provision on, in order
    pub backend_urls: Vec<String>,

    /// Worker id of the current process; derived from the process id when unset
    pub worker: Option<String>,
}

impl Config {
    /// Create a new Config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads the configuration from the process environment.
    pub fn from_env() -> Self {
        Self::from_vars(std::env::vars())
    }

    /// Reads the configuration from an explicit list of variables. Empty
    /// values count as unset.
    pub fn from_vars<I, K, V>(vars: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut config = Config::default();
        let mut urls: [Option<String>; BACKEND_URL_VARS.len()] = Default::default();

        for (key, value) in vars {
            let value = value.into();
            if value.trim().is_empty() {
                continue;
            }

            let key = key.as_ref();
            if key == PREFIX_VAR {
                config.prefix = Some(value);
            } else if key == WORKER_VAR {
                config.worker = Some(value);
            } else if let Some(i) = BACKEND_URL_VARS.iter().position(|var| *var == key) {
                urls[i] = Some(value);
            }
        }

        config.backend_urls = urls.into_iter().flatten().collect();
        config
    }

    /// Set the namespace prefix
    pub fn prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = Some(prefix.into());
        self
    }

    /// Add a backend connection URL
    pub fn backend_url(mut self, url: impl Into<String>) -> Self {
        self.backend_urls.push(url.into());
        self
    }

    /// Set the worker id of the current process
    pub fn worker(mut self, worker: impl Into<String>) -> Self {
        self.worker = Some(worker.into());
        self
    }

    pub fn namespace(&self) -> Result<Namespace> {
        Namespace::new(self.prefix.as_deref().unwrap_or(DEFAULT_PREFIX))
    }

    pub fn worker_id(&self) -> Result<WorkerId> {
        match &self.worker {
            Some(worker) => WorkerId::new(worker.as_str()),
            None => Ok(WorkerId::from_process()),
        }
    }
}
