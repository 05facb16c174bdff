mod command;

use andamios_test_db::{Config, TestDatabaseManager};
use anyhow::Result;
use clap::Parser;

/// Command-line front end for provisioning and purging worker databases
/// outside of a test process, e.g. from CI scripts.
pub struct AndamiosCli {
    config: Config,
}

impl AndamiosCli {
    /// Create a new AndamiosCli reading backends from the environment
    pub fn new() -> Self {
        Self::with_config(Config::from_env())
    }

    /// Create a new AndamiosCli instance with a custom configuration
    pub fn with_config(config: Config) -> Self {
        Self { config }
    }

    /// Get a reference to the configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Parse and execute CLI commands from command-line arguments
    pub async fn parse_and_run(&self) -> Result<()> {
        let cli = Cli::parse();
        self.run(cli).await
    }

    /// Parse and execute CLI commands from an iterator of arguments
    pub async fn parse_from<I, T>(&self, args: I) -> Result<()>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        let cli = Cli::try_parse_from(args)?;
        self.run(cli).await
    }

    async fn run(&self, cli: Cli) -> Result<()> {
        let config = cli.apply(self.config.clone());
        let manager = TestDatabaseManager::from_config(&config).await?;

        if manager.backends().is_empty() {
            anyhow::bail!(
                "no backends configured; set one of {} or pass --backend",
                andamios_test_db::config::BACKEND_URL_VARS.join(", ")
            );
        }

        cli.command.run(&manager, &config).await
    }
}

impl Default for AndamiosCli {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Parser, Debug)]
#[command(name = "andamios-test-db")]
#[command(about = "Provision and tear down per-worker test databases")]
#[command(version)]
struct Cli {
    /// Namespace prefix of worker databases (overrides ANDAMIOS_TEST_DB_PREFIX)
    #[arg(long, global = true)]
    prefix: Option<String>,

    /// Backend connection URL; repeat for several backends (overrides the
    /// ANDAMIOS_TEST_*_URL variables)
    #[arg(long = "backend", global = true)]
    backends: Vec<String>,

    #[command(subcommand)]
    command: command::Command,
}

impl Cli {
    fn apply(&self, mut config: Config) -> Config {
        if let Some(prefix) = &self.prefix {
            config.prefix = Some(prefix.clone());
        }

        if !self.backends.is_empty() {
            config.backend_urls = self.backends.clone();
        }

        config
    }
}
