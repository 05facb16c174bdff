mod cleanup;
mod list;
mod setup;
mod sweep;

pub(crate) use cleanup::CleanupCommand;
pub(crate) use list::ListCommand;
pub(crate) use setup::SetupCommand;
pub(crate) use sweep::SweepCommand;

use andamios_test_db::{Config, TestDatabaseManager};
use anyhow::Result;
use clap::Subcommand;
use console::style;

#[derive(Subcommand, Debug)]
pub(crate) enum Command {
    /// Provision a worker's databases on every backend
    Setup(SetupCommand),

    /// Drop a worker's databases on every backend
    Cleanup(CleanupCommand),

    /// Drop every database carrying the namespace prefix
    Sweep(SweepCommand),

    /// Show configured backends and the prefixed databases on each
    List(ListCommand),
}

impl Command {
    pub(crate) async fn run(self, manager: &TestDatabaseManager, config: &Config) -> Result<()> {
        match self {
            Command::Setup(cmd) => cmd.run(manager, config).await,
            Command::Cleanup(cmd) => cmd.run(manager, config).await,
            Command::Sweep(cmd) => cmd.run(manager).await,
            Command::List(cmd) => cmd.run(manager).await,
        }
    }
}

/// Resolves the worker from `--worker`, falling back to the configuration.
fn worker_id(arg: Option<&str>, config: &Config) -> Result<andamios_test_db::WorkerId> {
    Ok(match arg {
        Some(worker) => worker.parse()?,
        None => config.worker_id()?,
    })
}

fn print_failures(err: &andamios_test_db::Error) {
    let Some(failures) = err.cleanup_failures() else {
        return;
    };

    for failure in failures {
        eprintln!(
            "  {} {}",
            style("✖").red().bold(),
            style(format!(
                "{} on {} ({}): {}",
                failure.database(),
                failure.backend(),
                failure.url(),
                failure.error()
            ))
            .red()
        );
    }
}
