use andamios_test_db::{Config, TestDatabaseManager};
use anyhow::Result;
use clap::Parser;
use console::style;

#[derive(Parser, Debug)]
pub(crate) struct CleanupCommand {
    /// Worker id (defaults to ANDAMIOS_TEST_WORKER, then the process id)
    #[arg(short, long)]
    worker: Option<String>,
}

impl CleanupCommand {
    pub(crate) async fn run(self, manager: &TestDatabaseManager, config: &Config) -> Result<()> {
        let worker = super::worker_id(self.worker.as_deref(), config)?;
        let database = manager.namespace().database_name(&worker)?;

        // This process never ran setup, so drop by name rather than by record.
        if let Err(err) = manager.purge_worker_databases(worker.as_str()).await {
            super::print_failures(&err);
            return Err(err.into());
        }

        eprintln!(
            "  {} {}",
            style("✓").green().bold(),
            style(format!(
                "Dropped {database} on {} backend(s)",
                manager.backends().len()
            ))
            .dim()
        );
        Ok(())
    }
}
