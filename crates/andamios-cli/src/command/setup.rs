use andamios_test_db::{Config, TestDatabaseManager};
use anyhow::Result;
use clap::Parser;
use console::style;

#[derive(Parser, Debug)]
pub(crate) struct SetupCommand {
    /// Worker id (defaults to ANDAMIOS_TEST_WORKER, then the process id)
    #[arg(short, long)]
    worker: Option<String>,
}

impl SetupCommand {
    pub(crate) async fn run(self, manager: &TestDatabaseManager, config: &Config) -> Result<()> {
        let worker = super::worker_id(self.worker.as_deref(), config)?;
        let record = manager.setup_worker_databases(worker.as_str()).await?;

        for backend in manager.backends() {
            eprintln!(
                "  {} {}",
                style("✓").green().bold(),
                style(format!(
                    "Created {} on {}",
                    record.database_name(),
                    backend.url()
                ))
                .dim()
            );
        }

        // Printed alone on stdout so scripts can capture it
        println!("{}", record.database_name());
        Ok(())
    }
}
