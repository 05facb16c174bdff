use andamios_test_db::TestDatabaseManager;
use anyhow::Result;
use clap::Parser;
use console::style;
use dialoguer::{theme::ColorfulTheme, Confirm};

#[derive(Parser, Debug)]
pub(crate) struct SweepCommand {
    /// Do not ask for confirmation
    #[arg(short, long)]
    yes: bool,
}

impl SweepCommand {
    pub(crate) async fn run(self, manager: &TestDatabaseManager) -> Result<()> {
        let prefix = manager.namespace().prefix();

        if !self.yes {
            let confirmed = Confirm::with_theme(&ColorfulTheme::default())
                .with_prompt(format!(
                    "Drop every `{prefix}_*` database on {} backend(s)? Running test workers will lose theirs.",
                    manager.backends().len()
                ))
                .default(false)
                .interact()?;

            if !confirmed {
                eprintln!("  {}", style("Aborted.").dim());
                return Ok(());
            }
        }

        let report = match manager.sweep_orphans().await {
            Ok(report) => report,
            Err(err) => {
                super::print_failures(&err);
                return Err(err.into());
            }
        };

        for (backend, database) in report.dropped() {
            eprintln!(
                "  {} {}",
                style("✓").green().bold(),
                style(format!("Dropped {database} on {backend}")).dim()
            );
        }

        eprintln!(
            "  {} {}",
            style("").magenta(),
            style(format!("Swept {} database(s)", report.len()))
                .green()
                .bold()
        );
        Ok(())
    }
}
