use andamios_test_db::TestDatabaseManager;
use anyhow::Result;
use clap::Parser;
use console::style;

#[derive(Parser, Debug)]
pub(crate) struct ListCommand {}

impl ListCommand {
    pub(crate) async fn run(self, manager: &TestDatabaseManager) -> Result<()> {
        let namespace = manager.namespace();
        let mut failed = 0;

        for backend in manager.backends() {
            println!("{} {}", style(backend.kind()).cyan().bold(), backend.url());

            match backend.list_databases().await {
                Ok(names) => {
                    let owned: Vec<_> = names.iter().filter(|n| namespace.owns(n)).collect();

                    if owned.is_empty() {
                        let none = format!("no `{}_*` databases", namespace.prefix());
                        println!("  {}", style(none).dim());
                    }

                    for name in owned {
                        println!("  {name}");
                    }
                }
                Err(err) => {
                    failed += 1;
                    println!("  {} {}", style("✖").red().bold(), style(err).red());
                }
            }
        }

        if failed > 0 {
            anyhow::bail!("{failed} backend(s) could not be listed");
        }

        Ok(())
    }
}
