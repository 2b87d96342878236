//! `trajview runs`: list exported runs.

use trajview_core::api::{CliError, Loader};

use super::cli::{OutputFormat, RunsArgs};

/// Prints `runs.json` as pretty JSON or one tab-separated line per run.
pub async fn handle_runs(args: RunsArgs, loader: &Loader) -> Result<(), CliError> {
    let list = loader.runs().await?;
    match args.format {
        OutputFormat::Json => {
            let out = serde_json::to_string_pretty(&list)
                .map_err(|e| CliError::Command(format!("failed to encode runs: {e}")))?;
            println!("{out}");
        }
        OutputFormat::Text => {
            if list.runs.is_empty() {
                println!("No runs. Export trajectories first.");
            }
            for run in &list.runs {
                println!(
                    "{}\t{}\t{}",
                    run.id,
                    run.display_label(),
                    run.resolved_domain().unwrap_or("-")
                );
            }
        }
    }
    Ok(())
}
