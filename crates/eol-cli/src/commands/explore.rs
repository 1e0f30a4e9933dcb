use anyhow::{Context, Result};
use eol_probe::{run_exploration, GitOracle, ProbeOptions};
use eol_table::json::{to_json, write_json};
use eol_table::Axes;
use tracing::info;

use crate::Cli;

/// The exploration table has no cross-checks; `--strict` does not apply.
pub fn run(cli: &Cli) -> Result<i32> {
    let oracle = GitOracle::new(&cli.git);
    let options = ProbeOptions {
        workspace: cli.workspace.clone(),
        os: cli.os,
    };
    let configs = Axes::exploration().enumerate()?;

    let entries = run_exploration(&oracle, &options, &configs).context("exploration aborted")?;

    let output = cli
        .output
        .clone()
        .unwrap_or_else(|| cli.workspace.join("results.json"));
    write_json(&output, &entries)
        .with_context(|| format!("cannot write table to '{}'", output.display()))?;
    info!("wrote {} entries to {}", entries.len(), output.display());

    if let Some(first) = entries.first() {
        println!("{}", to_json(&first.mapping)?);
    }
    Ok(0)
}
