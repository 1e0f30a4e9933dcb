use anyhow::{Context, Result};
use eol_probe::{run_probes, GitOracle, ProbeOptions};
use eol_table::json::{to_json, write_json};
use eol_table::Axes;
use tracing::info;

use super::report_violations;
use crate::Cli;

pub fn run(cli: &Cli) -> Result<i32> {
    let oracle = GitOracle::new(&cli.git);
    let options = ProbeOptions {
        workspace: cli.workspace.clone(),
        os: cli.os,
    };
    let configs = Axes::probe().enumerate()?;

    let entries = run_probes(&oracle, &options, &configs).context("probe run aborted")?;

    let output = cli
        .output
        .clone()
        .unwrap_or_else(|| cli.workspace.join("data.json"));
    write_json(&output, &entries)
        .with_context(|| format!("cannot write table to '{}'", output.display()))?;
    info!("wrote {} entries to {}", entries.len(), output.display());

    if let Some(first) = entries.first() {
        println!("{}", to_json(&first.mapping)?);
    }

    report_violations(&entries, cli.strict)?;
    Ok(0)
}
