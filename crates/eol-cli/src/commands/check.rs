use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use eol_table::invariants::check_invariants;
use eol_table::Table;

#[derive(Args)]
pub struct CheckArgs {
    /// Tables written by a probe run
    #[arg(required = true, value_name = "TABLE")]
    tables: Vec<PathBuf>,
}

/// Print every violation; exit 1 if there was any.
pub fn run(args: &CheckArgs) -> Result<i32> {
    let mut violations = 0;
    for path in &args.tables {
        let table =
            Table::read(path).with_context(|| format!("cannot load table '{}'", path.display()))?;
        for violation in check_invariants(table.entries()) {
            println!("{}: {}", path.display(), violation);
            violations += 1;
        }
    }

    if violations > 0 {
        return Ok(1);
    }
    println!("{} table(s) consistent", args.tables.len());
    Ok(0)
}
