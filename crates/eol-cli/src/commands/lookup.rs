use std::io::{self, Write};
use std::path::PathBuf;
use std::str::FromStr;

use anyhow::{Context, Result};
use clap::Args;
use eol_table::json::read_json;
use eol_table::{Axis, Os, ResultEntry, Selection, SelectionState, Table};
use tracing::debug;

/// `<os>=<file>`: a published table and the platform it was produced on.
#[derive(Debug, Clone)]
pub struct TableSource {
    os: Os,
    path: PathBuf,
}

impl FromStr for TableSource {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (os, path) = s
            .split_once('=')
            .ok_or_else(|| format!("expected <os>=<file>, got '{s}'"))?;
        Ok(Self {
            os: os.parse().map_err(|e| format!("{e}"))?,
            path: PathBuf::from(path),
        })
    }
}

/// `<axis>=<value>`. The value is validated when it is applied.
#[derive(Debug, Clone)]
pub struct Assignment {
    axis: Axis,
    value: String,
}

impl FromStr for Assignment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (axis, value) = s
            .split_once('=')
            .ok_or_else(|| format!("expected <axis>=<value>, got '{s}'"))?;
        Ok(Self {
            axis: axis.parse().map_err(|e| format!("{e}"))?,
            value: value.to_string(),
        })
    }
}

#[derive(Args)]
pub struct LookupArgs {
    /// A published table, as <os>=<file>; repeat for each platform
    #[arg(long = "table", value_name = "OS=FILE", required = true)]
    tables: Vec<TableSource>,

    /// Start from a saved selection such as `os=windows&text=auto`
    #[arg(long)]
    query: Option<String>,

    /// Change one axis, as <axis>=<value>; applied in order
    #[arg(long = "set", value_name = "AXIS=VALUE")]
    sets: Vec<Assignment>,
}

pub fn run(args: &LookupArgs) -> Result<i32> {
    let mut sources = Vec::with_capacity(args.tables.len());
    for source in &args.tables {
        let entries: Vec<ResultEntry> = read_json(&source.path)
            .with_context(|| format!("cannot load table '{}'", source.path.display()))?;
        sources.push((source.os, entries));
    }
    let table = Table::merge(sources);

    let initial = match &args.query {
        Some(query) => Selection::from_query(query)?,
        None => Selection::default(),
    };
    let mut state = SelectionState::new(initial);
    state.subscribe(|selection| debug!("selection is now ?{}", selection.to_query()));
    for assignment in &args.sets {
        state
            .set(assignment.axis, &assignment.value)
            .with_context(|| format!("cannot set {}", assignment.axis))?;
    }

    let stdout = io::stdout();
    let mut out = stdout.lock();
    render(&mut out, &table, state.selection())
}

/// Print the selection, what to configure for it and its mapping.
/// Returns 1 when the table has no entry for the selection.
fn render(out: &mut impl Write, table: &Table, selection: &Selection) -> Result<i32> {
    writeln!(out, "query: ?{}", selection.to_query())?;

    writeln!(out, ".gitattributes:")?;
    let attributes = selection.gitattributes_content();
    if attributes.is_empty() {
        writeln!(out, "    (empty)")?;
    } else {
        writeln!(out, "    {attributes}")?;
    }

    writeln!(out, "git config:")?;
    for line in selection.git_config_commands().lines() {
        writeln!(out, "    {line}")?;
    }

    let relevant: Vec<&str> = Axis::ALL
        .into_iter()
        .filter(|&axis| table.axis_matters(axis, selection))
        .map(Axis::name)
        .collect();
    if relevant.is_empty() {
        writeln!(out, "relevant axes: none")?;
    } else {
        writeln!(out, "relevant axes: {}", relevant.join(", "))?;
    }

    let Some(entry) = table.selected(selection) else {
        writeln!(out, "no entry for {}", selection.config())?;
        return Ok(1);
    };

    writeln!(out, "{:<26}{:<7}{:<7}mixed", "step", "lf", "crlf")?;
    for (step, transition) in entry.mapping.steps() {
        writeln!(
            out,
            "{:<26}{:<7}{:<7}{}",
            step.name(),
            transition.lf.as_str(),
            transition.crlf.as_str(),
            transition.mixed.as_str()
        )?;
    }
    Ok(0)
}
