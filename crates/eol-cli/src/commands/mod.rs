pub mod check;
pub mod explore;
pub mod lookup;
pub mod probe;

use anyhow::{bail, Result};
use clap::Subcommand;
use eol_table::invariants::check_invariants;
use eol_table::ResultEntry;
use tracing::warn;

use crate::Cli;

#[derive(Subcommand)]
pub enum Commands {
    /// Probe every configuration and write the lookup table (the default)
    Probe,
    /// Run the earlier, smaller exploration probe
    Explore,
    /// Run the cross-checks on published tables
    Check(check::CheckArgs),
    /// Show what git does for one configuration
    Lookup(lookup::LookupArgs),
}

pub fn run(cli: Cli) -> Result<i32> {
    match &cli.command {
        None | Some(Commands::Probe) => probe::run(&cli),
        Some(Commands::Explore) => explore::run(&cli),
        Some(Commands::Check(args)) => check::run(args),
        Some(Commands::Lookup(args)) => lookup::run(args),
    }
}

/// Warn about every broken cross-check; with `strict` any of them is fatal.
pub(crate) fn report_violations(entries: &[ResultEntry], strict: bool) -> Result<()> {
    let violations = check_invariants(entries);
    for violation in &violations {
        warn!("{violation}");
    }
    if strict && !violations.is_empty() {
        bail!("{} cross-check violation(s) in the table", violations.len());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use eol_table::{ConfigurationTuple, CoreAutocrlf, CoreEol, Eol, LineEnding, Mapping, Text, Transition};
    use pretty_assertions::assert_eq;

    use super::*;

    fn entry(show: Transition) -> ResultEntry {
        let id = Transition::IDENTITY;
        ResultEntry {
            config: ConfigurationTuple::new(Text::Auto, Eol::Lf, CoreAutocrlf::True, CoreEol::Crlf),
            mapping: Mapping {
                clone: id,
                commit_new: id,
                commit_prepend_simple_text: id,
                commit_modify_simple_file: id,
                commit_modify_cr_lf_file: id,
                commit_modify_lf_file: id,
                commit_modify_mixed_file: id,
                unmodified: id,
                show,
            },
        }
    }

    const ALL_CRLF: Transition = Transition {
        lf: LineEnding::Crlf,
        crlf: LineEnding::Crlf,
        mixed: LineEnding::Crlf,
    };

    #[test]
    fn consistent_table_passes_strict() {
        assert!(report_violations(&[entry(Transition::IDENTITY)], true).is_ok());
    }

    #[test]
    fn violations_only_warn_by_default() {
        assert!(report_violations(&[entry(ALL_CRLF)], false).is_ok());
    }

    #[test]
    fn violations_are_fatal_when_strict() {
        let entries = [entry(ALL_CRLF), entry(Transition::IDENTITY), entry(ALL_CRLF)];

        let err = report_violations(&entries, true).unwrap_err();

        assert_eq!(err.to_string(), "2 cross-check violation(s) in the table");
    }
}
