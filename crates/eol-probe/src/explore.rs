//! The exploration probe: a smaller sibling of the full probe script.
//!
//! One golden repository holds `lf.txt`, `crlf.txt` and `lf-crlf.txt`. A probe
//! records the working tree after checkout, then rewrites those files, adds
//! `*-new.txt` counterparts and records what `git show` returns for each
//! after committing.

use std::path::Path;

use eol_table::{ConfigurationTuple, Eol, ExploreEntry, ExploreMapping, LineEnding, Text, Transition};
use tracing::info;

use crate::golden::{init_neutral, self_check};
use crate::oracle::Oracle;
use crate::probe::{fresh_content, ProbeOptions, Session};
use crate::Result;

fn file_stem(class: LineEnding) -> &'static str {
    match class {
        LineEnding::Lf => "lf",
        LineEnding::Crlf => "crlf",
        LineEnding::Mixed => "lf-crlf",
    }
}

fn authored_content(class: LineEnding) -> &'static str {
    match class {
        LineEnding::Lf => crate::golden::LF_CONTENT,
        LineEnding::Crlf => crate::golden::CRLF_CONTENT,
        LineEnding::Mixed => crate::golden::MIXED_CONTENT,
    }
}

/// Attribute line in the raw `text=<value>` spelling.
pub fn exploration_attributes(config: &ConfigurationTuple) -> String {
    let mut options = Vec::new();
    if config.text != Text::Undefined {
        options.push(format!("text={}", config.text));
    }
    if config.eol != Eol::Undefined {
        options.push(format!("eol={}", config.eol));
    }
    if options.is_empty() {
        String::new()
    } else {
        format!("*.txt {}", options.join(" "))
    }
}

/// Build the exploration golden repository for `attributes` at `path`.
pub fn build_exploration_golden<O: Oracle>(oracle: &O, path: &Path, attributes: &str) -> Result<()> {
    let repo = init_neutral(oracle, path, "*.txt binary\n")?;
    repo.commit_all("update")?;

    for class in LineEnding::ALL {
        repo.write_text(&format!("{}.txt", file_stem(class)), authored_content(class))?;
    }
    repo.commit_all("update")?;

    for class in LineEnding::ALL {
        let expected = eol_table::line_breaks(authored_content(class));
        self_check(&format!("{}.txt", file_stem(class)), &expected, |name| {
            repo.show_head(name)
        })?;
    }

    repo.write_text(".gitattributes", "")?;
    repo.commit_path(".gitattributes", "update")?;

    repo.write_text(".gitattributes", &format!("{attributes}\n"))?;
    repo.commit_path(".gitattributes", "update")?;
    Ok(())
}

impl<'o, O: Oracle> Session<'o, O> {
    /// Run the exploration script for `config`.
    pub fn explore(&mut self, config: &ConfigurationTuple) -> Result<ExploreMapping> {
        let attributes = exploration_attributes(config);
        let oracle = self.oracle;
        let source = self.explore_golden.ensure_with(&attributes, |path| {
            build_exploration_golden(oracle, path, &attributes)
        })?;
        let repo = self.checkout(&source, config)?;

        let checkout = Transition::try_from_fn(|class| {
            repo.observe_file(&format!("{}.txt", file_stem(class)))
        })?;

        for class in LineEnding::ALL {
            repo.write_text(&format!("{}.txt", file_stem(class)), fresh_content(class))?;
            repo.write_text(&format!("{}-new.txt", file_stem(class)), fresh_content(class))?;
        }
        repo.commit_all("update")?;

        Ok(ExploreMapping {
            checkout,
            checkin: Transition::try_from_fn(|class| {
                repo.observe_show(&format!("{}.txt", file_stem(class)))
            })?,
            checkin_new: Transition::try_from_fn(|class| {
                repo.observe_show(&format!("{}-new.txt", file_stem(class)))
            })?,
        })
    }
}

/// Run the exploration script for every configuration on an emptied
/// workspace.
pub fn run_exploration<O: Oracle>(
    oracle: &O,
    options: &ProbeOptions,
    configs: &[ConfigurationTuple],
) -> Result<Vec<ExploreEntry>> {
    let mut session = Session::fresh(oracle, &options.workspace)?;
    let mut entries = Vec::with_capacity(configs.len());
    for (i, config) in configs.iter().enumerate() {
        info!("exploring {}/{}: {}", i + 1, configs.len(), config);
        let mapping = session.explore(config)?;
        let mut config = *config;
        if let Some(os) = options.os {
            config.os = Some(os);
        }
        entries.push(ExploreEntry { config, mapping });
    }
    Ok(entries)
}
