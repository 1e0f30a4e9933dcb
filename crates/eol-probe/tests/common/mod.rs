//! Shared harness for eol-probe integration tests.
//!
//! Every test drives the real `git` found on PATH. The environment is pinned
//! so no system or user configuration leaks into the probes.

#![allow(dead_code)]

use std::path::Path;

use eol_probe::GitOracle;
use eol_table::{ConfigurationTuple, CoreAutocrlf, CoreEol, Eol, LineEnding, Text, Transition};
use tempfile::TempDir;

// ──────────────────────────── Oracle ────────────────────────────

/// A git oracle isolated from the machine's configuration.
pub fn oracle(home: &Path) -> GitOracle {
    GitOracle::default()
        .env("GIT_CONFIG_NOSYSTEM", "1")
        .env("GIT_CONFIG_GLOBAL", home.join(".gitconfig"))
        .env("HOME", home)
        .env("GIT_CEILING_DIRECTORIES", home)
        .env("TZ", "UTC")
        .env("LC_ALL", "C")
        .env("LANG", "C")
}

/// A temporary directory holding a fake home and a workspace.
pub struct Sandbox {
    pub dir: TempDir,
    pub oracle: GitOracle,
}

impl Sandbox {
    pub fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        let oracle = oracle(dir.path());
        Self { dir, oracle }
    }

    pub fn workspace(&self) -> std::path::PathBuf {
        self.dir.path().join("git-workspace")
    }
}

// ──────────────────────────── Fixtures ────────────────────────────

pub fn config(
    text: Text,
    eol: Eol,
    core_autocrlf: CoreAutocrlf,
    core_eol: CoreEol,
) -> ConfigurationTuple {
    ConfigurationTuple::new(text, eol, core_autocrlf, core_eol)
}

pub const ALL_LF: Transition = Transition {
    lf: LineEnding::Lf,
    crlf: LineEnding::Lf,
    mixed: LineEnding::Lf,
};

/// Names of the entries directly under `dir` starting with `prefix`.
pub fn entries_with_prefix(dir: &Path, prefix: &str) -> Vec<String> {
    let mut names: Vec<String> = std::fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .filter(|name| name.starts_with(prefix))
        .collect();
    names.sort();
    names
}
