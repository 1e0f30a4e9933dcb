//! A repository directory paired with the oracle that operates on it.

use std::path::{Path, PathBuf};

use eol_table::{ConfigurationTuple, CoreAutocrlf, CoreEol, LineEnding};
use eol_utils::fs;

use crate::oracle::Oracle;
use crate::{ProbeError, Result};

pub struct Repo<'o, O: Oracle> {
    oracle: &'o O,
    path: PathBuf,
}

impl<'o, O: Oracle> Repo<'o, O> {
    pub fn new(oracle: &'o O, path: impl Into<PathBuf>) -> Self {
        Self {
            oracle,
            path: path.into(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn file(&self, name: &str) -> PathBuf {
        self.path.join(name)
    }

    pub fn git(&self, args: &[&str]) -> Result<Vec<u8>> {
        self.oracle.git(&self.path, args)
    }

    pub fn read_text(&self, name: &str) -> Result<String> {
        Ok(fs::read_text(self.file(name))?)
    }

    pub fn write_text(&self, name: &str, content: &str) -> Result<()> {
        Ok(fs::write_text(self.file(name), content)?)
    }

    pub fn prepend_text(&self, name: &str, text: &str) -> Result<()> {
        Ok(fs::prepend_text(self.file(name), text)?)
    }

    /// Raw committed bytes of `name` at HEAD, untouched by any filter.
    pub fn cat_file_blob(&self, name: &str) -> Result<Vec<u8>> {
        self.git(&["cat-file", "blob", &format!("HEAD:{name}")])
    }

    /// `name` at HEAD as printed by `git show`.
    pub fn show_head(&self, name: &str) -> Result<Vec<u8>> {
        self.git(&["show", &format!("HEAD:{name}")])
    }

    /// Keep automation from blocking on a signing prompt.
    pub fn disable_signing(&self) -> Result<()> {
        self.git(&["config", "commit.gpgsign", "false"])?;
        Ok(())
    }

    /// Set `core.autocrlf` then `core.eol`.
    pub fn configure(&self, autocrlf: CoreAutocrlf, core_eol: CoreEol) -> Result<()> {
        self.git(&["config", "core.autocrlf", autocrlf.as_str()])?;
        self.git(&["config", "core.eol", core_eol.as_str()])?;
        Ok(())
    }

    /// Apply the local settings of `config`.
    pub fn apply_settings(&self, config: &ConfigurationTuple) -> Result<()> {
        for args in config.git_config_args() {
            self.git(&args)?;
        }
        Ok(())
    }

    /// Stage everything matching `*` and commit it.
    pub fn commit_all(&self, message: &str) -> Result<()> {
        self.git(&["add", "*"])?;
        self.git(&["commit", "-m", message])?;
        Ok(())
    }

    /// Stage a single path and commit it.
    pub fn commit_path(&self, name: &str, message: &str) -> Result<()> {
        self.git(&["add", name])?;
        self.git(&["commit", "-m", message])?;
        Ok(())
    }

    /// Classify the committed blob of `name`.
    pub fn observe_blob(&self, name: &str) -> Result<LineEnding> {
        let content = self.cat_file_blob(name)?;
        self.classified(&content, || format!("blob HEAD:{name}"))
    }

    /// Classify `name` as `git show` prints it.
    pub fn observe_show(&self, name: &str) -> Result<LineEnding> {
        let content = self.show_head(name)?;
        self.classified(&content, || format!("show HEAD:{name}"))
    }

    /// Classify the working-tree file `name`.
    pub fn observe_file(&self, name: &str) -> Result<LineEnding> {
        let content = self.read_text(name)?;
        self.classified(content.as_bytes(), || format!("working-tree file {name}"))
    }

    fn classified(&self, content: &[u8], what: impl FnOnce() -> String) -> Result<LineEnding> {
        eol_table::line_ending::classify_content(content).ok_or_else(|| ProbeError::NoLineEndings {
            what: format!("{} in {}", what(), self.path.display()),
        })
    }
}

/// Hands out fresh, never reused workspace directories under one root.
#[derive(Debug)]
pub struct WorkspaceAllocator {
    root: PathBuf,
    next: u64,
}

impl WorkspaceAllocator {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            next: 0,
        }
    }

    pub fn allocate(&mut self) -> PathBuf {
        let path = self.root.join(format!("target-{}", self.next));
        self.next += 1;
        path
    }

    /// How many workspaces have been handed out.
    pub fn allocated(&self) -> u64 {
        self.next
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn allocator_counts_up() {
        let mut alloc = WorkspaceAllocator::new("/ws");
        assert_eq!(alloc.allocate(), PathBuf::from("/ws/target-0"));
        assert_eq!(alloc.allocate(), PathBuf::from("/ws/target-1"));
        assert_eq!(alloc.allocated(), 2);
    }
}
