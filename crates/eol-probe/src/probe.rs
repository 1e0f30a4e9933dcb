//! The probe script and the batch driver around it.

use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use eol_table::{ConfigurationTuple, LineEnding, Mapping, Os, ResultEntry, Transition};
use eol_utils::fs;
use tracing::info;

use crate::golden::{fixture_name, GoldenCache};
use crate::oracle::Oracle;
use crate::repo::{Repo, WorkspaceAllocator};
use crate::{Result, INITIAL_BRANCH};

pub const FRESH_LF: &str = "Xline1Lf\nXline1Lf\n";
pub const FRESH_CRLF: &str = "XlineCrLf1\r\nXlineCrLf1\r\n";
pub const FRESH_MIXED: &str = "Xline1Lf\nline2CrLf\r\nXline1Lf\nline2CrLf\r\n";
/// Prepended to a committed fixture; adds no line break.
pub const PREPENDED_TEXT: &str = "PrependedText";

/// Content written during a probe that has `class` line endings.
pub fn fresh_content(class: LineEnding) -> &'static str {
    match class {
        LineEnding::Lf => FRESH_LF,
        LineEnding::Crlf => FRESH_CRLF,
        LineEnding::Mixed => FRESH_MIXED,
    }
}

/// The slot rewritten with `class` content in the commitModify steps.
fn rewrite_slot(class: LineEnding) -> u8 {
    match class {
        LineEnding::Lf => 1,
        LineEnding::Crlf => 2,
        LineEnding::Mixed => 3,
    }
}

/// Observe one file per authored class.
fn observe(read: impl FnMut(LineEnding) -> Result<LineEnding>) -> Result<Transition> {
    Transition::try_from_fn(read)
}

/// Where a batch runs and how its output is tagged.
#[derive(Debug, Clone)]
pub struct ProbeOptions {
    /// Root for golden repositories and probe workspaces.
    pub workspace: PathBuf,
    /// Stamped onto every emitted configuration.
    pub os: Option<Os>,
}

impl Default for ProbeOptions {
    fn default() -> Self {
        Self {
            workspace: PathBuf::from("git-workspace"),
            os: None,
        }
    }
}

/// Shared state of one run: the workspace root, the golden caches and the
/// workspace counter.
pub struct Session<'o, O: Oracle> {
    pub(crate) oracle: &'o O,
    root: PathBuf,
    pub(crate) golden: GoldenCache,
    pub(crate) explore_golden: GoldenCache,
    workspaces: WorkspaceAllocator,
}

impl<'o, O: Oracle> Session<'o, O> {
    /// Open a session rooted at `root`, creating it if needed. Existing
    /// golden repositories under `root` are reused.
    pub fn new(oracle: &'o O, root: impl AsRef<Path>) -> Result<Self> {
        fs::create_dir_all(&root)?;
        let root = fs::canonicalize(root)?;
        Ok(Self {
            oracle,
            golden: GoldenCache::new(&root),
            explore_golden: GoldenCache::with_prefix(&root, "explore-source"),
            workspaces: WorkspaceAllocator::new(&root),
            root,
        })
    }

    /// Open a session on an emptied `root`.
    pub fn fresh(oracle: &'o O, root: impl AsRef<Path>) -> Result<Self> {
        fs::remove_dir_all(&root)?;
        Self::new(oracle, root)
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn golden(&self) -> &GoldenCache {
        &self.golden
    }

    /// Probe workspaces created so far.
    pub fn workspaces(&self) -> u64 {
        self.workspaces.allocated()
    }

    /// Clone `source` into a fresh workspace without checking out, apply
    /// the local settings of `config`, then check out the main branch.
    pub(crate) fn checkout(
        &mut self,
        source: &Path,
        config: &ConfigurationTuple,
    ) -> Result<Repo<'o, O>> {
        let target = self.workspaces.allocate();
        self.oracle.git(
            &self.root,
            &[
                OsStr::new("clone"),
                source.as_os_str(),
                target.as_os_str(),
                OsStr::new("--no-checkout"),
            ],
        )?;

        let repo = Repo::new(self.oracle, target);
        repo.disable_signing()?;
        repo.apply_settings(config)?;
        repo.git(&["checkout", INITIAL_BRANCH])?;
        Ok(repo)
    }

    /// Run the probe script for `config` and classify every step.
    pub fn probe(&mut self, config: &ConfigurationTuple) -> Result<Mapping> {
        let attributes = config.gitattributes();
        let source = self.golden.ensure(self.oracle, &attributes)?;
        let repo = self.checkout(&source, config)?;

        let show = observe(|class| repo.observe_blob(&fixture_name(5, class.as_str())))?;
        let clone = observe(|class| repo.observe_file(&fixture_name(1, class.as_str())))?;

        for history in LineEnding::ALL {
            for class in LineEnding::ALL {
                repo.write_text(
                    &fixture_name(rewrite_slot(class), history.as_str()),
                    fresh_content(class),
                )?;
            }
            repo.prepend_text(&fixture_name(4, history.as_str()), PREPENDED_TEXT)?;
        }
        for class in LineEnding::ALL {
            repo.write_text(&format!("new-{class}.txt"), fresh_content(class))?;
            repo.write_text(&fixture_name(rewrite_slot(class), "simple"), fresh_content(class))?;
        }
        repo.commit_all("update")?;

        let modified = |history: &str| {
            observe(|class| repo.observe_blob(&fixture_name(rewrite_slot(class), history)))
        };

        Ok(Mapping {
            clone,
            commit_new: observe(|class| repo.observe_blob(&format!("new-{class}.txt")))?,
            commit_prepend_simple_text: observe(|class| {
                repo.observe_blob(&fixture_name(4, class.as_str()))
            })?,
            commit_modify_simple_file: modified("simple")?,
            commit_modify_cr_lf_file: modified("crlf")?,
            commit_modify_lf_file: modified("lf")?,
            commit_modify_mixed_file: modified("mixed")?,
            unmodified: observe(|class| repo.observe_blob(&fixture_name(5, class.as_str())))?,
            show,
        })
    }
}

/// Probe every configuration in order on an emptied workspace.
///
/// The first failure aborts the batch; no partial table is returned.
pub fn run_probes<O: Oracle>(
    oracle: &O,
    options: &ProbeOptions,
    configs: &[ConfigurationTuple],
) -> Result<Vec<ResultEntry>> {
    let mut session = Session::fresh(oracle, &options.workspace)?;
    let mut entries = Vec::with_capacity(configs.len());
    for (i, config) in configs.iter().enumerate() {
        info!("probing {}/{}: {}", i + 1, configs.len(), config);
        let mapping = session.probe(config)?;
        let mut config = *config;
        if let Some(os) = options.os {
            config.os = Some(os);
        }
        entries.push(ResultEntry { config, mapping });
    }
    info!(
        "probed {} configurations with {} golden repositories",
        entries.len(),
        session.golden().len()
    );
    Ok(entries)
}
