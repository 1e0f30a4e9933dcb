//! Golden repositories: byte-exact fixtures under a chosen `.gitattributes`.
//!
//! Fixtures are committed while every path is marked binary and the local
//! settings disable conversion, so their blobs hold exactly the bytes that
//! were written. Only afterwards is the attribute content under test
//! committed on top. Building one is the expensive part of a probe, so
//! repositories are cached by a hash of that content.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use eol_table::{line_breaks, Break, CoreAutocrlf, CoreEol};
use eol_utils::fs;
use sha2::{Digest, Sha256};
use tracing::info;

use crate::oracle::Oracle;
use crate::repo::Repo;
use crate::{ProbeError, Result, INITIAL_BRANCH};

pub const LF_CONTENT: &str = "line1Lf\n";
pub const CRLF_CONTENT: &str = "lineCrLf1\r\n";
pub const MIXED_CONTENT: &str = "line1Lf\nline2CrLf\r\n";
/// Content of the fixture that never held a line break.
pub const SIMPLE_CONTENT: &str = "empty";

/// Fixture slots; each probe step owns one.
pub const SLOTS: std::ops::RangeInclusive<u8> = 1..=5;

/// The fixture variants and their authored content.
pub const VARIANTS: [(&str, &str); 4] = [
    ("lf", LF_CONTENT),
    ("crlf", CRLF_CONTENT),
    ("mixed", MIXED_CONTENT),
    ("simple", SIMPLE_CONTENT),
];

pub fn fixture_name(slot: u8, variant: &str) -> String {
    format!("{slot}-{variant}.txt")
}

/// Directory-safe key for an attribute content string.
pub fn cache_key(attributes: &str) -> String {
    let digest = Sha256::digest(attributes.as_bytes());
    hex::encode(&digest[..8])
}

/// Golden repositories under one workspace root, keyed by attribute content.
#[derive(Debug)]
pub struct GoldenCache {
    root: PathBuf,
    prefix: &'static str,
    repos: HashMap<String, PathBuf>,
}

impl GoldenCache {
    /// Cache of probe golden repositories, named `source-<key>`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self::with_prefix(root, "source")
    }

    pub fn with_prefix(root: impl Into<PathBuf>, prefix: &'static str) -> Self {
        Self {
            root: root.into(),
            prefix,
            repos: HashMap::new(),
        }
    }

    /// Where the repository for `attributes` lives, built or not.
    pub fn path_for(&self, attributes: &str) -> PathBuf {
        self.root
            .join(format!("{}-{}", self.prefix, cache_key(attributes)))
    }

    /// Number of repositories this cache has handed out.
    pub fn len(&self) -> usize {
        self.repos.len()
    }

    pub fn is_empty(&self) -> bool {
        self.repos.is_empty()
    }

    /// Return the repository for `attributes`, running `build` only if
    /// neither this cache nor the disk already has it.
    pub fn ensure_with(
        &mut self,
        attributes: &str,
        build: impl FnOnce(&Path) -> Result<()>,
    ) -> Result<PathBuf> {
        if let Some(path) = self.repos.get(attributes) {
            return Ok(path.clone());
        }
        let path = self.path_for(attributes);
        if !fs::exists(&path) {
            info!("building golden repository {} for {:?}", path.display(), attributes);
            build(&path)?;
        }
        self.repos.insert(attributes.to_string(), path.clone());
        Ok(path)
    }

    /// Return the probe golden repository for `attributes`, building it on
    /// first use.
    pub fn ensure<O: Oracle>(&mut self, oracle: &O, attributes: &str) -> Result<PathBuf> {
        self.ensure_with(attributes, |path| build_golden(oracle, path, attributes))
    }
}

/// Create a fresh repository at `path` in the neutral fixture-authoring
/// regime and write `binary_attributes` as its `.gitattributes`.
pub(crate) fn init_neutral<'o, O: Oracle>(
    oracle: &'o O,
    path: &Path,
    binary_attributes: &str,
) -> Result<Repo<'o, O>> {
    fs::create_dir_all(path)?;
    let repo = Repo::new(oracle, path);
    repo.git(&["init", &format!("--initial-branch={INITIAL_BRANCH}")])?;
    repo.disable_signing()?;
    repo.configure(CoreAutocrlf::False, CoreEol::Lf)?;
    repo.write_text(".gitattributes", binary_attributes)?;
    Ok(repo)
}

/// Fail unless the committed blob read by `read` has exactly `expected`
/// line breaks.
pub(crate) fn self_check(
    name: &str,
    expected: &[Break],
    read: impl FnOnce(&str) -> Result<Vec<u8>>,
) -> Result<()> {
    let actual = line_breaks(read(name)?);
    if actual != expected {
        return Err(ProbeError::SelfCheck {
            path: name.to_string(),
            expected: expected.to_vec(),
            actual,
        });
    }
    Ok(())
}

/// Build the probe golden repository for `attributes` at `path`.
pub fn build_golden<O: Oracle>(oracle: &O, path: &Path, attributes: &str) -> Result<()> {
    let repo = init_neutral(oracle, path, "* binary\n")?;
    repo.commit_all("prepareGitRepo - update1")?;

    for slot in SLOTS {
        for (variant, content) in VARIANTS {
            repo.write_text(&fixture_name(slot, variant), content)?;
        }
    }
    repo.commit_all("prepareGitRepo - update2")?;

    let checks: [(&str, &[Break]); 4] = [
        ("1-lf.txt", &[Break::Lf]),
        ("1-crlf.txt", &[Break::CrLf]),
        ("1-mixed.txt", &[Break::Lf, Break::CrLf]),
        ("1-simple.txt", &[]),
    ];
    for (name, expected) in checks {
        self_check(name, expected, |name| repo.cat_file_blob(name))?;
    }

    repo.write_text(".gitattributes", "")?;
    repo.commit_path(".gitattributes", "prepareGitRepo - update3")?;

    // The trailing newline makes this a change even when `attributes` is empty.
    repo.write_text(".gitattributes", &format!("{attributes}\n"))?;
    repo.commit_path(".gitattributes", "test - update1")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::oracle::testing::RecordingOracle;

    #[test]
    fn cache_key_is_stable_and_short() {
        let key = cache_key("*.txt text eol=lf");
        assert_eq!(key.len(), 16);
        assert_eq!(key, cache_key("*.txt text eol=lf"));
        assert_ne!(key, cache_key("*.txt text eol=crlf"));
        assert_ne!(cache_key(""), cache_key("\n"));
    }

    #[test]
    fn fixture_names() {
        assert_eq!(fixture_name(1, "lf"), "1-lf.txt");
        assert_eq!(fixture_name(5, "mixed"), "5-mixed.txt");
    }

    #[test]
    fn build_writes_fixtures_and_attributes() {
        let dir = tempfile::tempdir().unwrap();
        let oracle = RecordingOracle::default();
        let path = dir.path().join("golden");

        build_golden(&oracle, &path, "*.txt text").unwrap();

        assert_eq!(fs::read_text(path.join("3-crlf.txt")).unwrap(), CRLF_CONTENT);
        assert_eq!(fs::read_text(path.join("5-simple.txt")).unwrap(), SIMPLE_CONTENT);
        assert_eq!(fs::read_text(path.join(".gitattributes")).unwrap(), "*.txt text\n");

        let calls = oracle.calls.borrow();
        assert_eq!(calls[0], vec!["init", "--initial-branch=main"]);
        assert_eq!(calls[1], vec!["config", "commit.gpgsign", "false"]);
        assert_eq!(calls[2], vec!["config", "core.autocrlf", "false"]);
        assert_eq!(calls[3], vec!["config", "core.eol", "lf"]);
        let messages: Vec<&str> = calls
            .iter()
            .filter(|args| args[0] == "commit")
            .map(|args| args[2].as_str())
            .collect();
        assert_eq!(
            messages,
            vec![
                "prepareGitRepo - update1",
                "prepareGitRepo - update2",
                "prepareGitRepo - update3",
                "test - update1",
            ]
        );
    }

    #[test]
    fn second_ensure_is_a_no_op() {
        let dir = tempfile::tempdir().unwrap();
        let oracle = RecordingOracle::default();
        let mut cache = GoldenCache::new(dir.path());

        let first = cache.ensure(&oracle, "*.txt -text").unwrap();
        let calls = oracle.calls.borrow().len();
        let second = cache.ensure(&oracle, "*.txt -text").unwrap();

        assert_eq!(first, second);
        assert_eq!(oracle.calls.borrow().len(), calls);
        assert_eq!(oracle.count("init"), 1);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn existing_directory_is_reused() {
        let dir = tempfile::tempdir().unwrap();
        let oracle = RecordingOracle::default();
        let mut cache = GoldenCache::new(dir.path());
        fs::create_dir_all(cache.path_for("")).unwrap();

        cache.ensure(&oracle, "").unwrap();

        assert!(oracle.calls.borrow().is_empty());
    }

    #[test]
    fn distinct_attributes_get_distinct_repositories() {
        let dir = tempfile::tempdir().unwrap();
        let oracle = RecordingOracle::default();
        let mut cache = GoldenCache::new(dir.path());

        let a = cache.ensure(&oracle, "").unwrap();
        let b = cache.ensure(&oracle, "*.txt binary").unwrap();

        assert_ne!(a, b);
        assert!(a.file_name().unwrap().to_string_lossy().starts_with("source-"));
        assert_eq!(oracle.count("init"), 2);
    }

    #[test]
    fn self_check_gate_aborts_build() {
        let dir = tempfile::tempdir().unwrap();
        let oracle = RecordingOracle::default().with_blob("1-mixed.txt", b"line1Lf\nline2CrLf\n");
        let path = dir.path().join("golden");

        let err = build_golden(&oracle, &path, "").unwrap_err();
        match err {
            ProbeError::SelfCheck { path, expected, actual } => {
                assert_eq!(path, "1-mixed.txt");
                assert_eq!(expected, vec![Break::Lf, Break::CrLf]);
                assert_eq!(actual, vec![Break::Lf, Break::Lf]);
            }
            other => panic!("unexpected error: {other}"),
        }
        // Nothing after the gate ran.
        assert_eq!(oracle.count("commit"), 2);
    }
}
