//! The narrow interface to the git binary.

use std::ffi::{OsStr, OsString};
use std::path::Path;

use bstr::ByteSlice;
use eol_utils::subprocess::GitCommand;
use tracing::{debug, trace};

use crate::{ProbeError, Result};

/// Something that runs git subcommands.
///
/// Calls block until the command finishes. A non-zero exit is an error.
pub trait Oracle {
    /// Run `git <args>` in `dir` and return its stdout.
    fn git<S: AsRef<OsStr>>(&self, dir: &Path, args: &[S]) -> Result<Vec<u8>>;
}

/// Identity used for every commit made by a probe.
const IDENTITY: [(&str, &str); 4] = [
    ("GIT_AUTHOR_NAME", "eol-matrix"),
    ("GIT_AUTHOR_EMAIL", "eol-matrix@localhost"),
    ("GIT_COMMITTER_NAME", "eol-matrix"),
    ("GIT_COMMITTER_EMAIL", "eol-matrix@localhost"),
];

/// The real git, run as a subprocess.
#[derive(Debug, Clone)]
pub struct GitOracle {
    program: OsString,
    env: Vec<(OsString, OsString)>,
}

impl GitOracle {
    /// Use `program` as the git binary. A commit identity is pinned through
    /// the environment so probes never depend on the user's configuration.
    pub fn new(program: impl AsRef<OsStr>) -> Self {
        let env = IDENTITY
            .iter()
            .map(|(k, v)| (OsString::from(*k), OsString::from(*v)))
            .collect();
        Self {
            program: program.as_ref().to_os_string(),
            env,
        }
    }

    /// Add an environment variable for every invocation.
    pub fn env(mut self, key: impl AsRef<OsStr>, val: impl AsRef<OsStr>) -> Self {
        self.env
            .push((key.as_ref().to_os_string(), val.as_ref().to_os_string()));
        self
    }
}

impl Default for GitOracle {
    fn default() -> Self {
        Self::new("git")
    }
}

impl Oracle for GitOracle {
    fn git<S: AsRef<OsStr>>(&self, dir: &Path, args: &[S]) -> Result<Vec<u8>> {
        let mut cmd = GitCommand::new(&self.program)
            .args(args)
            .working_dir(dir);
        for (key, val) in &self.env {
            cmd = cmd.env(key, val);
        }

        debug!("> {{{}}} {}", dir.display(), cmd.command_string());
        let output = cmd.run()?;
        trace!("< {}", output.stdout.to_str_lossy());

        if !output.success() {
            return Err(ProbeError::Oracle {
                command: cmd.command_string(),
                dir: dir.to_path_buf(),
                status: output.status,
                stderr: output.stderr_lossy(),
            });
        }
        Ok(output.stdout)
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn returns_stdout() {
        let dir = tempfile::tempdir().unwrap();
        let oracle = GitOracle::default();

        let out = oracle.git(dir.path(), &["--version"]).unwrap();
        assert!(out.starts_with(b"git version"));
    }

    #[test]
    fn non_zero_exit_is_an_oracle_error() {
        let dir = tempfile::tempdir().unwrap();
        let oracle = GitOracle::default().env("GIT_CEILING_DIRECTORIES", dir.path());

        let err = oracle.git(dir.path(), &["cat-file", "blob", "HEAD:nope.txt"]).unwrap_err();
        match err {
            ProbeError::Oracle { command, dir: at, status, .. } => {
                assert_eq!(command, "git cat-file blob HEAD:nope.txt");
                assert_eq!(at, dir.path());
                assert!(!status.success());
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn missing_binary_is_a_spawn_error() {
        let dir = tempfile::tempdir().unwrap();
        let oracle = GitOracle::new("no-such-git-binary-4711");

        let err = oracle.git(dir.path(), &["--version"]).unwrap_err();
        assert!(matches!(
            err,
            ProbeError::Util(eol_utils::UtilError::Subprocess { .. })
        ));
    }

    #[test]
    fn identity_is_pinned() {
        let dir = tempfile::tempdir().unwrap();
        let oracle = GitOracle::default();

        let out = oracle.git(dir.path(), &["var", "GIT_COMMITTER_IDENT"]).unwrap();
        assert!(out.starts_with(b"eol-matrix <eol-matrix@localhost>"));
    }
}
