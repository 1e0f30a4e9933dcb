use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus, Stdio};

use bstr::ByteSlice;

use crate::error::UtilError;
use crate::Result;

/// Result of running a subprocess to completion.
#[derive(Debug)]
pub struct CommandOutput {
    pub status: ExitStatus,
    /// Captured stdout, byte-exact.
    pub stdout: Vec<u8>,
    pub stderr: Vec<u8>,
}

impl CommandOutput {
    pub fn success(&self) -> bool {
        self.status.success()
    }

    /// Stderr decoded lossily and trimmed, for error messages.
    pub fn stderr_lossy(&self) -> String {
        self.stderr.trim().to_str_lossy().into_owned()
    }
}

/// Builder for a blocking subprocess invocation.
///
/// Both output streams are captured and stdin is `/dev/null`, so a child
/// that prompts fails instead of hanging. There is no timeout: the caller is
/// suspended until the child exits.
#[derive(Debug, Clone)]
pub struct GitCommand {
    program: OsString,
    args: Vec<OsString>,
    env_vars: Vec<(OsString, OsString)>,
    working_dir: Option<PathBuf>,
}

impl GitCommand {
    pub fn new(program: impl AsRef<OsStr>) -> Self {
        Self {
            program: program.as_ref().to_os_string(),
            args: Vec::new(),
            env_vars: Vec::new(),
            working_dir: None,
        }
    }

    pub fn args(mut self, args: impl IntoIterator<Item = impl AsRef<OsStr>>) -> Self {
        for arg in args {
            self.args.push(arg.as_ref().to_os_string());
        }
        self
    }

    pub fn env(mut self, key: impl AsRef<OsStr>, val: impl AsRef<OsStr>) -> Self {
        self.env_vars
            .push((key.as_ref().to_os_string(), val.as_ref().to_os_string()));
        self
    }

    pub fn working_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.working_dir = Some(dir.as_ref().to_path_buf());
        self
    }

    fn build_command(&self) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args);
        for (key, val) in &self.env_vars {
            cmd.env(key, val);
        }
        cmd.stdin(Stdio::null());
        cmd.stdout(Stdio::piped());
        cmd.stderr(Stdio::piped());
        if let Some(ref dir) = self.working_dir {
            cmd.current_dir(dir);
        }
        cmd
    }

    /// The command line as a single string, for logs and error messages.
    pub fn command_string(&self) -> String {
        let mut s = self.program.to_string_lossy().to_string();
        for arg in &self.args {
            s.push(' ');
            s.push_str(&arg.to_string_lossy());
        }
        s
    }

    /// Run the command and wait for it to complete, capturing output.
    ///
    /// Only a spawn or wait failure is an error here; a non-zero exit status
    /// is reported through [`CommandOutput::status`].
    pub fn run(&self) -> Result<CommandOutput> {
        let output = self
            .build_command()
            .output()
            .map_err(|e| UtilError::Subprocess {
                command: self.command_string(),
                source: e,
            })?;
        Ok(CommandOutput {
            status: output.status,
            stdout: output.stdout,
            stderr: output.stderr,
        })
    }
}
