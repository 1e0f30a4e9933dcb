use std::path::PathBuf;
use std::process::ExitStatus;

use eol_table::Break;

/// Errors from probing git. Every variant aborts the run.
#[derive(Debug, thiserror::Error)]
pub enum ProbeError {
    #[error("`{command}` failed in '{dir}' ({status}): {stderr}")]
    Oracle {
        command: String,
        dir: PathBuf,
        status: ExitStatus,
        stderr: String,
    },

    #[error("golden repository self-check failed for {path}: expected {expected:?}, found {actual:?}")]
    SelfCheck {
        path: String,
        expected: Vec<Break>,
        actual: Vec<Break>,
    },

    #[error("no line break in {what}")]
    NoLineEndings { what: String },

    #[error(transparent)]
    Util(#[from] eol_utils::UtilError),

    #[error(transparent)]
    Table(#[from] eol_table::TableError),
}
