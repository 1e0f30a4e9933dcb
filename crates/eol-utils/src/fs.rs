//! Whole-file text I/O.
//!
//! Thin wrappers over `std::fs` that attach the offending path to every error.
//! Contents are written byte-exact: no newline translation happens here.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::error::UtilError;
use crate::Result;

/// Read a whole file as UTF-8 text.
pub fn read_text(path: impl AsRef<Path>) -> Result<String> {
    let path = path.as_ref();
    let bytes = fs::read(path).map_err(|source| UtilError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    String::from_utf8(bytes).map_err(|_| UtilError::NotText {
        path: path.to_path_buf(),
    })
}

/// Write `content` to `path`, replacing any existing file.
pub fn write_text(path: impl AsRef<Path>, content: &str) -> Result<()> {
    let path = path.as_ref();
    fs::write(path, content.as_bytes()).map_err(|source| UtilError::Write {
        path: path.to_path_buf(),
        source,
    })
}

/// Insert `text` in front of the existing content of `path`.
pub fn prepend_text(path: impl AsRef<Path>, text: &str) -> Result<()> {
    let path = path.as_ref();
    let existing = read_text(path)?;
    let mut content = String::with_capacity(text.len() + existing.len());
    content.push_str(text);
    content.push_str(&existing);
    write_text(path, &content)
}

/// Create `path` and all missing parents.
pub fn create_dir_all(path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    fs::create_dir_all(path).map_err(|source| UtilError::Write {
        path: path.to_path_buf(),
        source,
    })
}

/// Recursively remove `path`. A missing directory is not an error.
pub fn remove_dir_all(path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    match fs::remove_dir_all(path) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
        Err(source) => Err(UtilError::Remove {
            path: path.to_path_buf(),
            source,
        }),
    }
}

/// Whether anything exists at `path`.
pub fn exists(path: impl AsRef<Path>) -> bool {
    path.as_ref().exists()
}

/// Absolute form of an existing `path`, with symlinks resolved.
pub fn canonicalize(path: impl AsRef<Path>) -> Result<PathBuf> {
    let path = path.as_ref();
    fs::canonicalize(path).map_err(|source| UtilError::Read {
        path: path.to_path_buf(),
        source,
    })
}
