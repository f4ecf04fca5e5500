//! Filesystem existence checks used during classification.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Answers whether a path names an existing filesystem entry.
///
/// Implementations return `Ok(false)` when the entry is absent and an error
/// for anything else that prevents a definite answer (e.g. permission denied).
pub trait PathProbe: Send + Sync {
    /// Check whether `path` exists.
    fn exists(&self, path: &Path) -> io::Result<bool>;
}

/// [`PathProbe`] backed by `std::fs::metadata`.
#[derive(Debug, Clone, Default)]
pub struct FsProbe {
    /// Base for relative paths; the working directory when `None`
    root: Option<PathBuf>,
}

impl FsProbe {
    /// Probe relative paths against the working directory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Probe relative paths against `root`.
    pub fn rooted(root: impl Into<PathBuf>) -> Self {
        Self {
            root: Some(root.into()),
        }
    }
}

impl PathProbe for FsProbe {
    fn exists(&self, path: &Path) -> io::Result<bool> {
        let full_path = match &self.root {
            Some(root) => root.join(path),
            None => path.to_path_buf(),
        };

        match fs::metadata(&full_path) {
            Ok(_) => Ok(true),
            Err(err) if is_absent(&err) => Ok(false),
            Err(err) => Err(err),
        }
    }
}

// NotADirectory: a path component is a regular file (`file.txt/x`).
// InvalidInput: the string cannot be a path at all (interior NUL).
fn is_absent(err: &io::Error) -> bool {
    matches!(
        err.kind(),
        io::ErrorKind::NotFound | io::ErrorKind::NotADirectory | io::ErrorKind::InvalidInput
    )
}
