//! Directory listings for local paths and hub repositories.

use std::fs;
use std::path::Path;

use anyhow::Context;
use serde::Serialize;
use tracing::debug;

use crate::hub::RepositoryReference;

/// Files found under a source, as sorted `/`-separated relative paths.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DirectoryListing {
    pub files: Vec<String>,
}

impl DirectoryListing {
    /// Build a listing from arbitrary paths; they are sorted and deduplicated.
    pub fn new<I, S>(files: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut files: Vec<String> = files.into_iter().map(Into::into).collect();
        files.sort();
        files.dedup();
        Self { files }
    }
}

/// Produces a listing for a local directory.
pub trait DirectoryLister {
    fn list(&self, path: &Path) -> anyhow::Result<DirectoryListing>;
}

/// Produces a listing for a repository on the hub.
///
/// `git_ref` is a branch, tag or commit; `token` authenticates private
/// repositories.
pub trait RemoteLister {
    fn list(
        &self,
        reference: &RepositoryReference,
        git_ref: &str,
        token: Option<&str>,
    ) -> anyhow::Result<DirectoryListing>;
}

/// [`DirectoryLister`] walking the local filesystem.
///
/// Regular files are listed, directories are descended into, and anything
/// else (symlinks, sockets) is skipped.
#[derive(Debug, Clone, Default)]
pub struct FsDirectoryLister {
    ignored: Vec<String>,
}

impl FsDirectoryLister {
    pub fn new() -> Self {
        Self::default()
    }

    /// Skip entries with this file name at any depth.
    pub fn ignoring(mut self, name: impl Into<String>) -> Self {
        self.ignored.push(name.into());
        self
    }

    fn walk(&self, dir: &Path, base: &str, files: &mut Vec<String>) -> anyhow::Result<()> {
        let entries = fs::read_dir(dir)
            .with_context(|| format!("Failed to read directory: {}", dir.display()))?;

        for entry in entries {
            let entry = entry
                .with_context(|| format!("Failed to read directory entries: {}", dir.display()))?;
            let name = entry.file_name().to_string_lossy().into_owned();
            if self.ignored.contains(&name) {
                continue;
            }

            let rel_path = if base.is_empty() {
                name
            } else {
                format!("{}/{}", base, name)
            };

            let ty = entry
                .file_type()
                .with_context(|| format!("Failed to stat file: {}", entry.path().display()))?;

            if ty.is_dir() {
                self.walk(&entry.path(), &rel_path, files)?;
            } else if ty.is_file() {
                files.push(rel_path);
            } else {
                debug!(path = %entry.path().display(), "skipping non-regular entry");
            }
        }

        Ok(())
    }
}

impl DirectoryLister for FsDirectoryLister {
    fn list(&self, path: &Path) -> anyhow::Result<DirectoryListing> {
        let metadata = fs::metadata(path)
            .with_context(|| format!("Path not found: {}", path.display()))?;
        if !metadata.is_dir() {
            anyhow::bail!("Not a directory: {}", path.display());
        }

        let mut files = Vec::new();
        self.walk(path, "", &mut files)?;
        Ok(DirectoryListing::new(files))
    }
}
