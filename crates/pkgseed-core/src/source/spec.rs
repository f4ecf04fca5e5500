//! Resolved source types.

use std::path::PathBuf;

use crate::hub::{RepositoryKind, RepositoryReference};

/// Outcome of classifying a source string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolvedSource {
    /// Local filesystem path
    Local(LocalSpec),
    /// Repository on the trusted hub
    Remote(RepositoryReference),
}

impl ResolvedSource {
    /// Check if this is a remote repository.
    pub fn is_remote(&self) -> bool {
        matches!(self, Self::Remote(_))
    }

    /// Check if this is a local path.
    pub fn is_local(&self) -> bool {
        matches!(self, Self::Local(_))
    }

    /// Get the local spec if this is a local source.
    pub fn as_local(&self) -> Option<&LocalSpec> {
        match self {
            Self::Local(spec) => Some(spec),
            _ => None,
        }
    }

    /// Get the repository reference if this is a remote source.
    pub fn as_remote(&self) -> Option<&RepositoryReference> {
        match self {
            Self::Remote(reference) => Some(reference),
            _ => None,
        }
    }

    /// Repository identifier, empty for local sources.
    pub fn identifier(&self) -> &str {
        self.as_remote()
            .map(RepositoryReference::identifier)
            .unwrap_or_default()
    }

    /// Repository kind, [`RepositoryKind::Unknown`] for local sources.
    pub fn kind(&self) -> RepositoryKind {
        self.as_remote()
            .map(RepositoryReference::kind)
            .unwrap_or_default()
    }
}

/// How a local classification was reached.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LocalOrigin {
    /// Input has an explicit local shape (`./x`, `/x`, `~`, ...)
    Explicit,
    /// Input names an existing filesystem entry
    Existing,
    /// Input matched nothing; left for downstream filesystem code to reject
    Unresolved,
}

/// Specification for a local filesystem source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalSpec {
    /// Path exactly as supplied (after home expansion)
    pub path: PathBuf,
    /// Which classification rule matched
    pub origin: LocalOrigin,
}

impl LocalSpec {
    /// Create a new LocalSpec.
    pub fn new(path: impl Into<PathBuf>, origin: LocalOrigin) -> Self {
        Self {
            path: path.into(),
            origin,
        }
    }

    /// Whether the path was only kept as a fallback.
    pub fn is_unresolved(&self) -> bool {
        self.origin == LocalOrigin::Unresolved
    }
}
