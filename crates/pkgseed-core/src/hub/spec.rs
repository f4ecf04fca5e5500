//! Repository reference types.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::parser::TRUSTED_HOST;

/// Kind of repository a reference points at.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RepositoryKind {
    /// Not a remote repository (or not resolved as one)
    #[default]
    Unknown,
    /// Model repository
    Model,
    /// Dataset repository
    Dataset,
}

impl RepositoryKind {
    /// Lowercase name of the kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Unknown => "unknown",
            Self::Model => "model",
            Self::Dataset => "dataset",
        }
    }
}

impl fmt::Display for RepositoryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A validated reference to a repository on the trusted hub.
///
/// Only [`parse_reference`](super::parse_reference) constructs this type, so
/// the identifier is always `owner/name` with two non-empty segments and the
/// kind is never [`RepositoryKind::Unknown`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct RepositoryReference {
    identifier: String,
    kind: RepositoryKind,
}

impl RepositoryReference {
    pub(crate) fn new(identifier: impl Into<String>, kind: RepositoryKind) -> Self {
        Self {
            identifier: identifier.into(),
            kind,
        }
    }

    /// Normalized `owner/name` identifier.
    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    /// Repository kind.
    pub fn kind(&self) -> RepositoryKind {
        self.kind
    }

    /// Canonical browser URL for the repository.
    pub fn url(&self) -> String {
        match self.kind {
            RepositoryKind::Dataset => {
                format!("https://{}/datasets/{}", TRUSTED_HOST, self.identifier)
            }
            _ => format!("https://{}/{}", TRUSTED_HOST, self.identifier),
        }
    }
}

impl fmt::Display for RepositoryReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            RepositoryKind::Dataset => write!(f, "datasets/{}", self.identifier),
            _ => f.write_str(&self.identifier),
        }
    }
}
