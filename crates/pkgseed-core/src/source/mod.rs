//! Source resolution for manifest generation.
//!
//! This module decides whether a user-supplied string names a local
//! directory or a repository on the trusted hub. It handles:
//! - Explicit local paths (`.`, `./dir`, `/abs`, `~/dir`, `C:\dir`)
//! - Strings naming an existing filesystem entry
//! - Hub references (see [`crate::hub`]), with an unresolved-local fallback

mod classifier;
mod probe;
mod spec;

pub use classifier::{ResolveError, SourceClassifier, expand_home, is_explicit_local};
pub use probe::{FsProbe, PathProbe};
pub use spec::{LocalOrigin, LocalSpec, ResolvedSource};

// Re-export reference types for convenience
pub use crate::hub::{RepositoryKind, RepositoryReference};
