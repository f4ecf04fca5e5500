//! pkgseed Core Library
//!
//! Resolves a path or hub repository reference and seeds manifest metadata
//! for it. Frontends call into [`commands`]; the lower-level pieces are
//! usable on their own.

pub mod commands;
pub mod hub;
pub mod manifest;
pub mod source;

/// Re-exports of commonly used types
pub mod prelude {
    // Hub references
    pub use crate::hub::{
        ReferenceError, RepositoryKind, RepositoryReference, TRUSTED_HOST, parse_reference,
    };

    // Source classification
    pub use crate::source::{
        FsProbe, LocalOrigin, LocalSpec, PathProbe, ResolveError, ResolvedSource,
        SourceClassifier,
    };

    // Manifest seeding
    pub use crate::manifest::{
        DirectoryLister, DirectoryListing, ManifestDefaults, ManifestGenerator, ManifestOverrides,
        RemoteLister, build_defaults,
    };

    // Commands
    pub use crate::commands::{InitCommand, InitOptions, InitReport, ManifestDestination};
}
