//! Manifest seeding and the collaborators that consume it.
//!
//! The defaults builder derives package metadata from a repository
//! identifier. Directory listing and manifest rendering sit behind traits so
//! frontends can plug in their own producers and formats.

mod defaults;
mod generator;
mod listing;

pub use defaults::{ManifestDefaults, ManifestOverrides, build_defaults};
pub use generator::{JsonManifestGenerator, ManifestGenerator};
pub use listing::{DirectoryLister, DirectoryListing, FsDirectoryLister, RemoteLister};
