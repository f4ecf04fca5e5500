//! High-level commands for pkgseed operations.
//!
//! These are the entry points frontends call; they wire source
//! classification, listing and manifest rendering together.

pub mod init;

pub use init::{
    DEFAULT_MANIFEST_FILE, DEFAULT_REF, InitCommand, InitOptions, InitReport, ManifestDestination,
};
