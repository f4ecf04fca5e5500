//! Local-versus-remote classification of source strings.

use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, warn};

use crate::hub::parse_reference;

use super::probe::{FsProbe, PathProbe};
use super::spec::{LocalOrigin, LocalSpec, ResolvedSource};

const LOCAL_PREFIXES: &[&str] = &["./", "../", "~/", "~\\", "/", "\\"];

/// Errors raised while classifying a source string.
#[derive(Debug, Error)]
pub enum ResolveError {
    /// The existence check failed for a reason other than "not found".
    #[error("failed to access '{}': {source}", .path.display())]
    FilesystemAccess {
        /// Path that was being checked.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },
}

/// Classifies source strings as local paths or hub repositories.
#[derive(Debug, Clone, Default)]
pub struct SourceClassifier<P: PathProbe = FsProbe> {
    probe: P,
}

impl SourceClassifier<FsProbe> {
    /// Create a classifier that checks paths relative to the working directory.
    pub fn new() -> Self {
        Self::with_probe(FsProbe::new())
    }
}

impl<P: PathProbe> SourceClassifier<P> {
    /// Create a classifier with a custom existence check.
    pub fn with_probe(probe: P) -> Self {
        Self { probe }
    }

    /// Classify a source string.
    ///
    /// Rules, first match wins:
    /// 1. explicit local shapes (see [`is_explicit_local`])
    /// 2. the string names an existing file or directory
    /// 3. the string parses as a hub reference
    ///
    /// Anything else is returned as an unresolved local path. Only an
    /// unexpected filesystem error is reported as `Err`.
    pub fn classify(&self, input: &str) -> Result<ResolvedSource, ResolveError> {
        if is_explicit_local(input) {
            debug!(input, "explicit local path");
            return Ok(local(input, LocalOrigin::Explicit));
        }

        let exists = self
            .probe
            .exists(Path::new(input))
            .map_err(|source| ResolveError::FilesystemAccess {
                path: PathBuf::from(input),
                source,
            })?;
        if exists {
            debug!(input, "path exists locally");
            return Ok(local(input, LocalOrigin::Existing));
        }

        match parse_reference(input) {
            Ok(reference) => {
                debug!(%reference, kind = %reference.kind(), "resolved hub repository");
                Ok(ResolvedSource::Remote(reference))
            }
            Err(err) if err.is_host_mismatch() => {
                warn!(input, error = %err, "rejected repository URL; treating input as a local path");
                Ok(local(input, LocalOrigin::Unresolved))
            }
            Err(err) => {
                debug!(input, error = %err, "not a repository reference; treating input as a local path");
                Ok(local(input, LocalOrigin::Unresolved))
            }
        }
    }
}

fn local(input: &str, origin: LocalOrigin) -> ResolvedSource {
    ResolvedSource::Local(LocalSpec::new(input, origin))
}

/// Whether `input` has an unambiguously local shape.
///
/// Matches `.`, `..`, `~`, anything starting with `./`, `../`, `~/`, `~\`,
/// `/` or `\`, and drive-letter paths where the second character is `:`.
pub fn is_explicit_local(input: &str) -> bool {
    matches!(input, "." | ".." | "~")
        || LOCAL_PREFIXES
            .iter()
            .any(|prefix| input.starts_with(prefix))
        || input.as_bytes().get(1) == Some(&b':')
}

/// Expand a leading `~` against `home`.
///
/// `~` becomes `home`, `~/rest` and `~\rest` become `home/rest`. Other
/// inputs are returned unchanged.
pub fn expand_home(input: &str, home: &Path) -> String {
    if input == "~" {
        return home.to_string_lossy().into_owned();
    }

    match input
        .strip_prefix("~/")
        .or_else(|| input.strip_prefix("~\\"))
    {
        Some(rest) => home.join(rest).to_string_lossy().into_owned(),
        None => input.to_string(),
    }
}
