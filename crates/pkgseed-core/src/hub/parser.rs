//! Parsing of hub repository references.

use std::borrow::Cow;

use percent_encoding::percent_decode_str;
use thiserror::Error;
use url::Url;

use super::spec::{RepositoryKind, RepositoryReference};

/// The only host whose URLs are accepted as repository references.
pub const TRUSTED_HOST: &str = "huggingface.co";

const DATASETS_PREFIX: &str = "datasets/";
const DATASETS_SEGMENT: &str = "datasets";

/// Errors produced while parsing a repository reference.
#[derive(Debug, Error)]
pub enum ReferenceError {
    /// The input does not match any supported reference grammar.
    #[error("invalid repository reference '{input}': {reason}")]
    InvalidFormat {
        /// The rejected input.
        input: String,
        /// Why the input was rejected.
        reason: String,
    },

    /// The input looked like a URL but could not be parsed as one.
    #[error("invalid URL '{input}': {source}")]
    InvalidUrl {
        /// The rejected input.
        input: String,
        /// Underlying parse failure.
        #[source]
        source: url::ParseError,
    },

    /// The URL points at a host other than the trusted hub.
    #[error("unsupported hostname '{host}' (only {trusted} is supported)", trusted = TRUSTED_HOST)]
    HostMismatch {
        /// Hostname found in the URL (empty when the URL has none).
        host: String,
    },
}

impl ReferenceError {
    fn invalid(input: &str, reason: impl Into<String>) -> Self {
        Self::InvalidFormat {
            input: input.to_string(),
            reason: reason.into(),
        }
    }

    /// Whether this error came from host validation.
    pub fn is_host_mismatch(&self) -> bool {
        matches!(self, Self::HostMismatch { .. })
    }
}

/// Parse a repository reference from a short form or a hub URL.
///
/// Supports formats:
/// - `datasets/owner/name` (dataset)
/// - `https://huggingface.co/owner/name` (model)
/// - `https://huggingface.co/datasets/owner/name` (dataset)
/// - `huggingface.co/...` (same as above, `https://` is assumed)
/// - `owner/name` (model)
pub fn parse_reference(input: &str) -> Result<RepositoryReference, ReferenceError> {
    if let Some(rest) = input.strip_prefix(DATASETS_PREFIX) {
        if !is_two_segment(rest) {
            return Err(ReferenceError::invalid(
                input,
                "expected datasets/owner/name",
            ));
        }
        return Ok(RepositoryReference::new(rest, RepositoryKind::Dataset));
    }

    if looks_like_url(input) {
        return parse_url(input);
    }

    if is_two_segment(input) {
        return Ok(RepositoryReference::new(input, RepositoryKind::Model));
    }

    Err(ReferenceError::invalid(input, "expected owner/name"))
}

/// Check that `s` splits on `/` into exactly two non-empty parts.
pub fn is_two_segment(s: &str) -> bool {
    let mut parts = s.split('/');
    matches!(
        (parts.next(), parts.next(), parts.next()),
        (Some(owner), Some(name), None) if !owner.is_empty() && !name.is_empty()
    )
}

fn looks_like_url(input: &str) -> bool {
    input.contains("://")
        || input
            .strip_prefix(TRUSTED_HOST)
            .is_some_and(|rest| rest.starts_with('/'))
}

fn parse_url(input: &str) -> Result<RepositoryReference, ReferenceError> {
    let normalized = if input.contains("://") {
        input.to_string()
    } else {
        format!("https://{}", input)
    };

    // Parsing only rejects malformed URLs; host and path are read from the
    // raw text because `Url` lowercases, IDNA-maps and dot-resolves them.
    Url::parse(&normalized).map_err(|source| ReferenceError::InvalidUrl {
        input: input.to_string(),
        source,
    })?;

    let raw = RawUrl::split(&normalized);
    validate_host(raw.host)?;

    let segments = raw
        .path
        .trim_matches('/')
        .split('/')
        .map(|segment| decode_segment(input, segment))
        .collect::<Result<Vec<_>, _>>()?;
    let segments: Vec<&str> = segments.iter().map(|segment| &**segment).collect();

    let (owner, name, kind) = match segments.as_slice() {
        [DATASETS_SEGMENT, owner, name, ..] => (*owner, *name, RepositoryKind::Dataset),
        [DATASETS_SEGMENT, ..] => {
            return Err(ReferenceError::invalid(
                input,
                format!("expected datasets/owner/name, got '{}'", raw.path),
            ));
        }
        [owner, name] => (*owner, *name, RepositoryKind::Model),
        _ => {
            return Err(ReferenceError::invalid(
                input,
                "unrecognized repository URL pattern",
            ));
        }
    };

    if owner.is_empty() || name.is_empty() {
        return Err(ReferenceError::invalid(input, "empty path segment"));
    }

    Ok(RepositoryReference::new(format!("{}/{}", owner, name), kind))
}

/// Host and path exactly as written in a URL string.
#[derive(Debug)]
struct RawUrl<'a> {
    host: &'a str,
    path: &'a str,
}

impl<'a> RawUrl<'a> {
    /// Split `url` without normalizing anything.
    ///
    /// The authority ends at the first `/`, `\`, `?` or `#`; userinfo and a
    /// numeric port are dropped from it. The path ends at `?` or `#`.
    fn split(url: &'a str) -> Self {
        let rest = url.split_once("://").map_or(url, |(_, rest)| rest);
        let authority_end = rest.find(['/', '\\', '?', '#']).unwrap_or(rest.len());
        let (authority, tail) = rest.split_at(authority_end);

        let host_port = authority.rsplit_once('@').map_or(authority, |(_, host)| host);
        let host = match host_port.rsplit_once(':') {
            Some((host, port)) if port.bytes().all(|b| b.is_ascii_digit()) => host,
            _ => host_port,
        };

        let path_end = tail.find(['?', '#']).unwrap_or(tail.len());
        Self {
            host,
            path: &tail[..path_end],
        }
    }
}

/// Percent-decode one path segment.
///
/// Dot segments and segments that decode to something containing `/` are
/// rejected so every segment counts as exactly one path component.
fn decode_segment<'s>(input: &str, segment: &'s str) -> Result<Cow<'s, str>, ReferenceError> {
    let decoded = percent_decode_str(segment)
        .decode_utf8()
        .map_err(|_| ReferenceError::invalid(input, "path segment is not valid UTF-8"))?;

    if decoded == "." || decoded == ".." {
        return Err(ReferenceError::invalid(input, "dot segments are not allowed"));
    }
    if decoded.contains('/') {
        return Err(ReferenceError::invalid(input, "encoded '/' in path segment"));
    }

    Ok(decoded)
}

/// Exact comparison of the URL's raw host with [`TRUSTED_HOST`].
///
/// # Security
///
/// This must stay a byte equality check on the host as typed. Substring,
/// prefix or suffix matching would accept lookalikes such as
/// `huggingface.co.evil.com`, and comparing a normalized host would accept
/// `HuggingFace.co`, `huggingface%2Eco` or fullwidth spellings.
fn validate_host(host: &str) -> Result<(), ReferenceError> {
    if host == TRUSTED_HOST {
        return Ok(());
    }

    Err(ReferenceError::HostMismatch {
        host: host.to_string(),
    })
}
