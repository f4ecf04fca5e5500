//! Default package metadata.

use serde::Serialize;

/// Name, description and authors used to seed a manifest.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ManifestDefaults {
    /// Package name
    #[serde(skip_serializing_if = "String::is_empty")]
    pub name: String,
    /// Short description
    #[serde(skip_serializing_if = "String::is_empty")]
    pub description: String,
    /// Authors (at most one)
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub authors: Vec<String>,
}

impl ManifestDefaults {
    /// Package built only from user overrides.
    ///
    /// Returns `None` when no override is set, so callers can leave the
    /// package section out entirely.
    pub fn from_overrides(overrides: &ManifestOverrides) -> Option<Self> {
        if overrides.is_empty() {
            return None;
        }

        Some(Self {
            name: overrides.name().unwrap_or_default().to_string(),
            description: overrides.description().unwrap_or_default().to_string(),
            authors: overrides.author().map(str::to_string).into_iter().collect(),
        })
    }
}

/// User-supplied values that take precedence over derived ones.
///
/// An empty string counts as "not supplied".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ManifestOverrides {
    /// `--name`
    pub name: Option<String>,
    /// `--desc`
    pub description: Option<String>,
    /// `--author`
    pub author: Option<String>,
}

impl ManifestOverrides {
    /// Override name, if non-empty.
    pub fn name(&self) -> Option<&str> {
        non_empty(&self.name)
    }

    /// Override description, if non-empty.
    pub fn description(&self) -> Option<&str> {
        non_empty(&self.description)
    }

    /// Override author, if non-empty.
    pub fn author(&self) -> Option<&str> {
        non_empty(&self.author)
    }

    /// True when no override carries a value.
    pub fn is_empty(&self) -> bool {
        self.name().is_none() && self.description().is_none() && self.author().is_none()
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

/// Derive package defaults from a repository identifier.
///
/// For `owner/name` the name defaults to `name` and the single author to
/// `owner`. Each override replaces only its own field. The description is
/// never derived.
pub fn build_defaults(identifier: &str, overrides: &ManifestOverrides) -> ManifestDefaults {
    let sections: Vec<&str> = identifier.split('/').collect();
    let (derived_author, derived_name) = match sections.as_slice() {
        [.., author, name] => (Some(*author), Some(*name)),
        _ => (None, None),
    };

    let name = overrides
        .name()
        .or(derived_name)
        .unwrap_or_default()
        .to_string();
    let description = overrides.description().unwrap_or_default().to_string();
    let authors = overrides
        .author()
        .or(derived_author.filter(|author| !author.is_empty()))
        .map(str::to_string)
        .into_iter()
        .collect();

    ManifestDefaults {
        name,
        description,
        authors,
    }
}
