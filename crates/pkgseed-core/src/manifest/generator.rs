//! Manifest rendering.

use serde::Serialize;

use super::defaults::ManifestDefaults;
use super::listing::DirectoryListing;

/// Turns a listing and optional package metadata into manifest text.
pub trait ManifestGenerator {
    fn generate(
        &self,
        listing: &DirectoryListing,
        package: Option<&ManifestDefaults>,
    ) -> anyhow::Result<String>;
}

/// Renders a pretty-printed JSON document with `package` and `files` keys.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonManifestGenerator;

#[derive(Serialize)]
struct ManifestDocument<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    package: Option<&'a ManifestDefaults>,
    files: &'a [String],
}

impl ManifestGenerator for JsonManifestGenerator {
    fn generate(
        &self,
        listing: &DirectoryListing,
        package: Option<&ManifestDefaults>,
    ) -> anyhow::Result<String> {
        let document = ManifestDocument {
            package,
            files: &listing.files,
        };
        let mut rendered = serde_json::to_string_pretty(&document)?;
        rendered.push('\n');
        Ok(rendered)
    }
}
