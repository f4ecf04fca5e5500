//! Init command implementation.
//!
//! Resolves the requested source, lists its files, seeds package metadata
//! and writes (or returns) the rendered manifest.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use anyhow::Context;
use tracing::{debug, info};

use crate::hub::RepositoryReference;
use crate::manifest::{
    DirectoryLister, FsDirectoryLister, JsonManifestGenerator, ManifestDefaults, ManifestGenerator,
    ManifestOverrides, RemoteLister, build_defaults,
};
use crate::source::{FsProbe, LocalSpec, ResolvedSource, SourceClassifier, expand_home};

/// File name used for manifests written into a local directory
pub const DEFAULT_MANIFEST_FILE: &str = "manifest.json";

/// Branch used for remote repositories when none is given
pub const DEFAULT_REF: &str = "main";

/// Options for the init command
#[derive(Debug, Clone)]
pub struct InitOptions {
    /// Local path or hub reference
    pub path: String,
    /// User-supplied package metadata
    pub overrides: ManifestOverrides,
    /// Overwrite an existing manifest
    pub force: bool,
    /// Branch, tag or commit for remote repositories
    pub reference: String,
    /// Token for private remote repositories
    pub token: Option<String>,
    /// Where to write the manifest instead of the default location
    pub output: Option<PathBuf>,
}

impl InitOptions {
    /// Create init options for a path or reference
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            overrides: ManifestOverrides::default(),
            force: false,
            reference: DEFAULT_REF.to_string(),
            token: None,
            output: None,
        }
    }

    /// Set the package name
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.overrides.name = Some(name.into());
        self
    }

    /// Set the package description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.overrides.description = Some(description.into());
        self
    }

    /// Set the package author
    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.overrides.author = Some(author.into());
        self
    }

    /// Set the force flag
    pub fn with_force(mut self, force: bool) -> Self {
        self.force = force;
        self
    }

    /// Set the remote branch, tag or commit
    pub fn with_reference(mut self, reference: impl Into<String>) -> Self {
        self.reference = reference.into();
        self
    }

    /// Set the authentication token
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Set the output path
    pub fn with_output(mut self, output: impl Into<PathBuf>) -> Self {
        self.output = Some(output.into());
        self
    }
}

/// Where the rendered manifest went
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ManifestDestination {
    /// Written to this file
    File(PathBuf),
    /// Left for the caller to print
    Stdout,
}

/// Report from an init operation
#[derive(Debug, Clone)]
pub struct InitReport {
    /// How the input was classified
    pub source: ResolvedSource,
    /// Package metadata placed in the manifest, if any
    pub package: Option<ManifestDefaults>,
    /// Rendered manifest
    pub manifest: String,
    /// Where the manifest was written
    pub destination: ManifestDestination,
}

/// Init command orchestrator
pub struct InitCommand {
    /// Base for relative paths
    base_dir: PathBuf,
    /// Home directory for `~` expansion
    home_dir: Option<PathBuf>,
    classifier: SourceClassifier<FsProbe>,
    local_lister: Box<dyn DirectoryLister>,
    remote_lister: Option<Box<dyn RemoteLister>>,
    generator: Box<dyn ManifestGenerator>,
}

impl InitCommand {
    /// Create an init command resolving relative paths against `base_dir`.
    ///
    /// No remote lister is configured; see [`InitCommand::with_remote_lister`].
    pub fn new(base_dir: PathBuf, home_dir: Option<PathBuf>) -> Self {
        Self {
            classifier: SourceClassifier::with_probe(FsProbe::rooted(&base_dir)),
            base_dir,
            home_dir,
            local_lister: Box::new(FsDirectoryLister::new().ignoring(DEFAULT_MANIFEST_FILE)),
            remote_lister: None,
            generator: Box::new(JsonManifestGenerator),
        }
    }

    /// Create an init command for the current directory and user.
    pub fn with_defaults() -> anyhow::Result<Self> {
        let base_dir = std::env::current_dir().context("Could not determine current directory")?;
        Ok(Self::new(base_dir, dirs::home_dir()))
    }

    /// Use a custom producer for local listings.
    pub fn with_local_lister(mut self, lister: impl DirectoryLister + 'static) -> Self {
        self.local_lister = Box::new(lister);
        self
    }

    /// Use a producer for remote repository listings.
    pub fn with_remote_lister(mut self, lister: impl RemoteLister + 'static) -> Self {
        self.remote_lister = Some(Box::new(lister));
        self
    }

    /// Use a custom manifest renderer.
    pub fn with_generator(mut self, generator: impl ManifestGenerator + 'static) -> Self {
        self.generator = Box::new(generator);
        self
    }

    /// Execute the init command.
    pub fn execute(&self, options: &InitOptions) -> anyhow::Result<InitReport> {
        let path = self.expand_home(&options.path)?;
        let source = self
            .classifier
            .classify(&path)
            .with_context(|| format!("Could not resolve '{}'", options.path))?;

        match &source {
            ResolvedSource::Local(spec) => self.init_local(spec, options, source.clone()),
            ResolvedSource::Remote(reference) => {
                self.init_remote(reference, options, source.clone())
            }
        }
    }

    fn expand_home(&self, input: &str) -> anyhow::Result<String> {
        if input != "~" && !input.starts_with("~/") && !input.starts_with("~\\") {
            return Ok(input.to_string());
        }

        let home = self
            .home_dir
            .as_ref()
            .ok_or_else(|| anyhow::anyhow!("Could not determine home directory"))?;
        Ok(expand_home(input, home))
    }

    fn init_local(
        &self,
        spec: &LocalSpec,
        options: &InitOptions,
        source: ResolvedSource,
    ) -> anyhow::Result<InitReport> {
        let dir = self.base_dir.join(&spec.path);
        let manifest_path = match &options.output {
            Some(output) => self.base_dir.join(output),
            None => dir.join(DEFAULT_MANIFEST_FILE),
        };

        ensure_writable(&manifest_path, options.force)?;

        if spec.is_unresolved() {
            debug!(path = %dir.display(), "input did not resolve; listing it as a local path");
        }
        let listing = self
            .local_lister
            .list(&dir)
            .context("Error processing directory")?;

        let package = ManifestDefaults::from_overrides(&options.overrides);
        let manifest = self
            .generator
            .generate(&listing, package.as_ref())
            .context("Error generating manifest")?;

        write_manifest(&manifest_path, &manifest)?;
        info!(
            path = %manifest_path.display(),
            files = listing.files.len(),
            "generated manifest"
        );

        Ok(InitReport {
            source,
            package,
            manifest,
            destination: ManifestDestination::File(manifest_path),
        })
    }

    fn init_remote(
        &self,
        reference: &RepositoryReference,
        options: &InitOptions,
        source: ResolvedSource,
    ) -> anyhow::Result<InitReport> {
        let lister = self.remote_lister.as_deref().ok_or_else(|| {
            anyhow::anyhow!(
                "Remote listing is not available; cannot fetch {}",
                reference.url()
            )
        })?;

        // Resolve the destination before any remote work.
        let output_path = options
            .output
            .as_ref()
            .map(|output| self.base_dir.join(output));
        if let Some(path) = &output_path {
            ensure_writable(path, options.force)?;
        }

        info!(
            repository = %reference,
            git_ref = %options.reference,
            "fetching file listing from remote repository"
        );
        let listing = lister
            .list(reference, &options.reference, options.token.as_deref())
            .with_context(|| format!("Error fetching remote repository {}", reference))?;

        let package = build_defaults(reference.identifier(), &options.overrides);
        let manifest = self
            .generator
            .generate(&listing, Some(&package))
            .context("Error generating manifest")?;

        let destination = match output_path {
            Some(path) => {
                write_manifest(&path, &manifest)?;
                info!(path = %path.display(), "generated manifest");
                ManifestDestination::File(path)
            }
            None => ManifestDestination::Stdout,
        };

        Ok(InitReport {
            source,
            package: Some(package),
            manifest,
            destination,
        })
    }
}

/// Fail if `path` exists and `force` is not set.
fn ensure_writable(path: &Path, force: bool) -> anyhow::Result<()> {
    match fs::metadata(path) {
        Ok(_) if force => {
            debug!(path = %path.display(), "overwriting existing manifest");
            Ok(())
        }
        Ok(_) => anyhow::bail!(
            "Manifest already exists at {}. Use '--force' to overwrite",
            path.display()
        ),
        Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
        Err(err) => Err(err).with_context(|| {
            format!(
                "Error checking for existing manifest at {}",
                path.display()
            )
        }),
    }
}

fn write_manifest(path: &Path, manifest: &str) -> anyhow::Result<()> {
    fs::write(path, manifest)
        .with_context(|| format!("Failed to write manifest: {}", path.display()))
}
