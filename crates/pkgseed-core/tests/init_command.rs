use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use pkgseed_core::commands::{DEFAULT_MANIFEST_FILE, InitCommand, InitOptions, ManifestDestination};
use pkgseed_core::hub::{RepositoryKind, RepositoryReference};
use pkgseed_core::manifest::{DirectoryListing, RemoteLister};
use tempfile::TempDir;

/// Arguments a remote lister was called with.
#[derive(Debug, Clone, PartialEq, Eq)]
struct RemoteCall {
    identifier: String,
    kind: RepositoryKind,
    git_ref: String,
    token: Option<String>,
}

/// Remote lister returning a fixed listing and recording its calls.
#[derive(Clone, Default)]
struct FakeRemote {
    calls: Arc<Mutex<Vec<RemoteCall>>>,
}

impl FakeRemote {
    fn calls(&self) -> Vec<RemoteCall> {
        self.calls.lock().unwrap().clone()
    }
}

impl RemoteLister for FakeRemote {
    fn list(
        &self,
        reference: &RepositoryReference,
        git_ref: &str,
        token: Option<&str>,
    ) -> anyhow::Result<DirectoryListing> {
        self.calls.lock().unwrap().push(RemoteCall {
            identifier: reference.identifier().to_string(),
            kind: reference.kind(),
            git_ref: git_ref.to_string(),
            token: token.map(str::to_string),
        });
        Ok(DirectoryListing::new(["config.json", "model.safetensors"]))
    }
}

fn setup() -> (TempDir, PathBuf) {
    let temp = TempDir::new().unwrap();
    let home = temp.path().join("home");
    fs::create_dir_all(&home).unwrap();
    (temp, home)
}

fn create_model_dir(dir: &Path) {
    fs::create_dir_all(dir.join("weights")).unwrap();
    fs::write(dir.join("config.json"), b"{}").unwrap();
    fs::write(dir.join("weights").join("model.safetensors"), b"").unwrap();
}

fn manifest_json(text: &str) -> serde_json::Value {
    serde_json::from_str(text).unwrap()
}

#[test]
fn local_init_writes_manifest_into_directory() {
    let (temp, home) = setup();
    let model_dir = temp.path().join("my-model");
    create_model_dir(&model_dir);

    let cmd = InitCommand::new(temp.path().to_path_buf(), Some(home));
    let report = cmd
        .execute(&InitOptions::new(model_dir.to_string_lossy()))
        .unwrap();

    let manifest_path = model_dir.join(DEFAULT_MANIFEST_FILE);
    assert_eq!(
        report.destination,
        ManifestDestination::File(manifest_path.clone())
    );
    assert!(report.source.is_local());
    assert!(report.package.is_none());

    let written = fs::read_to_string(&manifest_path).unwrap();
    assert_eq!(written, report.manifest);

    let value = manifest_json(&written);
    assert!(value.get("package").is_none());
    assert_eq!(
        value["files"],
        serde_json::json!(["config.json", "weights/model.safetensors"])
    );
}

#[test]
fn local_init_uses_only_overrides_for_package() {
    let (temp, home) = setup();
    let model_dir = temp.path().join("my-model");
    create_model_dir(&model_dir);

    let cmd = InitCommand::new(temp.path().to_path_buf(), Some(home));
    let options = InitOptions::new("./my-model")
        .with_name("mymodel")
        .with_author("me");
    let report = cmd.execute(&options).unwrap();

    let package = report.package.unwrap();
    assert_eq!(package.name, "mymodel");
    assert_eq!(package.description, "");
    assert_eq!(package.authors, vec!["me".to_string()]);
}

#[test]
fn existing_relative_two_segment_directory_is_local() {
    let (temp, home) = setup();
    let model_dir = temp.path().join("models").join("my-model");
    create_model_dir(&model_dir);

    let remote = FakeRemote::default();
    let cmd =
        InitCommand::new(temp.path().to_path_buf(), Some(home)).with_remote_lister(remote.clone());
    let report = cmd.execute(&InitOptions::new("models/my-model")).unwrap();

    assert!(report.source.is_local());
    assert!(model_dir.join(DEFAULT_MANIFEST_FILE).exists());
    assert!(remote.calls().is_empty());
}

#[test]
fn local_init_refuses_to_overwrite_without_force() {
    let (temp, home) = setup();
    let model_dir = temp.path().join("my-model");
    create_model_dir(&model_dir);
    fs::write(model_dir.join(DEFAULT_MANIFEST_FILE), "original").unwrap();

    let cmd = InitCommand::new(temp.path().to_path_buf(), Some(home));
    let err = cmd.execute(&InitOptions::new("./my-model")).unwrap_err();

    assert!(err.to_string().contains("already exists"));
    assert_eq!(
        fs::read_to_string(model_dir.join(DEFAULT_MANIFEST_FILE)).unwrap(),
        "original"
    );
}

#[test]
fn local_init_overwrites_with_force_and_skips_own_manifest() {
    let (temp, home) = setup();
    let model_dir = temp.path().join("my-model");
    create_model_dir(&model_dir);
    fs::write(model_dir.join(DEFAULT_MANIFEST_FILE), "original").unwrap();

    let cmd = InitCommand::new(temp.path().to_path_buf(), Some(home));
    let report = cmd
        .execute(&InitOptions::new("./my-model").with_force(true))
        .unwrap();

    let value = manifest_json(&report.manifest);
    let files = value["files"].as_array().unwrap();
    assert!(!files.iter().any(|f| f == DEFAULT_MANIFEST_FILE));
    assert_ne!(
        fs::read_to_string(model_dir.join(DEFAULT_MANIFEST_FILE)).unwrap(),
        "original"
    );
}

#[test]
fn local_init_honours_output_path() {
    let (temp, home) = setup();
    let model_dir = temp.path().join("my-model");
    create_model_dir(&model_dir);

    let cmd = InitCommand::new(temp.path().to_path_buf(), Some(home));
    let report = cmd
        .execute(&InitOptions::new("./my-model").with_output("out.json"))
        .unwrap();

    let out = temp.path().join("out.json");
    assert_eq!(report.destination, ManifestDestination::File(out.clone()));
    assert!(out.exists());
    assert!(!model_dir.join(DEFAULT_MANIFEST_FILE).exists());
}

#[test]
fn tilde_paths_expand_against_home() {
    let (temp, home) = setup();
    create_model_dir(&home.join("model"));

    let cmd = InitCommand::new(temp.path().to_path_buf(), Some(home.clone()));
    let report = cmd.execute(&InitOptions::new("~/model")).unwrap();

    assert!(report.source.is_local());
    assert!(home.join("model").join(DEFAULT_MANIFEST_FILE).exists());
}

#[test]
fn tilde_without_home_errors() {
    let temp = TempDir::new().unwrap();
    let cmd = InitCommand::new(temp.path().to_path_buf(), None);
    let err = cmd.execute(&InitOptions::new("~/model")).unwrap_err();
    assert!(err.to_string().contains("home directory"));
}

#[test]
fn remote_init_prints_manifest_with_derived_package() {
    let (temp, home) = setup();
    let remote = FakeRemote::default();
    let cmd =
        InitCommand::new(temp.path().to_path_buf(), Some(home)).with_remote_lister(remote.clone());

    let report = cmd
        .execute(&InitOptions::new("https://huggingface.co/myorg/mymodel"))
        .unwrap();

    assert_eq!(report.destination, ManifestDestination::Stdout);
    assert_eq!(report.source.identifier(), "myorg/mymodel");
    assert_eq!(report.source.kind(), RepositoryKind::Model);

    let value = manifest_json(&report.manifest);
    assert_eq!(value["package"]["name"], "mymodel");
    assert_eq!(value["package"]["authors"], serde_json::json!(["myorg"]));
    assert_eq!(value["files"][0], "config.json");

    assert_eq!(
        remote.calls(),
        vec![RemoteCall {
            identifier: "myorg/mymodel".to_string(),
            kind: RepositoryKind::Model,
            git_ref: "main".to_string(),
            token: None,
        }]
    );
}

#[test]
fn remote_init_passes_ref_and_token_through() {
    let (temp, home) = setup();
    let remote = FakeRemote::default();
    let cmd =
        InitCommand::new(temp.path().to_path_buf(), Some(home)).with_remote_lister(remote.clone());

    let options = InitOptions::new("huggingface.co/datasets/myorg/mydataset")
        .with_reference("v1.0")
        .with_token("secret")
        .with_description("Training data");
    let report = cmd.execute(&options).unwrap();

    let package = report.package.unwrap();
    assert_eq!(package.name, "mydataset");
    assert_eq!(package.description, "Training data");
    assert_eq!(package.authors, vec!["myorg".to_string()]);

    let calls = remote.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].kind, RepositoryKind::Dataset);
    assert_eq!(calls[0].git_ref, "v1.0");
    assert_eq!(calls[0].token.as_deref(), Some("secret"));
}

#[test]
fn remote_init_writes_output_and_respects_force() {
    let (temp, home) = setup();
    let cmd = InitCommand::new(temp.path().to_path_buf(), Some(home))
        .with_remote_lister(FakeRemote::default());
    let options = InitOptions::new("myorg/mymodel").with_output("Manifest.json");

    let report = cmd.execute(&options).unwrap();
    let out = temp.path().join("Manifest.json");
    assert_eq!(report.destination, ManifestDestination::File(out.clone()));
    assert_eq!(fs::read_to_string(&out).unwrap(), report.manifest);

    let err = cmd.execute(&options).unwrap_err();
    assert!(err.to_string().contains("--force"));

    assert!(cmd.execute(&options.clone().with_force(true)).is_ok());
}

#[test]
fn remote_init_without_lister_errors() {
    let (temp, home) = setup();
    let cmd = InitCommand::new(temp.path().to_path_buf(), Some(home));

    let err = cmd.execute(&InitOptions::new("myorg/mymodel")).unwrap_err();
    assert!(err.to_string().contains("Remote listing is not available"));
}

#[test]
fn lookalike_host_is_never_fetched() {
    let (temp, home) = setup();
    let remote = FakeRemote::default();
    let cmd =
        InitCommand::new(temp.path().to_path_buf(), Some(home)).with_remote_lister(remote.clone());

    let err = cmd
        .execute(&InitOptions::new("https://huggingface.co.evil.com/org/repo"))
        .unwrap_err();

    assert!(remote.calls().is_empty());
    assert!(format!("{:#}", err).contains("Path not found"));
}

#[test]
fn unresolvable_input_surfaces_as_missing_path() {
    let (temp, home) = setup();
    let cmd = InitCommand::new(temp.path().to_path_buf(), Some(home));

    let err = cmd.execute(&InitOptions::new("not-a-thing")).unwrap_err();
    assert!(format!("{:#}", err).contains("Path not found"));
}
