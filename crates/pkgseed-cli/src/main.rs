//! pkgseed - manifest seeding for local directories and hub repositories
//!
//! Usage:
//!   pkgseed init .                                   # Local directory
//!   pkgseed init ./my-model --name mymodel --force   # Overwrite existing manifest
//!   pkgseed init https://huggingface.co/myorg/mymodel
//!   pkgseed init datasets/myorg/mydataset --ref v1.0 -o ./manifest.json

use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use pkgseed_core::commands::{
    DEFAULT_REF, InitCommand, InitOptions, InitReport, ManifestDestination,
};

#[derive(Parser)]
#[command(name = "pkgseed")]
#[command(about = "Generate manifests for local directories and hub repositories", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a manifest for a directory or remote repository
    ///
    /// For local directories the manifest is saved in the target directory.
    /// For remote repositories it is printed to stdout, or saved to the path
    /// given with --output.
    Init(InitArgs),
}

#[derive(Args)]
struct InitArgs {
    /// Local directory, or hub repository (owner/name, datasets/owner/name, or URL)
    path: String,
    /// Name for the package
    #[arg(long)]
    name: Option<String>,
    /// Description for the package
    #[arg(long = "desc")]
    description: Option<String>,
    /// Author for the package
    #[arg(long)]
    author: Option<String>,
    /// Overwrite an existing manifest
    #[arg(long, short)]
    force: bool,
    /// Branch or tag to use for remote repositories (only used by builds that
    /// register a remote lister; this binary resolves remote references but
    /// does not fetch them)
    #[arg(long = "ref", default_value = DEFAULT_REF)]
    reference: String,
    /// Token for authentication with remote repositories (only used by builds
    /// that register a remote lister; this binary does not fetch remote listings)
    #[arg(long)]
    token: Option<String>,
    /// Output path (default: stdout for remotes, manifest file in directory for local)
    #[arg(long, short)]
    output: Option<PathBuf>,
}

fn main() -> Result<()> {
    // Logs go to stderr; stdout carries generated manifests.
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "pkgseed=info,warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Init(args) => run_init(args)?,
    }

    Ok(())
}

fn run_init(args: InitArgs) -> Result<()> {
    let mut options = InitOptions::new(&args.path)
        .with_force(args.force)
        .with_reference(&args.reference);

    if let Some(name) = &args.name {
        options = options.with_name(name);
    }
    if let Some(description) = &args.description {
        options = options.with_description(description);
    }
    if let Some(author) = &args.author {
        options = options.with_author(author);
    }
    if let Some(token) = &args.token {
        options = options.with_token(token);
    }
    if let Some(output) = &args.output {
        options = options.with_output(output);
    }

    let cmd = InitCommand::with_defaults()?;
    let report = cmd.execute(&options)?;

    print_init_result(&report);

    Ok(())
}

fn print_init_result(report: &InitReport) {
    match &report.destination {
        ManifestDestination::Stdout => print!("{}", report.manifest),
        ManifestDestination::File(path) => {
            println!("Generated manifest:\n\n{}", report.manifest);
            println!("Saved to path '{}'", path.display());
        }
    }
}
