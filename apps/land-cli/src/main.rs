//! # land-cli
//!
//! Command-line interface for landing reviewed changes.
//!
//! - `land revisions` — list the owner's committable revisions
//! - `land commit [REVISION]` — reconcile a revision's declared paths
//!   against the working copy and commit the result

mod commands;
mod config;
mod prompt;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

/// Land reviewed changes into a Subversion working copy.
#[derive(Parser)]
#[command(name = "land", version, about)]
struct Cli {
    /// Working-copy root (defaults to current directory).
    #[arg(long, default_value = ".")]
    root: PathBuf,

    /// Revision owner; falls back to [review].owner in .land/config.toml.
    #[arg(long)]
    owner: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List committable revisions.
    Revisions,
    /// Land a revision: reconcile its declared paths and commit them.
    Commit {
        /// Revision to land; omit to pick from the committable list.
        revision: Option<u64>,
        /// Proceed past every advisory without prompting.
        #[arg(long)]
        yes: bool,
    },
}

fn main() -> anyhow::Result<()> {
    // Logs go to stderr; stdout is for prompts and results.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();

    let cli = Cli::parse();
    let root = cli.root.canonicalize().unwrap_or_else(|_| cli.root.clone());
    let config = config::LandConfig::load_or_default(&root);

    match &cli.command {
        Commands::Revisions => commands::revisions::execute(&config, cli.owner.as_deref()),
        Commands::Commit { revision, yes } => {
            commands::commit::execute(&root, &config, cli.owner.as_deref(), *revision, *yes)
        }
    }
}
