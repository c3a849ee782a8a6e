//! skylint CLI
//!
//! Lints Endless Sky data files (core game data or third-party plugins) by
//! running the game binary itself in validate mode.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use miette::Result;
use tracing::error;
use tracing_subscriber::EnvFilter;

mod commands;
mod output;

/// skylint - lint Endless Sky data files with the game's own validator
#[derive(Parser)]
#[command(name = "skylint")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to the Endless Sky executable
    #[arg(short, long, global = true)]
    executable: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Lint a data file, plugin directory, or resources tree
    Check {
        /// Path to classify and lint
        path: PathBuf,

        /// Output format (text, json)
        #[arg(short, long, default_value = "text")]
        format: String,

        /// Only show diagnostics addressing the given file
        #[arg(long)]
        only_this_file: bool,
    },

    /// Preview a conversation through the game's dialog mode
    Talk {
        /// File with the conversation text (stdin when omitted)
        input: Option<PathBuf>,

        /// Resources tree to stage for the preview
        #[arg(short, long)]
        resources: PathBuf,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match run(cli).await {
        Ok(found_issues) => {
            if found_issues {
                ExitCode::from(1)
            } else {
                ExitCode::SUCCESS
            }
        }
        Err(e) => {
            error!("{:?}", e);
            ExitCode::from(2)
        }
    }
}

async fn run(cli: Cli) -> Result<bool> {
    // Discovery heuristics live in the editor extensions, not here: the
    // executable must be configured explicitly.
    let executable = cli.executable.clone().ok_or_else(|| {
        miette::miette!("no validator configured; pass --executable <path to Endless Sky>")
    })?;

    match &cli.command {
        Commands::Check {
            path,
            format,
            only_this_file,
        } => commands::check::run(&executable, path, format, *only_this_file).await,
        Commands::Talk { input, resources } => {
            commands::talk::run(&executable, input.as_deref(), resources)
                .await
                .map(|_| false)
        }
    }
}
