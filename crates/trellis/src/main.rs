//! Trellis CLI - multi-site content rendering.
//!
//! Provides commands for:
//! - `render`: Render a document to its JSON payload
//! - `tree`: Print a site's document tree
//! - `controllers`: List registered controller names

mod app;
mod commands;
mod content;
mod error;
mod output;

use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use app::GlobalArgs;
use commands::{RenderArgs, TreeArgs};
use output::Output;

/// Trellis - multi-site content rendering.
#[derive(Parser)]
#[command(name = "trellis", version, about)]
struct Cli {
    #[command(flatten)]
    global: GlobalArgs,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render a document and print its payload as JSON.
    Render(RenderArgs),
    /// Print the document tree of one or all sites.
    Tree(TreeArgs),
    /// List registered controller names.
    Controllers,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let output = Output::new();

    // --verbose enables INFO level, otherwise use RUST_LOG or default to WARN
    let filter = if cli.global.verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Render(args) => args.execute(&cli.global),
        Commands::Tree(args) => args.execute(&cli.global),
        Commands::Controllers => commands::controllers::execute(&cli.global),
    };

    if let Err(err) = result {
        output.error(&format!("Error: {err}"));
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}
