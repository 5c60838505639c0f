//! RN CLI - Multilingual Markdown manual viewer.
//!
//! Provides commands for:
//! - `render`: Render the page for a URL to HTML
//! - `toc`: Print the table of contents for a language
//! - `browse`: Drive the viewer interactively from stdin

mod commands;
mod error;
mod output;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{BrowseArgs, RenderArgs, TocArgs};
use output::Output;

/// RN - Multilingual Markdown manual viewer.
#[derive(Parser)]
#[command(name = "rn", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render the page for a URL to HTML.
    Render(RenderArgs),
    /// Print the table of contents for a language.
    Toc(TocArgs),
    /// Navigate the manual interactively.
    Browse(BrowseArgs),
}

impl Commands {
    fn verbose(&self) -> bool {
        match self {
            Self::Render(args) => args.viewer.verbose,
            Self::Toc(args) => args.viewer.verbose,
            Self::Browse(args) => args.viewer.verbose,
        }
    }
}

fn main() {
    let cli = Cli::parse();
    let output = Output::new();

    // --verbose enables INFO level, otherwise use RUST_LOG
    let filter = if cli.command.verbose() {
        EnvFilter::new("info")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Render(args) => args.execute(),
        Commands::Toc(args) => args.execute(),
        Commands::Browse(args) => args.execute(),
    };

    if let Err(err) = result {
        output.error(&format!("Error: {err}"));
        std::process::exit(1);
    }
}
