//! pagesmith CLI - headless CMS to static content tree generator.
//!
//! Provides commands for:
//! - `generate`: Materialize the CMS page graph into content and data files
//! - `nav`: Rebuild the navigation tree from a generated `pages.json`

mod commands;
mod error;
mod output;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{GenerateArgs, NavArgs};
use output::Output;

/// pagesmith - headless CMS to static content tree generator.
#[derive(Parser)]
#[command(name = "pagesmith", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate content and data files from the CMS.
    Generate(GenerateArgs),
    /// Print the navigation tree of a generated page list.
    Nav(NavArgs),
}

fn main() {
    let cli = Cli::parse();
    let output = Output::new();

    let verbose = matches!(&cli.command, Commands::Generate(args) if args.verbose);

    // --verbose enables INFO level, otherwise use RUST_LOG or default to WARN
    let filter = if verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Generate(args) => args.execute(),
        Commands::Nav(args) => args.execute(),
    };

    if let Err(err) = result {
        output.error(&format!("Error: {err}"));
        std::process::exit(1);
    }
}
