//! pagequery CLI
//!
//! Resolve compiled query identifiers against snapshot files, the way a
//! render pass would.

use clap::{Parser, Subcommand};
use pagequery_core::RuntimeConfig;
use std::path::PathBuf;

mod commands;

#[derive(Debug, Parser)]
#[command(name = "pagequery")]
#[command(about = "pagequery - resolve compiled page queries against data snapshots", long_about = None)]
struct Cli {
    /// Runtime configuration file (TOML)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Resolve a query identifier through the imperative subscription
    Resolve(commands::resolve::ResolveArgs),
    /// Mount a StaticQuery node and print what it renders
    Render(commands::render::RenderArgs),
    /// Enqueue pathnames for prefetching
    Prefetch(commands::prefetch::PrefetchArgs),
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let config = match &cli.config {
        Some(path) => RuntimeConfig::load(path)?,
        None => RuntimeConfig::default(),
    };
    config.init_logging();

    match cli.command {
        Commands::Resolve(args) => commands::resolve::execute(args, &config),
        Commands::Render(args) => commands::render::execute(args, &config),
        Commands::Prefetch(args) => commands::prefetch::execute(args),
    }
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
