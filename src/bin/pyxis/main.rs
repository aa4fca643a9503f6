//! Pyxis CLI - a PEP 517 build backend for Cython extension packages

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
mod commands;

use cli::{Cli, Commands};

fn main() {
    if let Err(e) = run() {
        eprintln!("error: {:#}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    // Parse CLI
    let cli = Cli::parse();

    // Set up logging
    let filter = if cli.verbose {
        EnvFilter::new("pyxis=debug")
    } else {
        EnvFilter::new("pyxis=info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .init();

    // Execute command
    match cli.command {
        Commands::BuildWheel(args) => commands::build_wheel::execute(args),
        Commands::BuildEditable(args) => commands::build_editable::execute(args),
        Commands::Completions(args) => commands::completions::execute(args),
    }
}
