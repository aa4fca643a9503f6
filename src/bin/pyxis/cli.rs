//! CLI definitions using clap.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;

/// Pyxis - a PEP 517 build backend for Cython extension packages
#[derive(Parser)]
#[command(name = "pyxis")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Compile the package's extensions and assemble a wheel
    BuildWheel(BuildArgs),

    /// Compile the package's extensions and assemble an editable wheel
    BuildEditable(BuildArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[derive(Args)]
pub struct BuildArgs {
    /// Directory to place the wheel in
    #[arg(short, long, default_value = "dist")]
    pub out_dir: PathBuf,

    /// Project root containing pyproject.toml (defaults to current directory)
    #[arg(long)]
    pub project_root: Option<PathBuf>,

    /// Host-supplied config settings (KEY=VALUE, may repeat)
    #[arg(short = 'C', long = "config-setting", value_parser = parse_key_value)]
    pub config_settings: Vec<(String, String)>,

    /// Emit the compile plan as JSON (no build)
    #[arg(long)]
    pub plan: bool,
}

#[derive(Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: Shell,
}

fn parse_key_value(raw: &str) -> Result<(String, String), String> {
    match raw.split_once('=') {
        Some((key, value)) => Ok((key.to_string(), value.to_string())),
        None => Err(format!("expected KEY=VALUE, got `{}`", raw)),
    }
}
