//! Command implementations

pub mod build_editable;
pub mod build_wheel;
pub mod completions;

use std::path::PathBuf;

use pyxis::ops::ConfigSettings;

use crate::cli::BuildArgs;

/// Resolve the project root from the flag or the working directory.
pub fn project_root(args: &BuildArgs) -> anyhow::Result<PathBuf> {
    match &args.project_root {
        Some(root) => Ok(root.clone()),
        None => Ok(std::env::current_dir()?),
    }
}

/// Collect `-C KEY=VALUE` flags into the hook's settings map.
pub fn config_settings(args: &BuildArgs) -> Option<ConfigSettings> {
    if args.config_settings.is_empty() {
        return None;
    }
    Some(args.config_settings.iter().cloned().collect())
}
