//! Implementation of the full-wheel hook.

use std::path::Path;

use crate::dist::DistributionDescriptor;
use crate::errors::{PackagingError, Result};
use crate::ops::{Backend, ConfigSettings};

/// Build a full wheel into `wheel_dir`.
///
/// Triggers the shared compile pass, describes the distribution (non-pure,
/// with package-data globs covering compiled modules and declaration
/// files), delegates assembly to the packager, and returns the wheel's file
/// name after verifying the file exists. Compilation happens at most once
/// per process; packaging re-runs on every call.
pub fn build_wheel(
    backend: &Backend,
    wheel_dir: &Path,
    config_settings: Option<&ConfigSettings>,
    metadata_dir: Option<&Path>,
) -> Result<String> {
    if let Some(settings) = config_settings {
        tracing::debug!("ignoring {} config setting(s)", settings.len());
    }
    if metadata_dir.is_some() {
        tracing::debug!("ignoring metadata directory");
    }

    let (config, descriptors) = backend.plan()?;
    let artifacts = backend.orchestrator.compile_all(&descriptors, &config)?;

    let dist = DistributionDescriptor::new(&config, artifacts);
    let name = backend.packager.pack_wheel(&dist, &config, wheel_dir)?;

    // Never report a name the host cannot find.
    if !wheel_dir.join(&name).is_file() {
        return Err(PackagingError::MissingArtifact(wheel_dir.to_path_buf()).into());
    }

    tracing::info!("built {}", name);
    Ok(name)
}
