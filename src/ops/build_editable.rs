//! Implementation of the editable-wheel hook.

use std::path::Path;

use crate::dist::DistributionDescriptor;
use crate::errors::Result;
use crate::ops::{Backend, ConfigSettings};

/// Build an editable wheel into `wheel_dir`.
///
/// Triggers the shared compile pass, then delegates to the editable-install
/// machinery, which records a pointer from the installed environment back to
/// the in-place compiled modules instead of copying them into a
/// self-contained archive. The machinery's result is returned unchanged.
pub fn build_editable(
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
    let name = backend.packager.pack_editable(&dist, &config, wheel_dir)?;

    tracing::info!("built editable {}", name);
    Ok(name)
}
