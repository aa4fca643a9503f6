//! Extension descriptors: one compile unit per extension module.

use std::collections::HashMap;
use std::path::PathBuf;

use serde::Serialize;

use crate::core::config::{BuildConfig, Language};
use crate::core::module_name::ModuleName;
use crate::errors::ConfigError;

/// Everything the compiler and toolchain need to build one extension module.
#[derive(Debug, Clone, Serialize)]
pub struct ExtensionDescriptor {
    /// Fully-qualified module name, unique within the build
    pub module: ModuleName,

    /// The single source file the module is built from
    pub source: PathBuf,

    /// Target sub-language
    pub language: Language,

    /// Library search paths for the link step
    pub library_dirs: Vec<PathBuf>,

    /// Runtime library search paths for the link step
    pub runtime_library_dirs: Vec<PathBuf>,
}

/// Zip discovered sources with resolved module names and search paths.
///
/// Pure: no filesystem access beyond the paths already in hand. Two sources
/// resolving to the same dotted name is a fatal configuration error,
/// raised here before any compile is attempted.
pub fn build_descriptors(
    sources: &[PathBuf],
    config: &BuildConfig,
) -> Result<Vec<ExtensionDescriptor>, ConfigError> {
    let mut seen: HashMap<ModuleName, PathBuf> = HashMap::new();
    let mut descriptors = Vec::with_capacity(sources.len());

    for source in sources {
        let module = ModuleName::resolve(source, &config.package_dir, &config.package_name)?;

        if let Some(first) = seen.get(&module) {
            return Err(ConfigError::AmbiguousModule {
                module: module.to_string(),
                first: first.clone(),
                second: source.clone(),
            });
        }
        seen.insert(module.clone(), source.clone());

        descriptors.push(ExtensionDescriptor {
            module,
            source: source.clone(),
            language: config.language,
            library_dirs: config.library_dirs.clone(),
            runtime_library_dirs: config.runtime_library_dirs.clone(),
        });
    }

    Ok(descriptors)
}
