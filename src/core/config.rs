//! Resolved build configuration.
//!
//! `BuildConfig` is the merge of the manifest's `[tool.pyxis.cython]` table
//! with host facts from the interpreter probe. Downstream components take
//! only this; nothing after resolution reads the manifest again.

use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::Serialize;

use crate::core::manifest::Manifest;
use crate::errors::ConfigError;
use crate::util::python::PythonEnv;

/// Target sub-language for generated translation units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    /// Plain C (default)
    #[default]
    C,
    /// C++ (cython --cplus)
    #[serde(rename = "c++")]
    Cpp,
}

impl Language {
    /// Parse the manifest's `language` value.
    pub fn parse(value: &str) -> Result<Self, ConfigError> {
        match value {
            "c" => Ok(Language::C),
            "c++" | "cpp" => Ok(Language::Cpp),
            other => Err(ConfigError::UnsupportedLanguage(other.to_string())),
        }
    }

    /// File extension of the generated translation unit.
    pub fn source_extension(&self) -> &'static str {
        match self {
            Language::C => "c",
            Language::Cpp => "cpp",
        }
    }
}

/// Fully resolved configuration for one build.
#[derive(Debug, Clone)]
pub struct BuildConfig {
    /// Distribution name
    pub package_name: String,

    /// Distribution version
    pub package_version: String,

    /// Directory holding the package's sources
    pub package_dir: PathBuf,

    /// Explicit source list; empty means discover
    pub sources: Vec<PathBuf>,

    /// Subtree names excluded from discovery
    pub exclude_dirs: Vec<String>,

    /// Library search paths, host locations appended
    pub library_dirs: Vec<PathBuf>,

    /// Runtime library search paths, host locations appended
    pub runtime_library_dirs: Vec<PathBuf>,

    /// Include search paths for .pxd lookup, host locations appended
    pub include_dirs: Vec<PathBuf>,

    /// Target sub-language
    pub language: Language,

    /// Cython compiler directives
    pub compiler_directives: BTreeMap<String, toml::Value>,

    /// Transpile parallelism (0 = one worker per core)
    pub nthreads: usize,

    /// Rebuild even when outputs look up to date
    pub force: bool,

    /// Emit annotated HTML
    pub annotate: bool,
}

impl BuildConfig {
    /// Resolve the manifest against the host interpreter.
    ///
    /// The interpreter's site-packages directory is appended to all three
    /// search-path lists so compiled extensions can locate shared
    /// dependencies wherever the build runs. No other validation happens
    /// here; downstream components validate their own inputs.
    pub fn resolve(manifest: &Manifest, python: &PythonEnv) -> Result<Self, ConfigError> {
        let settings = &manifest.cython;

        let language = match settings.language.as_deref() {
            Some(value) => Language::parse(value)?,
            None => Language::default(),
        };

        let with_host = |dirs: &[PathBuf]| -> Vec<PathBuf> {
            let mut merged = dirs.to_vec();
            merged.push(python.site_packages.clone());
            merged
        };

        Ok(BuildConfig {
            package_name: manifest.name.clone(),
            package_version: manifest.version.clone(),
            package_dir: manifest.package_dir(),
            sources: settings.sources.clone(),
            exclude_dirs: settings.exclude_dirs.clone(),
            library_dirs: with_host(&settings.library_dirs),
            runtime_library_dirs: with_host(&settings.runtime_library_dirs),
            include_dirs: with_host(&settings.include_dirs),
            language,
            compiler_directives: settings.compiler_directives.clone(),
            nthreads: settings.nthreads,
            force: settings.force,
            annotate: settings.annotate,
        })
    }
}
