//! pyproject.toml manifest parsing and schema.
//!
//! The manifest is the central configuration file for a package built with
//! pyxis. Only the `[project]` metadata and the `[tool.pyxis.cython]` table
//! are consumed; everything else in pyproject.toml belongs to other tools
//! and is ignored.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::errors::ConfigError;

/// Manifest file name.
pub const MANIFEST_NAME: &str = "pyproject.toml";

/// The parsed pyproject.toml manifest.
#[derive(Debug, Clone)]
pub struct Manifest {
    /// Distribution name from `[project]`
    pub name: String,

    /// Distribution version from `[project]`
    pub version: String,

    /// Extension build settings from `[tool.pyxis.cython]`
    pub cython: CythonSettings,

    /// The directory containing this manifest
    pub manifest_dir: PathBuf,
}

impl Manifest {
    /// Load and validate the manifest in `project_root`.
    pub fn load(project_root: &Path) -> Result<Self, ConfigError> {
        let path = project_root.join(MANIFEST_NAME);
        if !path.is_file() {
            return Err(ConfigError::ManifestNotFound(project_root.to_path_buf()));
        }

        let raw = std::fs::read_to_string(&path).map_err(|source| ConfigError::ManifestRead {
            path: path.clone(),
            source,
        })?;

        Self::parse(&raw, project_root)
    }

    /// Parse manifest contents.
    pub fn parse(raw: &str, project_root: &Path) -> Result<Self, ConfigError> {
        let toml: PyProjectToml = toml::from_str(raw)?;

        let project = toml.project.unwrap_or_default();
        let name = project.name.ok_or(ConfigError::MissingName)?;
        let version = project.version.ok_or(ConfigError::MissingVersion)?;

        let cython = toml
            .tool
            .and_then(|t| t.pyxis)
            .and_then(|p| p.cython)
            .unwrap_or_default();

        Ok(Manifest {
            name,
            version,
            cython,
            manifest_dir: project_root.to_path_buf(),
        })
    }

    /// The directory holding the package's sources: `<root>/<name>`.
    pub fn package_dir(&self) -> PathBuf {
        self.manifest_dir.join(&self.name)
    }
}

/// Extension build settings from the `[tool.pyxis.cython]` table.
///
/// Every field is optional in the manifest; the defaults here are the
/// documented defaults of the backend.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CythonSettings {
    /// Explicit source list. When non-empty it fully overrides discovery.
    #[serde(default)]
    pub sources: Vec<PathBuf>,

    /// Directory names (relative to the package root) whose subtrees are
    /// excluded from discovery. Not applied to explicit sources.
    #[serde(default)]
    pub exclude_dirs: Vec<String>,

    /// Library search paths passed to the link step.
    #[serde(default)]
    pub library_dirs: Vec<PathBuf>,

    /// Runtime library search paths (rpath) passed to the link step.
    #[serde(default)]
    pub runtime_library_dirs: Vec<PathBuf>,

    /// Include search paths, used by cython to locate .pxd declaration files.
    #[serde(default)]
    pub include_dirs: Vec<PathBuf>,

    /// Target sub-language: "c" (default) or "c++".
    #[serde(default)]
    pub language: Option<String>,

    /// Cython compiler directives (e.g. `language_level`, `boundscheck`).
    #[serde(default)]
    pub compiler_directives: BTreeMap<String, toml::Value>,

    /// Transpile parallelism. 0 means one worker per core.
    #[serde(default)]
    pub nthreads: usize,

    /// Rebuild generated translation units even if they look up to date.
    #[serde(default)]
    pub force: bool,

    /// Emit cython's annotated HTML next to each translation unit.
    #[serde(default)]
    pub annotate: bool,
}

#[derive(Debug, Deserialize)]
struct PyProjectToml {
    #[serde(default)]
    project: Option<ProjectTable>,

    #[serde(default)]
    tool: Option<ToolTable>,
}

#[derive(Debug, Default, Deserialize)]
struct ProjectTable {
    #[serde(default)]
    name: Option<String>,

    #[serde(default)]
    version: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ToolTable {
    #[serde(default)]
    pyxis: Option<PyxisTable>,
}

#[derive(Debug, Deserialize)]
struct PyxisTable {
    #[serde(default)]
    cython: Option<CythonSettings>,
}
