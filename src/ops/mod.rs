//! Hook entry points.
//!
//! This module implements the build-backend hooks the host orchestrator
//! calls: build a full wheel, build an editable wheel. A `Backend` value is
//! constructed once per process and handed to both hooks, so they share one
//! compile pass through the orchestrator's state guard.

pub mod build_editable;
pub mod build_wheel;

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::builder::compiler::{ExtensionToolchain, SourceCompiler};
use crate::builder::cython::CythonCompiler;
use crate::builder::discover::discover_sources;
use crate::builder::orchestrator::BuildOrchestrator;
use crate::builder::toolchain::CcToolchain;
use crate::core::config::BuildConfig;
use crate::core::extension::{build_descriptors, ExtensionDescriptor};
use crate::core::manifest::Manifest;
use crate::dist::{ArtifactPackager, WheelPackager};
use crate::errors::Result;
use crate::util::python::PythonEnv;

/// Host-supplied config settings. Accepted for hook-protocol compatibility
/// and ignored, as the original backend does.
pub type ConfigSettings = HashMap<String, String>;

/// The build backend: one instance per process, shared by both hooks.
pub struct Backend {
    pub(crate) project_root: PathBuf,
    pub(crate) python: PythonEnv,
    pub(crate) orchestrator: BuildOrchestrator,
    pub(crate) packager: Box<dyn ArtifactPackager>,
}

impl Backend {
    /// Create a backend for `project_root` using the host's tools: the
    /// probed Python interpreter, cython, and the system C compiler.
    pub fn new(project_root: impl Into<PathBuf>) -> Result<Self> {
        let python = PythonEnv::detect()?;
        let compiler = CythonCompiler::detect()?;
        let toolchain = CcToolchain::detect(python.clone())?;
        let packager = WheelPackager::new(python.clone());

        Ok(Self::with_parts(
            project_root,
            python,
            Box::new(compiler),
            Box::new(toolchain),
            Box::new(packager),
        ))
    }

    /// Create a backend from explicit parts. Tests use this to substitute
    /// stub tools; hosts embedding the backend can swap any seam.
    pub fn with_parts(
        project_root: impl Into<PathBuf>,
        python: PythonEnv,
        compiler: Box<dyn SourceCompiler>,
        toolchain: Box<dyn ExtensionToolchain>,
        packager: Box<dyn ArtifactPackager>,
    ) -> Self {
        Backend {
            project_root: project_root.into(),
            python,
            orchestrator: BuildOrchestrator::new(compiler, toolchain),
            packager,
        }
    }

    /// Build a full wheel into `wheel_dir` and return its file name.
    pub fn build_wheel(
        &self,
        wheel_dir: &Path,
        config_settings: Option<&ConfigSettings>,
        metadata_dir: Option<&Path>,
    ) -> Result<String> {
        build_wheel::build_wheel(self, wheel_dir, config_settings, metadata_dir)
    }

    /// Build an editable wheel into `wheel_dir` and return the result of the
    /// editable-install machinery unchanged.
    pub fn build_editable(
        &self,
        wheel_dir: &Path,
        config_settings: Option<&ConfigSettings>,
        metadata_dir: Option<&Path>,
    ) -> Result<String> {
        build_editable::build_editable(self, wheel_dir, config_settings, metadata_dir)
    }

    /// Resolve configuration and map sources to extension descriptors,
    /// without compiling anything.
    pub fn plan(&self) -> Result<(BuildConfig, Vec<ExtensionDescriptor>)> {
        let manifest = Manifest::load(&self.project_root)?;
        let config = BuildConfig::resolve(&manifest, &self.python)?;

        let sources = discover_sources(&config.package_dir, &config.sources, &config.exclude_dirs);
        let descriptors = build_descriptors(&sources, &config)?;

        tracing::debug!(
            "planned {} extension module(s) for {}",
            descriptors.len(),
            config.package_name
        );

        Ok((config, descriptors))
    }
}
