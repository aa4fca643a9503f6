//! Extension-build toolchain.
//!
//! Turns generated translation units into loadable extension modules by
//! driving the host C/C++ compiler. The build is in-place: each module
//! lands beside its source, named with the interpreter's extension suffix,
//! which is the layout the editable install flow references.

use std::path::{Path, PathBuf};

use crate::builder::compiler::{Artifact, CompileUnit, ExtensionToolchain};
use crate::core::config::{BuildConfig, Language};
use crate::errors::CompileError;
use crate::util::process::{find_c_compiler, ProcessBuilder};
use crate::util::python::PythonEnv;

/// cc/gcc/clang driver for extension modules.
#[derive(Debug, Clone)]
pub struct CcToolchain {
    /// Path to the C compiler
    cc: PathBuf,
    /// Path to the C++ compiler
    cxx: PathBuf,
    /// Host interpreter facts (include dir, extension suffix)
    python: PythonEnv,
}

impl CcToolchain {
    /// Create a toolchain for a known C compiler, inferring its C++ driver.
    pub fn new(cc: impl Into<PathBuf>, python: PythonEnv) -> Self {
        let cc = cc.into();
        let cxx = Self::infer_cxx(&cc);
        CcToolchain { cc, cxx, python }
    }

    /// Locate a C compiler on PATH (honoring CC).
    pub fn detect(python: PythonEnv) -> Result<Self, CompileError> {
        find_c_compiler()
            .map(|cc| Self::new(cc, python))
            .ok_or_else(|| CompileError::ToolNotFound("cc".to_string()))
    }

    /// Infer the C++ compiler path from the C compiler path.
    ///
    /// Handles the common namings: gcc -> g++, clang -> clang++, cc -> c++.
    fn infer_cxx(cc: &Path) -> PathBuf {
        let cc_str = cc.to_string_lossy();

        if cc_str.ends_with("gcc") {
            return PathBuf::from(format!("{}++", &cc_str[..cc_str.len() - 2]));
        }

        if cc_str.ends_with("clang") {
            return PathBuf::from(format!("{}++", cc_str));
        }

        let is_standalone_cc =
            cc_str == "cc" || cc_str.ends_with("/cc") || cc_str.ends_with("-cc");
        if is_standalone_cc {
            return PathBuf::from(format!("{}++", &cc_str[..cc_str.len() - 1]));
        }

        PathBuf::from(format!("{}++", cc_str))
    }

    /// Where the loadable module for a unit lands: beside the source, with
    /// the interpreter's extension suffix.
    pub fn artifact_path(&self, unit: &CompileUnit) -> PathBuf {
        let source = &unit.descriptor.source;
        let stem = source
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        source.with_file_name(format!("{}{}", stem, self.python.ext_suffix))
    }

    /// Build the compile-and-link command for one unit.
    pub fn link_command(&self, unit: &CompileUnit, output: &Path) -> ProcessBuilder {
        let driver = match unit.descriptor.language {
            Language::C => &self.cc,
            Language::Cpp => &self.cxx,
        };

        let mut cmd = ProcessBuilder::new(driver)
            .arg("-shared")
            .arg("-fPIC")
            .arg("-O2")
            .arg("-I")
            .arg(&self.python.include_dir);

        cmd = cmd
            .arg("-o")
            .arg(output)
            .arg(&unit.translation_unit);

        for dir in &unit.descriptor.library_dirs {
            cmd = cmd.arg(format!("-L{}", dir.display()));
        }

        for dir in &unit.descriptor.runtime_library_dirs {
            cmd = cmd.arg(format!("-Wl,-rpath,{}", dir.display()));
        }

        cmd
    }
}

impl ExtensionToolchain for CcToolchain {
    fn link(
        &self,
        units: &[CompileUnit],
        _config: &BuildConfig,
    ) -> Result<Vec<Artifact>, CompileError> {
        let mut artifacts = Vec::with_capacity(units.len());

        for unit in units {
            let output = self.artifact_path(unit);
            tracing::debug!("linking {}", unit.descriptor.module);
            self.link_command(unit, &output).exec_and_check()?;

            artifacts.push(Artifact {
                module: unit.descriptor.module.clone(),
                path: output,
            });
        }

        Ok(artifacts)
    }
}
