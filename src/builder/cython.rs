//! Cython source compiler.
//!
//! Drives the `cython` executable to turn each `.pyx` descriptor into a C or
//! C++ translation unit, written beside the source. Transpiles run in
//! parallel up to the configured thread count; a failure in any unit aborts
//! the whole pass.

use std::path::{Path, PathBuf};
use std::time::SystemTime;

use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;

use crate::builder::compiler::{CompileUnit, SourceCompiler};
use crate::core::config::{BuildConfig, Language};
use crate::core::extension::ExtensionDescriptor;
use crate::errors::CompileError;
use crate::util::process::{find_cython, ProcessBuilder};

/// Cython transpiler driver.
#[derive(Debug, Clone)]
pub struct CythonCompiler {
    /// Path to the cython executable
    cython: PathBuf,
}

impl CythonCompiler {
    /// Create a driver for a known cython executable.
    pub fn new(cython: impl Into<PathBuf>) -> Self {
        CythonCompiler {
            cython: cython.into(),
        }
    }

    /// Locate cython on PATH.
    pub fn detect() -> Result<Self, CompileError> {
        find_cython()
            .map(Self::new)
            .ok_or_else(|| CompileError::ToolNotFound("cython".to_string()))
    }

    /// Where the generated translation unit for a descriptor lands.
    pub fn translation_unit_path(descriptor: &ExtensionDescriptor) -> PathBuf {
        descriptor
            .source
            .with_extension(descriptor.language.source_extension())
    }

    /// Build the transpile command for one descriptor.
    pub fn transpile_command(
        &self,
        descriptor: &ExtensionDescriptor,
        config: &BuildConfig,
        output: &Path,
    ) -> ProcessBuilder {
        let mut cmd = ProcessBuilder::new(&self.cython).arg("--fast-fail");

        if descriptor.language == Language::Cpp {
            cmd = cmd.arg("--cplus");
        }

        if config.annotate {
            cmd = cmd.arg("-a");
        }

        // Include search paths let cython find .pxd declaration files.
        for dir in &config.include_dirs {
            cmd = cmd.arg("-I").arg(dir);
        }

        for (key, value) in &config.compiler_directives {
            cmd = cmd
                .arg("-X")
                .arg(format!("{}={}", key, directive_literal(value)));
        }

        cmd.arg("-o").arg(output).arg(&descriptor.source)
    }

    /// Transpile one descriptor, skipping work that is already up to date
    /// unless a rebuild is forced.
    fn transpile(
        &self,
        descriptor: &ExtensionDescriptor,
        config: &BuildConfig,
    ) -> Result<CompileUnit, CompileError> {
        let output = Self::translation_unit_path(descriptor);

        if !config.force && is_fresh(&descriptor.source, &output) {
            tracing::debug!("{} is up to date", descriptor.module);
        } else {
            tracing::debug!("transpiling {}", descriptor.module);
            self.transpile_command(descriptor, config, &output)
                .exec_and_check()?;
        }

        Ok(CompileUnit {
            descriptor: descriptor.clone(),
            translation_unit: output,
        })
    }
}

impl SourceCompiler for CythonCompiler {
    fn compile(
        &self,
        descriptors: &[ExtensionDescriptor],
        config: &BuildConfig,
    ) -> Result<Vec<CompileUnit>, CompileError> {
        if descriptors.is_empty() {
            return Ok(Vec::new());
        }

        // Set up rayon thread pool
        if config.nthreads > 0 {
            rayon::ThreadPoolBuilder::new()
                .num_threads(config.nthreads)
                .build_global()
                .ok(); // Ignore if already set
        }

        tracing::info!("cythonizing {} extension module(s)", descriptors.len());

        let pb = if descriptors.len() > 1 {
            let pb = ProgressBar::new(descriptors.len() as u64);
            pb.set_style(
                ProgressStyle::default_bar()
                    .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
                    .unwrap()
                    .progress_chars("#>-"),
            );
            Some(pb)
        } else {
            None
        };

        let units: Result<Vec<CompileUnit>, CompileError> = descriptors
            .par_iter()
            .map(|descriptor| {
                let unit = self.transpile(descriptor, config);
                if let Some(ref pb) = pb {
                    pb.inc(1);
                }
                unit
            })
            .collect();

        if let Some(pb) = pb {
            pb.finish_and_clear();
        }

        units
    }
}

/// Render a directive value as the Python literal cython expects on the
/// command line (`boundscheck=False`, `language_level=3`).
fn directive_literal(value: &toml::Value) -> String {
    match value {
        toml::Value::Boolean(true) => "True".to_string(),
        toml::Value::Boolean(false) => "False".to_string(),
        toml::Value::String(s) => s.clone(),
        toml::Value::Integer(i) => i.to_string(),
        toml::Value::Float(f) => f.to_string(),
        other => other.to_string(),
    }
}

fn is_fresh(source: &Path, output: &Path) -> bool {
    fn mtime(path: &Path) -> Option<SystemTime> {
        std::fs::metadata(path).and_then(|m| m.modified()).ok()
    }

    match (mtime(source), mtime(output)) {
        (Some(src), Some(out)) => out >= src,
        _ => false,
    }
}
