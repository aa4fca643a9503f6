//! Compiler and toolchain seams.
//!
//! The orchestrator drives two external tools: the source compiler that
//! turns each descriptor into a buildable translation unit, and the
//! extension-build toolchain that turns translation units into loadable
//! modules. Both sit behind traits so tests can substitute counting stubs
//! and so alternative toolchains can slot in without touching the
//! orchestration.

use std::path::PathBuf;

use crate::core::config::BuildConfig;
use crate::core::extension::ExtensionDescriptor;
use crate::core::module_name::ModuleName;
use crate::errors::CompileError;

/// A generated translation unit, ready for the extension-build toolchain.
#[derive(Debug, Clone)]
pub struct CompileUnit {
    /// The descriptor this unit was generated from
    pub descriptor: ExtensionDescriptor,

    /// Path to the generated C/C++ file
    pub translation_unit: PathBuf,
}

/// A loadable extension module on disk.
#[derive(Debug, Clone)]
pub struct Artifact {
    /// Fully-qualified module name
    pub module: ModuleName,

    /// Path to the compiled module
    pub path: PathBuf,
}

/// Transforms descriptors into buildable translation units.
pub trait SourceCompiler: Send + Sync {
    /// Compile all descriptors, honoring the configured parallelism,
    /// force-rebuild and annotation flags, compiler directives, and include
    /// search paths. All-or-nothing: any failure aborts the whole pass.
    fn compile(
        &self,
        descriptors: &[ExtensionDescriptor],
        config: &BuildConfig,
    ) -> Result<Vec<CompileUnit>, CompileError>;
}

/// Transforms translation units into loadable extension modules.
pub trait ExtensionToolchain: Send + Sync {
    /// Link every unit, honoring its library and runtime-library search
    /// paths. All-or-nothing: any failure aborts the whole pass.
    fn link(
        &self,
        units: &[CompileUnit],
        config: &BuildConfig,
    ) -> Result<Vec<Artifact>, CompileError>;
}
