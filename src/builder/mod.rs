//! Extension build pipeline.
//!
//! This module implements source discovery, the cython and C-compiler
//! drivers, and the single-pass compile orchestration.

pub mod compiler;
pub mod cython;
pub mod discover;
pub mod orchestrator;
pub mod toolchain;

pub use compiler::{Artifact, CompileUnit, ExtensionToolchain, SourceCompiler};
pub use cython::CythonCompiler;
pub use discover::{discover_sources, SOURCE_EXTENSION};
pub use orchestrator::BuildOrchestrator;
pub use toolchain::CcToolchain;
