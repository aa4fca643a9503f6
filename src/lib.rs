//! Pyxis - a PEP 517 build backend for Cython extension packages
//!
//! This crate provides the core library functionality for pyxis:
//! configuration resolution, extension source discovery, module-name
//! mapping, single-pass compile orchestration, and wheel assembly.

pub mod builder;
pub mod core;
pub mod dist;
pub mod errors;
pub mod ops;
pub mod util;

pub use crate::core::{BuildConfig, ExtensionDescriptor, Language, Manifest, ModuleName};

pub use builder::{Artifact, BuildOrchestrator, CcToolchain, CythonCompiler};
pub use dist::{ArtifactPackager, DistributionDescriptor, WheelPackager};
pub use errors::{CompileError, ConfigError, Error, PackagingError};
pub use ops::{Backend, ConfigSettings};
pub use util::PythonEnv;
