//! Core data structures for pyxis.
//!
//! This module contains the foundational types used throughout the backend:
//! the parsed manifest, the resolved build configuration, dotted module
//! names, and per-module extension descriptors.

pub mod config;
pub mod extension;
pub mod manifest;
pub mod module_name;

pub use config::{BuildConfig, Language};
pub use extension::{build_descriptors, ExtensionDescriptor};
pub use manifest::{Manifest, MANIFEST_NAME};
pub use module_name::{ModuleName, PACKAGE_INITIALIZER};
