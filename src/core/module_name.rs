//! Dotted module name resolution.
//!
//! Maps a discovered source file onto the fully-qualified module name it
//! becomes at import time. The mapping respects nested package directories:
//! a file's intermediate directories become name segments, and a package
//! initializer contributes the containing package's name rather than its
//! own stem.

use std::fmt;
use std::path::Path;

use serde::Serialize;

use crate::errors::ConfigError;

/// File name that marks a source as a package initializer.
pub const PACKAGE_INITIALIZER: &str = "__init__.pyx";

/// A fully-qualified, dot-separated module name (e.g. `demo.core.base`).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct ModuleName(String);

impl ModuleName {
    /// Resolve a source file to its dotted module name.
    ///
    /// The segments are the package name followed by the file's intermediate
    /// directories under `package_dir`. The file's own stem is appended
    /// unless it is a package initializer, in which case the file stands for
    /// the containing package itself. Works at arbitrary nesting depth:
    ///
    /// - `demo/__init__.pyx` -> `demo`
    /// - `demo/core/base.pyx` -> `demo.core.base`
    /// - `demo/core/__init__.pyx` -> `demo.core`
    pub fn resolve(
        source: &Path,
        package_dir: &Path,
        package_name: &str,
    ) -> Result<Self, ConfigError> {
        let rel = source
            .strip_prefix(package_dir)
            .map_err(|_| ConfigError::SourceOutsidePackage {
                path: source.to_path_buf(),
                package_dir: package_dir.to_path_buf(),
            })?;

        let mut segments = vec![package_name.to_string()];

        if let Some(parent) = rel.parent() {
            for component in parent.components() {
                let part = component.as_os_str().to_string_lossy();
                if part != "." {
                    segments.push(part.into_owned());
                }
            }
        }

        let is_initializer = rel
            .file_name()
            .is_some_and(|name| name == PACKAGE_INITIALIZER);

        if !is_initializer {
            if let Some(stem) = rel.file_stem() {
                segments.push(stem.to_string_lossy().into_owned());
            }
        }

        Ok(ModuleName(segments.join(".")))
    }

    /// The full dotted name.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The final name segment (e.g. `base` for `demo.core.base`).
    pub fn leaf(&self) -> &str {
        self.0.rsplit('.').next().unwrap_or(&self.0)
    }
}

impl fmt::Display for ModuleName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn resolve(rel: &str) -> ModuleName {
        let package_dir = PathBuf::from("demo");
        ModuleName::resolve(&package_dir.join(rel), &package_dir, "demo").unwrap()
    }

    #[test]
    fn test_top_level_module() {
        assert_eq!(resolve("base.pyx").as_str(), "demo.base");
    }

    #[test]
    fn test_package_initializer_keeps_package_name() {
        assert_eq!(resolve("__init__.pyx").as_str(), "demo");
    }

    #[test]
    fn test_nested_module() {
        assert_eq!(resolve("core/base.pyx").as_str(), "demo.core.base");
    }

    #[test]
    fn test_nested_package_initializer() {
        assert_eq!(resolve("core/__init__.pyx").as_str(), "demo.core");
    }

    #[test]
    fn test_deeply_nested_initializer() {
        assert_eq!(
            resolve("core/sub/inner/__init__.pyx").as_str(),
            "demo.core.sub.inner"
        );
    }

    #[test]
    fn test_source_outside_package_rejected() {
        let result = ModuleName::resolve(
            Path::new("elsewhere/base.pyx"),
            Path::new("demo"),
            "demo",
        );
        assert!(matches!(
            result,
            Err(ConfigError::SourceOutsidePackage { .. })
        ));
    }

    #[test]
    fn test_leaf() {
        assert_eq!(resolve("core/base.pyx").leaf(), "base");
        assert_eq!(resolve("__init__.pyx").leaf(), "demo");
    }
}
