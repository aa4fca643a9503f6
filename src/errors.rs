//! Backend error types.
//!
//! The taxonomy mirrors the three ways a build can fail: bad manifest input
//! (`ConfigError`), a compiler or linker failure (`CompileError`), and a
//! packaging step that did not produce the expected artifact
//! (`PackagingError`). All three surface to the host orchestrator unmodified;
//! nothing here is retried or downgraded to a warning.

use std::path::PathBuf;

use thiserror::Error;

/// Bad or ambiguous manifest input. Fatal, surfaced immediately.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("pyproject.toml not found in {}", .0.display())]
    ManifestNotFound(PathBuf),

    #[error("failed to read {}: {source}", .path.display())]
    ManifestRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid pyproject.toml: {0}")]
    ManifestParse(#[from] toml::de::Error),

    #[error("pyproject.toml is missing `project.name`")]
    MissingName,

    #[error("pyproject.toml is missing `project.version`")]
    MissingVersion,

    #[error("unsupported extension language `{0}` (expected `c` or `c++`)")]
    UnsupportedLanguage(String),

    #[error(
        "sources `{}` and `{}` both map to module `{module}`",
        .first.display(),
        .second.display()
    )]
    AmbiguousModule {
        module: String,
        first: PathBuf,
        second: PathBuf,
    },

    #[error(
        "source `{}` is not under the package directory `{}`",
        .path.display(),
        .package_dir.display()
    )]
    SourceOutsidePackage { path: PathBuf, package_dir: PathBuf },

    #[error("could not query the Python interpreter: {0}")]
    InterpreterProbe(String),
}

/// Native compiler or linker failure.
///
/// Tool output is passed through verbatim so the host sees exactly what the
/// toolchain reported. A partial failure aborts the whole pass; no artifact
/// set escapes.
#[derive(Debug, Error)]
pub enum CompileError {
    #[error("could not locate `{0}` on PATH")]
    ToolNotFound(String),

    #[error("failed to spawn `{command}`: {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("`{command}` exited with {status}:\n{stderr}")]
    ToolFailure {
        command: String,
        status: String,
        stderr: String,
    },

    #[error("failed to prepare build output at {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// The assembly step did not produce an expected artifact.
#[derive(Debug, Error)]
pub enum PackagingError {
    #[error("no wheel was produced in {}", .0.display())]
    MissingArtifact(PathBuf),

    #[error("failed to stage {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write wheel archive: {0}")]
    Archive(#[from] zip::result::ZipError),

    #[error("invalid package-data pattern: {0}")]
    BadPattern(String),
}

/// Any error a hook entry point can surface to the host.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Compile(#[from] CompileError),

    #[error(transparent)]
    Packaging(#[from] PackagingError),
}

pub type Result<T> = std::result::Result<T, Error>;
