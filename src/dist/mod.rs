//! Distribution assembly.
//!
//! The hook sequencer hands a `DistributionDescriptor` to an
//! `ArtifactPackager`; the production packager writes PEP 427 wheels and
//! PEP 660-style editable wheels. The trait seam keeps packaging swappable
//! and lets tests assert on the descriptor without writing archives.

pub mod editable;
pub mod wheel;

use std::path::Path;

use regex::Regex;

use crate::builder::compiler::Artifact;
use crate::core::config::BuildConfig;
use crate::errors::PackagingError;

pub use wheel::WheelPackager;

/// Package-data patterns covering compiled modules and declaration files.
const DEFAULT_PACKAGE_DATA: &[&str] = &["**/*.pxd", "**/*.so", "**/*.pyd"];

/// In-memory description of one distribution, built per hook call.
#[derive(Debug, Clone)]
pub struct DistributionDescriptor {
    /// Distribution name, as named in the manifest
    pub name: String,

    /// Distribution version
    pub version: String,

    /// Compiled artifacts from this build
    pub artifacts: Vec<Artifact>,

    /// Glob patterns (relative to the package dir) selecting package data
    pub package_data: Vec<String>,

    /// Whether the distribution is pure Python. Always false here: the
    /// package carries compiled, platform-specific code.
    pub purelib: bool,
}

impl DistributionDescriptor {
    /// Describe the distribution for one build.
    pub fn new(config: &BuildConfig, artifacts: Vec<Artifact>) -> Self {
        DistributionDescriptor {
            name: config.package_name.clone(),
            version: config.package_version.clone(),
            artifacts,
            package_data: DEFAULT_PACKAGE_DATA.iter().map(|s| s.to_string()).collect(),
            purelib: false,
        }
    }

    /// The escaped name used in wheel and dist-info file names.
    pub fn file_name_stem(&self) -> String {
        format!("{}-{}", normalize_name(&self.name), self.version)
    }

    /// Name of the `.dist-info` directory inside the wheel.
    pub fn dist_info_dir(&self) -> String {
        format!("{}.dist-info", self.file_name_stem())
    }
}

/// Normalize a distribution name for use in file names.
///
/// Runs of `-`, `_` and `.` collapse to a single underscore and the name is
/// lowercased, so `My-Pkg` and `my.pkg` produce the same wheel name.
pub fn normalize_name(name: &str) -> String {
    let re = Regex::new(r"[-_.]+").expect("static pattern");
    re.replace_all(&name.to_lowercase(), "_").into_owned()
}

/// Assembles distributions from a descriptor.
pub trait ArtifactPackager {
    /// Assemble a full wheel into `out_dir` and return its file name.
    fn pack_wheel(
        &self,
        dist: &DistributionDescriptor,
        config: &BuildConfig,
        out_dir: &Path,
    ) -> Result<String, PackagingError>;

    /// Assemble an editable wheel into `out_dir` and return its file name.
    ///
    /// The editable wheel references the in-place build tree through a
    /// `.pth` entry instead of carrying the package's files.
    fn pack_editable(
        &self,
        dist: &DistributionDescriptor,
        config: &BuildConfig,
        out_dir: &Path,
    ) -> Result<String, PackagingError>;
}
