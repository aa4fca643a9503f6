//! Python interpreter discovery.
//!
//! The backend needs a handful of facts about the host interpreter: where
//! site-packages lives (appended to every search-path list so compiled
//! extensions can find shared dependencies), the C include directory, the
//! extension-module suffix, and the tag triple used in wheel file names.
//! All of it comes from one probe run; everything downstream takes a
//! `PythonEnv` value, so tests can construct one without an interpreter.

use std::path::PathBuf;

use crate::errors::ConfigError;
use crate::util::process::{find_python, ProcessBuilder};

const PROBE_SCRIPT: &str = "\
import site, sys, sysconfig
print('cp%d%d' % (sys.version_info[0], sys.version_info[1]))
print(sysconfig.get_config_var('EXT_SUFFIX'))
print(sysconfig.get_paths()['include'])
print(site.getsitepackages()[0])
print(sysconfig.get_platform())
";

/// Facts about the host Python interpreter.
#[derive(Debug, Clone)]
pub struct PythonEnv {
    /// Path to the interpreter
    pub executable: PathBuf,

    /// Python tag for wheel naming (e.g. "cp312")
    pub python_tag: String,

    /// ABI tag for wheel naming (same as the python tag on CPython)
    pub abi_tag: String,

    /// Platform tag for wheel naming (e.g. "linux_x86_64")
    pub platform_tag: String,

    /// Extension module suffix (e.g. ".cpython-312-x86_64-linux-gnu.so")
    pub ext_suffix: String,

    /// C include directory containing Python.h
    pub include_dir: PathBuf,

    /// The interpreter's site-packages directory
    pub site_packages: PathBuf,
}

impl PythonEnv {
    /// Probe the host interpreter.
    pub fn detect() -> Result<Self, ConfigError> {
        let executable = find_python()
            .ok_or_else(|| ConfigError::InterpreterProbe("no python interpreter on PATH".into()))?;

        let output = ProcessBuilder::new(&executable)
            .arg("-c")
            .arg(PROBE_SCRIPT)
            .exec_and_check()
            .map_err(|e| ConfigError::InterpreterProbe(e.to_string()))?;

        Self::parse(executable, &String::from_utf8_lossy(&output.stdout))
    }

    /// Parse the probe output.
    fn parse(executable: PathBuf, stdout: &str) -> Result<Self, ConfigError> {
        let mut lines = stdout.lines().map(str::trim);
        let mut next = |what: &str| {
            lines
                .next()
                .filter(|l| !l.is_empty())
                .map(str::to_string)
                .ok_or_else(|| ConfigError::InterpreterProbe(format!("probe omitted {}", what)))
        };

        let python_tag = next("version tag")?;
        let ext_suffix = next("extension suffix")?;
        let include_dir = PathBuf::from(next("include directory")?);
        let site_packages = PathBuf::from(next("site-packages")?);
        let platform = next("platform")?;

        Ok(PythonEnv {
            executable,
            abi_tag: python_tag.clone(),
            python_tag,
            platform_tag: platform.replace(['-', '.'], "_"),
            ext_suffix,
            include_dir,
            site_packages,
        })
    }

    /// The `{python}-{abi}-{platform}` tag triple for wheel file names.
    pub fn wheel_tag(&self) -> String {
        format!("{}-{}-{}", self.python_tag, self.abi_tag, self.platform_tag)
    }
}
