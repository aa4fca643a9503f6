//! Compile orchestration with a process-wide single-build guard.

use std::sync::Mutex;

use crate::builder::compiler::{Artifact, ExtensionToolchain, SourceCompiler};
use crate::core::config::BuildConfig;
use crate::core::extension::ExtensionDescriptor;
use crate::errors::CompileError;

/// Whether a compile pass has already run in this process.
#[derive(Debug)]
enum BuildState {
    Pending,
    Built(Vec<Artifact>),
}

/// Drives the source compiler and the extension toolchain, at most once per
/// process lifetime.
///
/// Both hook entry points call [`compile_all`](Self::compile_all); the state
/// guard makes the second call a no-op that returns the first pass's
/// artifacts, so the two flows share one compile without risking a divergent
/// rebuild. The guard is checked and set under a mutex, so concurrent hook
/// invocations cannot race into a double compile. A failed pass leaves the
/// state untouched and yields no artifacts.
pub struct BuildOrchestrator {
    compiler: Box<dyn SourceCompiler>,
    toolchain: Box<dyn ExtensionToolchain>,
    state: Mutex<BuildState>,
}

impl BuildOrchestrator {
    /// Create an orchestrator. One instance is constructed per process and
    /// handed to both hook entry points.
    pub fn new(compiler: Box<dyn SourceCompiler>, toolchain: Box<dyn ExtensionToolchain>) -> Self {
        BuildOrchestrator {
            compiler,
            toolchain,
            state: Mutex::new(BuildState::Pending),
        }
    }

    /// Compile all descriptors into loadable artifacts.
    ///
    /// Zero descriptors is a valid no-op build. On the second and later
    /// calls within one process, neither tool is invoked again.
    pub fn compile_all(
        &self,
        descriptors: &[ExtensionDescriptor],
        config: &BuildConfig,
    ) -> Result<Vec<Artifact>, CompileError> {
        let mut state = self.state.lock().unwrap_or_else(|e| e.into_inner());

        if let BuildState::Built(ref artifacts) = *state {
            tracing::debug!("extensions already built in this process, skipping");
            return Ok(artifacts.clone());
        }

        tracing::info!(
            "building {} extension module(s) for {}",
            descriptors.len(),
            config.package_name
        );

        let units = self.compiler.compile(descriptors, config)?;
        let artifacts = self.toolchain.link(&units, config)?;

        *state = BuildState::Built(artifacts.clone());
        Ok(artifacts)
    }

    /// Whether a compile pass has completed in this process.
    pub fn is_built(&self) -> bool {
        matches!(
            *self.state.lock().unwrap_or_else(|e| e.into_inner()),
            BuildState::Built(_)
        )
    }
}
