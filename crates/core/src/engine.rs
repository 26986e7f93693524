//! High-level task engine interface
//!
//! This module provides the [`TaskEngine`] which serves as the primary
//! programmatic entry point. It loads the project manifest once, then
//! resolves patterns into plans and executes them.
//!
//! The engine abstracts away:
//! - Manifest discovery and parsing
//! - Shell selection (platform default or manifest override)
//! - Pattern resolution and plan construction
//! - Scheduling and result aggregation
//!
//! ## Example
//!
//! ```rust,no_run
//! use globrun_core::engine::{EngineConfig, TaskEngine};
//! use globrun_core::plan::ExecutionMode;
//! use std::path::PathBuf;
//!
//! # async fn example() -> globrun_core::types::GlobrunResult<()> {
//! let engine = TaskEngine::new(EngineConfig {
//!     project_root: PathBuf::from("."),
//!     print_labels: false,
//! })?;
//!
//! let result = engine
//!     .run_patterns(&["build:*".to_string()], ExecutionMode::Sequential)
//!     .await?;
//! assert!(result.success);
//! # Ok(())
//! # }
//! ```

use std::path::PathBuf;

use crate::execution::scheduler::{ExecutionResult, Scheduler, SchedulerConfig};
use crate::manifest::{load_manifest, ManifestConfig, TaskDeclaration};
use crate::plan::{ExecutionMode, TaskPlan};
use crate::platform::Shell;
use crate::types::GlobrunResult;

/// Configuration for initializing a task engine
pub struct EngineConfig {
    pub project_root: PathBuf,
    /// Prefix parallel output lines with colored task labels
    pub print_labels: bool,
}

/// High-level engine that resolves patterns and orchestrates task runs
pub struct TaskEngine {
    manifest: ManifestConfig,
    shell: Shell,
    print_labels: bool,
}

impl TaskEngine {
    /// Initialize an engine by loading the manifest from the project root
    pub fn new(config: EngineConfig) -> GlobrunResult<Self> {
        let manifest = load_manifest(&config.project_root)?;
        Ok(Self::with_manifest(manifest, config.print_labels))
    }

    /// Build an engine from an already-parsed manifest
    pub fn with_manifest(manifest: ManifestConfig, print_labels: bool) -> Self {
        let shell = match &manifest.shell {
            Some(program) => Shell::with_program(program),
            None => Shell::host_default(),
        };

        Self {
            manifest,
            shell,
            print_labels,
        }
    }

    /// The declared tasks, in declaration order
    pub fn tasks(&self) -> &[TaskDeclaration] {
        &self.manifest.tasks
    }

    /// Resolve patterns into an execution plan without running anything
    pub fn plan(&self, patterns: &[String], mode: ExecutionMode) -> GlobrunResult<TaskPlan> {
        TaskPlan::resolve(patterns, &self.manifest.tasks, mode)
    }

    /// Execute an already-resolved plan
    pub async fn run_plan(&self, plan: &TaskPlan) -> ExecutionResult {
        let scheduler = Scheduler::with_config(
            self.shell.clone(),
            SchedulerConfig {
                print_labels: self.print_labels,
            },
        );
        scheduler.run(plan).await
    }

    /// Resolve patterns and execute the matched tasks.
    ///
    /// Planning-time failures (pattern not found, bad manifest) are returned
    /// as `Err`. Task failures come back as a finalized result with
    /// `success == false`; the caller decides what exit status that maps to.
    pub async fn run_patterns(
        &self,
        patterns: &[String],
        mode: ExecutionMode,
    ) -> GlobrunResult<ExecutionResult> {
        let plan = self.plan(patterns, mode)?;
        Ok(self.run_plan(&plan).await)
    }
}
