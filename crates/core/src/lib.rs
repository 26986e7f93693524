//! globrun Core Library
//!
//! This is the core library for the globrun task runner. It resolves
//! glob-like patterns against the tasks declared in a project manifest and
//! runs the matched set sequentially or in parallel, aggregating their exit
//! status.
//!
//! ## Architecture
//!
//! The core library is organized into several modules:
//!
//! - [`engine`] - High-level engine interface (resolve + run)
//! - [`manifest`] - Project manifest parsing and discovery
//! - [`pattern`] - Pattern resolution against declared task names
//! - [`plan`] - Execution plans and modes
//! - [`execution`] - Process spawning, output aggregation, and scheduling
//! - [`platform`] - Host shell selection
//! - [`types`] - Common error types and type aliases
//!
//! ## Usage
//!
//! The primary entry point is the [`TaskEngine`] which loads the manifest
//! once and exposes plan/run operations:
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
//!     .run_patterns(&["test:*".to_string()], ExecutionMode::Parallel)
//!     .await?;
//! # Ok(())
//! # }
//! ```

pub mod engine;
pub mod execution;
pub mod manifest;
pub mod pattern;
pub mod plan;
pub mod platform;
pub mod types;

// Re-export the main types for easier usage
pub use engine::{EngineConfig, TaskEngine};
pub use execution::{ExecutionResult, RunOutcome};
pub use plan::{ExecutionMode, TaskPlan};
pub use types::{GlobrunError, GlobrunResult};
