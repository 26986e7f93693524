//! Task execution module
//!
//! This module handles the actual execution of planned tasks including
//! process spawning, output aggregation, and result reporting.

pub mod output;
pub mod process;
pub mod scheduler;

pub use output::{OutputAggregator, OutputLine, StreamKind};
pub use process::{OutputSink, ProcessRunner, RunOutcome};
pub use scheduler::{ExecutionResult, Scheduler, SchedulerConfig};
