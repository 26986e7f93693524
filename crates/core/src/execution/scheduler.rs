//! Task scheduling
//!
//! Drives process runners according to a plan and produces the aggregate
//! execution result. Sequential plans run one task at a time and stop at the
//! first failure; parallel plans start every task and let all of them run to
//! completion regardless of individual failures.

use tokio::task::JoinSet;

use crate::execution::output::OutputAggregator;
use crate::execution::process::{OutputSink, ProcessRunner, RunOutcome};
use crate::plan::{ExecutionMode, TaskPlan};
use crate::platform::Shell;

/// Configuration for the scheduler
#[derive(Debug, Default)]
pub struct SchedulerConfig {
    /// Prefix each forwarded line with the task's colored label
    /// (line-buffered output only)
    pub print_labels: bool,
}

/// Aggregate result over all task outcomes of one plan.
///
/// `outcomes` follows plan order regardless of actual completion order, so
/// the result is deterministic for a fixed plan. In sequential mode, tasks
/// that never started have no outcome at all.
#[derive(Debug)]
pub struct ExecutionResult {
    pub outcomes: Vec<RunOutcome>,
    pub success: bool,
}

impl ExecutionResult {
    fn from_outcomes(outcomes: Vec<RunOutcome>) -> Self {
        let success = outcomes.iter().all(RunOutcome::success);
        Self { outcomes, success }
    }

    /// The earliest failing outcome by plan order (not by completion time)
    pub fn first_failure(&self) -> Option<&RunOutcome> {
        self.outcomes.iter().find(|o| !o.success())
    }
}

/// Drives process runners according to a plan's execution mode
pub struct Scheduler {
    shell: Shell,
    config: SchedulerConfig,
}

impl Scheduler {
    pub fn new(shell: Shell) -> Self {
        Self {
            shell,
            config: SchedulerConfig::default(),
        }
    }

    pub fn with_config(shell: Shell, config: SchedulerConfig) -> Self {
        Self { shell, config }
    }

    /// Execute a plan to completion. An empty plan is a no-op success.
    pub async fn run(&self, plan: &TaskPlan) -> ExecutionResult {
        match plan.mode {
            ExecutionMode::Sequential => self.run_sequential(plan).await,
            ExecutionMode::Parallel => self.run_parallel(plan).await,
        }
    }

    async fn run_sequential(&self, plan: &TaskPlan) -> ExecutionResult {
        let runner = ProcessRunner::new(self.shell.clone());
        let mut outcomes = Vec::with_capacity(plan.len());

        for task in &plan.entries {
            let outcome = runner.run(task, OutputSink::Inherit).await;
            let failed = !outcome.success();
            outcomes.push(outcome);
            if failed {
                // Remaining tasks are never spawned and record no outcome
                break;
            }
        }

        ExecutionResult::from_outcomes(outcomes)
    }

    async fn run_parallel(&self, plan: &TaskPlan) -> ExecutionResult {
        let (tx, aggregator) = OutputAggregator::channel(self.config.print_labels);
        let forwarder = tokio::spawn(aggregator.run());

        let mut running = JoinSet::new();
        for (index, task) in plan.entries.iter().enumerate() {
            let runner = ProcessRunner::new(self.shell.clone());
            let task = task.clone();
            let tx = tx.clone();
            running.spawn(async move {
                (index, runner.run(&task, OutputSink::LineBuffered(tx)).await)
            });
        }
        drop(tx);

        let mut slots: Vec<Option<RunOutcome>> = (0..plan.len()).map(|_| None).collect();
        while let Some(joined) = running.join_next().await {
            if let Ok((index, outcome)) = joined {
                slots[index] = Some(outcome);
            }
        }

        // Every sender is gone once the tasks are done; the forwarder exits
        // after draining the channel
        let _ = forwarder.await;

        let outcomes = plan
            .entries
            .iter()
            .zip(slots)
            .map(|(task, slot)| {
                slot.unwrap_or_else(|| {
                    RunOutcome::failure(&task.name, "task aborted before completion")
                })
            })
            .collect();

        ExecutionResult::from_outcomes(outcomes)
    }
}
