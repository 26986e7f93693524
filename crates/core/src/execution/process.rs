//! Process execution
//!
//! Spawns one task as an external process through the configured shell and
//! reports its terminal status. Output is captured incrementally: in
//! line-buffered mode each stream is read line by line as it arrives and
//! forwarded to the output channel, never buffered whole.

use std::process::{ExitStatus, Stdio};

use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};
use tokio::process::Command;
use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;

use crate::execution::output::{OutputLine, StreamKind};
use crate::manifest::TaskDeclaration;
use crate::platform::Shell;

/// Where a running task's output streams are routed
pub enum OutputSink {
    /// The child inherits the program's stdio directly. Used in sequential
    /// mode, where only one task runs at a time and no interleaving is
    /// possible.
    Inherit,
    /// Lines are forwarded through the aggregator channel (parallel mode)
    LineBuffered(UnboundedSender<OutputLine>),
}

/// Terminal status of one executed task. Immutable once created.
#[derive(Debug, Clone)]
pub struct RunOutcome {
    pub name: String,
    /// Exit code, absent when the process was killed by a signal
    pub exit_code: Option<i32>,
    /// Terminating signal, when applicable (Unix)
    pub signal: Option<i32>,
    /// Spawn or wait failure; the process never ran (or its status is unknown)
    pub error: Option<String>,
}

impl RunOutcome {
    pub fn success(&self) -> bool {
        self.error.is_none() && self.signal.is_none() && self.exit_code == Some(0)
    }

    /// Human-readable reason for a failed outcome
    pub fn failure_reason(&self) -> String {
        if let Some(error) = &self.error {
            return error.clone();
        }
        if let Some(signal) = self.signal {
            return format!("killed by signal {signal}");
        }
        format!("exited with code {}", self.exit_code.unwrap_or(-1))
    }

    pub(crate) fn failure(name: &str, message: impl Into<String>) -> Self {
        Self {
            name: name.to_string(),
            exit_code: None,
            signal: None,
            error: Some(message.into()),
        }
    }

    fn from_status(name: &str, status: ExitStatus) -> Self {
        Self {
            name: name.to_string(),
            exit_code: status.code(),
            signal: terminating_signal(status),
            error: None,
        }
    }
}

#[cfg(unix)]
fn terminating_signal(status: ExitStatus) -> Option<i32> {
    use std::os::unix::process::ExitStatusExt;
    status.signal()
}

#[cfg(not(unix))]
fn terminating_signal(_status: ExitStatus) -> Option<i32> {
    None
}

/// Spawns one task as an external process and waits for it to terminate
pub struct ProcessRunner {
    shell: Shell,
}

impl ProcessRunner {
    pub fn new(shell: Shell) -> Self {
        Self { shell }
    }

    /// Run one task to completion. A spawn failure (missing shell,
    /// permission denied) is reported in the outcome, never as a panic.
    pub async fn run(&self, task: &TaskDeclaration, sink: OutputSink) -> RunOutcome {
        let mut cmd = Command::new(&self.shell.program);
        cmd.arg(self.shell.command_flag).arg(&task.command);

        match sink {
            OutputSink::Inherit => {
                cmd.stdin(Stdio::inherit())
                    .stdout(Stdio::inherit())
                    .stderr(Stdio::inherit());

                let mut child = match cmd.spawn() {
                    Ok(child) => child,
                    Err(e) => {
                        return RunOutcome::failure(
                            &task.name,
                            format!("Failed to spawn '{}': {}", task.command, e),
                        )
                    }
                };

                match child.wait().await {
                    Ok(status) => RunOutcome::from_status(&task.name, status),
                    Err(e) => RunOutcome::failure(
                        &task.name,
                        format!("Failed to wait for '{}': {}", task.command, e),
                    ),
                }
            }
            OutputSink::LineBuffered(tx) => {
                cmd.stdin(Stdio::null())
                    .stdout(Stdio::piped())
                    .stderr(Stdio::piped());

                let mut child = match cmd.spawn() {
                    Ok(child) => child,
                    Err(e) => {
                        return RunOutcome::failure(
                            &task.name,
                            format!("Failed to spawn '{}': {}", task.command, e),
                        )
                    }
                };

                let stdout_reader = child
                    .stdout
                    .take()
                    .map(|out| forward_lines(task.name.clone(), StreamKind::Stdout, out, tx.clone()));
                let stderr_reader = child
                    .stderr
                    .take()
                    .map(|err| forward_lines(task.name.clone(), StreamKind::Stderr, err, tx));

                let waited = child.wait().await;

                // Drain any lines still buffered in the pipes before reporting
                if let Some(handle) = stdout_reader {
                    let _ = handle.await;
                }
                if let Some(handle) = stderr_reader {
                    let _ = handle.await;
                }

                match waited {
                    Ok(status) => RunOutcome::from_status(&task.name, status),
                    Err(e) => RunOutcome::failure(
                        &task.name,
                        format!("Failed to wait for '{}': {}", task.command, e),
                    ),
                }
            }
        }
    }
}

fn forward_lines<R>(
    task: String,
    stream: StreamKind,
    source: R,
    tx: UnboundedSender<OutputLine>,
) -> JoinHandle<()>
where
    R: AsyncRead + Unpin + Send + 'static,
{
    tokio::spawn(async move {
        let mut lines = BufReader::new(source).lines();
        while let Ok(Some(line)) = lines.next_line().await {
            // A closed channel means the aggregator is gone; stop reading
            if tx.send(OutputLine {
                task: task.clone(),
                stream,
                line,
            })
            .is_err()
            {
                break;
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::mpsc;

    fn task(name: &str, command: &str) -> TaskDeclaration {
        TaskDeclaration {
            name: name.to_string(),
            command: command.to_string(),
            description: None,
        }
    }

    fn runner() -> ProcessRunner {
        ProcessRunner::new(Shell::host_default())
    }

    async fn run_captured(command: &str) -> (RunOutcome, Vec<OutputLine>) {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let outcome = runner()
            .run(&task("test", command), OutputSink::LineBuffered(tx))
            .await;

        let mut lines = Vec::new();
        while let Some(line) = rx.recv().await {
            lines.push(line);
        }
        (outcome, lines)
    }

    #[tokio::test]
    async fn test_zero_exit_is_success() {
        let (outcome, _) = run_captured("exit 0").await;
        assert!(outcome.success());
        assert_eq!(outcome.exit_code, Some(0));
        assert!(outcome.error.is_none());
    }

    #[tokio::test]
    async fn test_nonzero_exit_is_failure() {
        let (outcome, _) = run_captured("exit 3").await;
        assert!(!outcome.success());
        assert_eq!(outcome.exit_code, Some(3));
        assert!(
            outcome.failure_reason().contains('3'),
            "Reason should carry the exit code: {}",
            outcome.failure_reason()
        );
    }

    #[tokio::test]
    async fn test_stdout_lines_arrive_in_order() {
        let (outcome, lines) = run_captured("printf 'one\\ntwo\\n'").await;
        assert!(outcome.success());

        let texts: Vec<&str> = lines
            .iter()
            .filter(|l| l.stream == StreamKind::Stdout)
            .map(|l| l.line.as_str())
            .collect();
        assert_eq!(texts, vec!["one", "two"]);
    }

    #[tokio::test]
    async fn test_stderr_lines_are_tagged() {
        let (outcome, lines) = run_captured("echo oops 1>&2").await;
        assert!(outcome.success());
        assert!(
            lines
                .iter()
                .any(|l| l.stream == StreamKind::Stderr && l.line == "oops"),
            "Stderr output should be forwarded with its stream kind"
        );
    }

    #[tokio::test]
    async fn test_missing_shell_is_reported_not_panicked() {
        let runner = ProcessRunner::new(Shell::with_program("/nonexistent/globrun-shell"));
        let (tx, _rx) = mpsc::unbounded_channel();
        let outcome = runner
            .run(&task("test", "echo hi"), OutputSink::LineBuffered(tx))
            .await;

        assert!(!outcome.success());
        assert!(outcome.error.is_some());
        assert!(outcome.exit_code.is_none());
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_signal_termination_is_recorded() {
        let (outcome, _) = run_captured("kill -TERM $$").await;
        assert!(!outcome.success());
        assert_eq!(outcome.signal, Some(15));
        assert!(outcome.failure_reason().contains("signal"));
    }
}
