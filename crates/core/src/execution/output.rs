//! Output aggregation
//!
//! Each running task produces a sequence of line events on a shared channel;
//! a single aggregator consumes them and writes to the program's own output
//! streams. Whole lines are the unit of forwarding, so concurrent tasks can
//! never interleave partial lines. Lines from the same task arrive in the
//! order the task wrote them; no ordering holds between different tasks.

use colored::*;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

/// Which of the child's streams a line came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreamKind {
    Stdout,
    Stderr,
}

/// One line of output from a running task
#[derive(Debug, Clone)]
pub struct OutputLine {
    pub task: String,
    pub stream: StreamKind,
    pub line: String,
}

/// Consumes task output lines and forwards them to stdout/stderr
pub struct OutputAggregator {
    rx: UnboundedReceiver<OutputLine>,
    print_labels: bool,
}

impl OutputAggregator {
    /// Create the output channel and its aggregator. Senders are cloned into
    /// each process runner; the aggregator exits once every sender is gone
    /// and the channel is drained.
    pub fn channel(print_labels: bool) -> (UnboundedSender<OutputLine>, Self) {
        let (tx, rx) = mpsc::unbounded_channel();
        (tx, Self { rx, print_labels })
    }

    pub async fn run(mut self) {
        while let Some(event) = self.rx.recv().await {
            let rendered = render_line(&event, self.print_labels);
            match event.stream {
                StreamKind::Stdout => println!("{rendered}"),
                StreamKind::Stderr => eprintln!("{rendered}"),
            }
        }
    }
}

pub(crate) fn render_line(event: &OutputLine, print_labels: bool) -> String {
    if print_labels {
        let label = format!("[{}]", event.task).color(get_task_color(&event.task));
        format!("{} {}", label, event.line)
    } else {
        event.line.clone()
    }
}

/// Get a consistent color for a task name
pub fn get_task_color(task_name: &str) -> Color {
    // Use a simple hash of the task name bytes for consistent colors
    let hash = task_name
        .bytes()
        .fold(0u64, |acc, b| acc.wrapping_mul(31).wrapping_add(b as u64));

    // Label colors distinct from conventional log colors (red/yellow/green)
    // so task labels stay readable next to status output
    let colors = [
        Color::TrueColor {
            r: 147,
            g: 112,
            b: 219,
        }, // Medium slate blue
        Color::TrueColor {
            r: 64,
            g: 224,
            b: 208,
        }, // Turquoise
        Color::TrueColor {
            r: 255,
            g: 140,
            b: 0,
        }, // Dark orange
        Color::TrueColor {
            r: 199,
            g: 21,
            b: 133,
        }, // Medium violet red
        Color::TrueColor {
            r: 72,
            g: 209,
            b: 204,
        }, // Medium turquoise
        Color::TrueColor {
            r: 138,
            g: 43,
            b: 226,
        }, // Blue violet
    ];

    colors[(hash % colors.len() as u64) as usize]
}
