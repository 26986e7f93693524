use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use globrun_core::engine::{EngineConfig, TaskEngine};
use globrun_core::plan::ExecutionMode;

mod commands;

/// globrun - run manifest tasks by glob pattern
#[derive(Parser)]
#[command(name = "globrun")]
#[command(about = "Run named tasks from the project manifest by glob-like pattern")]
#[command(version)]
struct Cli {
    /// Path to the project root (defaults to current directory)
    #[arg(short = 'C', long = "dir", default_value = ".")]
    dir: PathBuf,

    /// Prefix each forwarded output line with the task's colored label
    #[arg(short = 'l', long, global = true)]
    print_label: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run matched tasks, sequentially by default
    Run {
        /// Task patterns; the literal `---` starts a new plan group,
        /// `---s` / `---p` start one with an explicit mode
        #[arg(required = true, allow_hyphen_values = true)]
        patterns: Vec<String>,

        /// Run tasks within each group in parallel
        #[arg(short, long)]
        parallel: bool,
    },
    /// Run matched tasks strictly in sequence
    Seq {
        /// Task patterns; the literal `---` starts a new plan group,
        /// `---s` / `---p` start one with an explicit mode
        #[arg(required = true, allow_hyphen_values = true)]
        patterns: Vec<String>,
    },
    /// Run matched tasks concurrently
    Par {
        /// Task patterns; the literal `---` starts a new plan group,
        /// `---s` / `---p` start one with an explicit mode
        #[arg(required = true, allow_hyphen_values = true)]
        patterns: Vec<String>,
    },
    /// List tasks declared in the manifest
    List,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load the manifest once; every command works off the same engine
    let engine = TaskEngine::new(EngineConfig {
        project_root: cli.dir,
        print_labels: cli.print_label,
    })
    .map_err(|e| anyhow::anyhow!("Failed to initialize project: {}", e))?;

    match cli.command {
        Commands::Run { patterns, parallel } => {
            let mode = if parallel {
                ExecutionMode::Parallel
            } else {
                ExecutionMode::Sequential
            };
            commands::run::execute(&engine, &patterns, mode).await
        }
        Commands::Seq { patterns } => {
            commands::run::execute(&engine, &patterns, ExecutionMode::Sequential).await
        }
        Commands::Par { patterns } => {
            commands::run::execute(&engine, &patterns, ExecutionMode::Parallel).await
        }
        Commands::List => commands::list::execute(&engine),
    }
}
