use anyhow::Result;
use colored::*;
use globrun_core::engine::TaskEngine;
use globrun_core::plan::ExecutionMode;

/// Boundary token between plan groups. `---` keeps the command's default
/// mode; `---s` and `---p` force the next group sequential or parallel,
/// which is how mixed compositions are written
/// (`globrun run build ---p watch:assets watch:server`).
const GROUP_BOUNDARY: &str = "---";
const GROUP_BOUNDARY_SEQ: &str = "---s";
const GROUP_BOUNDARY_PAR: &str = "---p";

/// One group of patterns scheduled together under one mode
struct PlanGroup {
    patterns: Vec<String>,
    mode: ExecutionMode,
}

fn parse_groups(args: &[String], default_mode: ExecutionMode) -> Vec<PlanGroup> {
    let mut groups = vec![PlanGroup {
        patterns: Vec::new(),
        mode: default_mode,
    }];

    for arg in args {
        let next_mode = match arg.as_str() {
            GROUP_BOUNDARY => Some(default_mode),
            GROUP_BOUNDARY_SEQ => Some(ExecutionMode::Sequential),
            GROUP_BOUNDARY_PAR => Some(ExecutionMode::Parallel),
            _ => None,
        };

        match next_mode {
            Some(mode) => groups.push(PlanGroup {
                patterns: Vec::new(),
                mode,
            }),
            None => {
                if let Some(group) = groups.last_mut() {
                    group.patterns.push(arg.clone());
                }
            }
        }
    }

    groups.retain(|group| !group.patterns.is_empty());
    groups
}

/// Run every plan group in order; a failing group stops the rest
pub async fn execute(
    engine: &TaskEngine,
    args: &[String],
    default_mode: ExecutionMode,
) -> Result<()> {
    for group in parse_groups(args, default_mode) {
        let mode_name = match group.mode {
            ExecutionMode::Sequential => "sequentially",
            ExecutionMode::Parallel => "in parallel",
        };
        println!(
            "{} {} {}",
            "Running".bold(),
            group.patterns.join(" ").cyan(),
            mode_name.dimmed()
        );

        let result = engine
            .run_patterns(&group.patterns, group.mode)
            .await
            .map_err(|e| anyhow::anyhow!("{}", e))?;

        if !result.success {
            if let Some(failed) = result.first_failure() {
                anyhow::bail!("Task '{}' failed: {}", failed.name, failed.failure_reason());
            }
            anyhow::bail!("Task run failed");
        }
    }

    println!();
    println!(
        "{} {}",
        "✓".green().bold(),
        "All tasks completed successfully!".green().bold()
    );

    Ok(())
}
