use anyhow::Result;
use colored::*;
use globrun_core::engine::TaskEngine;
use globrun_core::execution::output::get_task_color;

pub fn execute(engine: &TaskEngine) -> Result<()> {
    println!("{}", "Tasks".bold().underline());

    if engine.tasks().is_empty() {
        println!("  {}", "No tasks declared".dimmed());
        return Ok(());
    }

    // Declaration order is meaningful (it is the matching order), so the
    // listing is deliberately not sorted
    for task in engine.tasks() {
        println!(
            "{}  {}",
            task.name.color(get_task_color(&task.name)).bold(),
            task.command.dimmed()
        );
        if let Some(description) = &task.description {
            println!("  {}", description.dimmed().italic());
        }
    }

    Ok(())
}
