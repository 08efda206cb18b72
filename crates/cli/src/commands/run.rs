use anyhow::Result;
use colored::*;
use runnerup_core::execution::TaskRunnerConfig;
use runnerup_core::task_manager::TaskManager;

use super::plan::print_layers;

pub async fn execute(manager: &TaskManager, task: &str, quiet: bool) -> Result<()> {
    let plan = manager
        .plan(task)
        .map_err(|e| anyhow::anyhow!("Failed to plan task: {}", e))?;

    if !quiet {
        println!("{} {}", "Running task".bold(), task.cyan());
        print_layers(&plan);
        println!();
    }

    let summary = manager
        .execute_plan(
            &plan,
            TaskRunnerConfig {
                show_progress: !quiet,
            },
        )
        .await
        .map_err(|e| anyhow::anyhow!("Failed to run task: {}", e))?;

    if !quiet {
        println!();
        println!(
            "{} {}",
            "✓".green().bold(),
            format!(
                "{} tasks in {} layers completed successfully!",
                summary.tasks_run, summary.layers_run
            )
            .green()
            .bold()
        );
    }

    Ok(())
}
