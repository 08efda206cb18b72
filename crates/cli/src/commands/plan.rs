use anyhow::Result;
use colored::*;
use runnerup_core::execution::LayerPlan;
use runnerup_core::task_manager::TaskManager;
use runnerup_core::tasks::get_task_color;

pub fn execute(manager: &TaskManager, task: &str) -> Result<()> {
    println!("{} {}", "Execution plan for".bold(), task.cyan());

    let plan = manager
        .plan(task)
        .map_err(|e| anyhow::anyhow!("Failed to plan task: {}", e))?;

    println!();
    print_layers(&plan);
    Ok(())
}

/// Print layers deepest first, the order they run in
pub fn print_layers(plan: &LayerPlan) {
    if plan.is_empty() {
        println!("  {}", "Layers are empty".dimmed());
        return;
    }

    for (index, layer) in plan.execution_order() {
        let names = layer
            .iter()
            .map(|name| name.color(get_task_color(name)).to_string())
            .collect::<Vec<_>>()
            .join(" ");
        println!("Layer {}: [ {} ]", index, names);
    }
}
