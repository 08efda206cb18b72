use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use runnerup_core::task_manager::{TaskManager, TaskManagerConfig};
use tracing_subscriber::EnvFilter;

mod commands;

/// Runnerup - run a task after its dependencies, one layer at a time
#[derive(Parser)]
#[command(name = "runnerup")]
#[command(about = "Run a task from a task file after all of its dependencies")]
#[command(version)]
struct Cli {
    /// A task that can be found in the task file
    task: String,

    /// Path to the task file
    #[arg(short, long, default_value = "tasks.yaml")]
    file: PathBuf,

    /// Print the execution layers without running anything
    #[arg(long)]
    plan: bool,

    /// Do not print layer and task progress
    #[arg(short, long)]
    quiet: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let manager = TaskManager::new(TaskManagerConfig {
        tasks_file: cli.file,
    })
    .map_err(|e| anyhow::anyhow!("Failed to load tasks: {}", e))?;

    // Execute command (CLI layer only handles presentation)
    if cli.plan {
        commands::plan::execute(&manager, &cli.task)
    } else {
        commands::run::execute(&manager, &cli.task, cli.quiet).await
    }
}
