//! Layer-by-layer task runner
//!
//! This module drives a [`LayerPlan`]: all tasks of a layer run concurrently,
//! and the next layer starts only once the current one has fully settled. The
//! first failure in a layer cancels its siblings and ends the run.

use std::sync::Arc;

use colored::*;
use tokio::sync::broadcast;
use tokio::task::JoinSet;
use tracing::Instrument;

use crate::execution::command::{
    run_task_actions, ActionExecutor, CancelSignal, ProcessExecutor, TaskOutcome,
};
use crate::execution::dependencies::LayerPlan;
use crate::registry::TaskRegistry;
use crate::tasks::get_task_color;
use crate::types::{RunnerError, RunnerResult, TaskName};

/// Configuration for the task runner
#[derive(Debug, Clone)]
pub struct TaskRunnerConfig {
    /// Print layer and task progress to stdout
    pub show_progress: bool,
}

impl Default for TaskRunnerConfig {
    fn default() -> Self {
        Self {
            show_progress: true,
        }
    }
}

/// What a successful run did
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub layers_run: usize,
    pub tasks_run: usize,
}

/// Runs the layers of a plan against a registry
pub struct TaskRunner<E: ActionExecutor = ProcessExecutor> {
    registry: Arc<TaskRegistry>,
    executor: Arc<E>,
    config: TaskRunnerConfig,
}

impl TaskRunner<ProcessExecutor> {
    pub fn new(registry: Arc<TaskRegistry>) -> Self {
        Self::with_executor(registry, ProcessExecutor::new())
    }
}

impl<E: ActionExecutor> TaskRunner<E> {
    pub fn with_executor(registry: Arc<TaskRegistry>, executor: E) -> Self {
        Self {
            registry,
            executor: Arc::new(executor),
            config: TaskRunnerConfig::default(),
        }
    }

    pub fn config(mut self, config: TaskRunnerConfig) -> Self {
        self.config = config;
        self
    }

    /// Execute every layer, deepest first.
    ///
    /// Returns the error of the first task that failed; layers after the
    /// failing one are never started.
    pub async fn run(&self, plan: &LayerPlan) -> RunnerResult<RunSummary> {
        let mut summary = RunSummary::default();

        for (index, layer) in plan.execution_order() {
            let span = tracing::info_span!("layer", index, tasks = layer.len());
            self.run_layer(index, layer).instrument(span).await?;

            summary.layers_run += 1;
            summary.tasks_run += layer.len();
        }

        tracing::info!(
            layers = summary.layers_run,
            tasks = summary.tasks_run,
            "run completed"
        );
        Ok(summary)
    }

    async fn run_layer(&self, index: usize, layer: &[TaskName]) -> RunnerResult<()> {
        if self.config.show_progress {
            println!("{} {}", "running layer".bold(), index.to_string().bold());
        }
        tracing::info!(tasks = ?layer, "starting layer");

        // Every unit subscribes before anything can be sent
        let (cancel_tx, _) = broadcast::channel::<()>(1);
        let mut units = JoinSet::new();

        for name in layer {
            let task = self
                .registry
                .get(name)
                .ok_or_else(|| RunnerError::UnknownTask(name.clone()))?;

            if self.config.show_progress {
                println!(
                    "  {} {}",
                    "starting task".bright_black(),
                    name.color(get_task_color(name)).bold()
                );
            }

            let executor = Arc::clone(&self.executor);
            let actions = task.actions.clone();
            let mut cancel = CancelSignal::new(cancel_tx.subscribe());
            let task_name = name.clone();
            let span = tracing::info_span!("task", name = name.as_str());

            units.spawn(
                async move {
                    let outcome =
                        run_task_actions(executor.as_ref(), &task_name, &actions, &mut cancel)
                            .await;
                    (task_name, outcome)
                }
                .instrument(span),
            );
        }

        let mut first_error = None;
        while let Some(joined) = units.join_next().await {
            let result = match joined {
                Ok((name, outcome)) => outcome.map(|outcome| (name, outcome)),
                Err(e) => Err(RunnerError::Join(e.to_string())),
            };

            match result {
                Ok((name, TaskOutcome::Completed)) => {
                    tracing::debug!(task = name.as_str(), "task completed");
                    if self.config.show_progress {
                        println!(
                            "  {} {}",
                            "✓".green(),
                            name.color(get_task_color(&name))
                        );
                    }
                }
                Ok((name, TaskOutcome::Cancelled)) => {
                    tracing::debug!(task = name.as_str(), "task cancelled");
                }
                Err(e) if first_error.is_none() => {
                    tracing::error!(error = %e, "task failed, cancelling layer");
                    // No receivers left only means every unit already finished
                    let _ = cancel_tx.send(());
                    first_error = Some(e);
                }
                Err(e) => {
                    tracing::debug!(error = %e, "discarding error after cancellation");
                }
            }
        }

        if let Some(e) = first_error {
            return Err(e);
        }

        if self.config.show_progress {
            println!("{} {}", "layer done".bold(), index.to_string().bold());
        }
        Ok(())
    }
}
