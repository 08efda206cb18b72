//! High-level task management interface
//!
//! This module provides the [`TaskManager`] which serves as the primary interface
//! for running tasks. It loads the task file once and then builds a fresh
//! dependency tree and layer plan for every requested task.
//!
//! ## Example
//!
//! ```rust,no_run
//! use runnerup_core::execution::TaskRunnerConfig;
//! use runnerup_core::task_manager::{TaskManager, TaskManagerConfig};
//! use std::path::PathBuf;
//!
//! # async fn example() -> runnerup_core::types::RunnerResult<()> {
//! let manager = TaskManager::new(TaskManagerConfig {
//!     tasks_file: PathBuf::from("tasks.yaml"),
//! })?;
//!
//! // Inspect the layers without running anything
//! let plan = manager.plan("build")?;
//! println!("{} layers", plan.len());
//!
//! // Run the task and everything it depends on
//! manager.run("build", TaskRunnerConfig::default()).await?;
//! # Ok(())
//! # }
//! ```

use std::path::PathBuf;
use std::sync::Arc;

use crate::configs::tasks::{load_tasks_file, DEFAULT_TASKS_FILE};
use crate::execution::dependencies::{group_by_dependency_levels, LayerPlan};
use crate::execution::runner::{RunSummary, TaskRunner, TaskRunnerConfig};
use crate::graph::build_dependency_tree;
use crate::registry::TaskRegistry;
use crate::types::RunnerResult;

/// Configuration for initializing a task manager
#[derive(Debug, Clone)]
pub struct TaskManagerConfig {
    pub tasks_file: PathBuf,
}

impl Default for TaskManagerConfig {
    fn default() -> Self {
        Self {
            tasks_file: PathBuf::from(DEFAULT_TASKS_FILE),
        }
    }
}

/// Owns the task registry and runs tasks from it
pub struct TaskManager {
    registry: Arc<TaskRegistry>,
}

impl TaskManager {
    /// Load the task file named in `config`
    pub fn new(config: TaskManagerConfig) -> RunnerResult<Self> {
        let tasks = load_tasks_file(&config.tasks_file)?;
        let registry = TaskRegistry::from_config(tasks);
        tracing::info!(
            path = %config.tasks_file.display(),
            tasks = registry.len(),
            "task registry loaded"
        );
        Ok(Self::from_registry(registry))
    }

    pub fn from_registry(registry: TaskRegistry) -> Self {
        Self {
            registry: Arc::new(registry),
        }
    }

    pub fn registry(&self) -> &TaskRegistry {
        &self.registry
    }

    /// Resolve `root` and group its dependencies into execution layers
    pub fn plan(&self, root: &str) -> RunnerResult<LayerPlan> {
        let tree = build_dependency_tree(&self.registry, root)?;
        Ok(group_by_dependency_levels(&tree))
    }

    /// Plan `root` and run every layer as child processes
    pub async fn run(&self, root: &str, config: TaskRunnerConfig) -> RunnerResult<RunSummary> {
        let plan = self.plan(root)?;
        self.execute_plan(&plan, config).await
    }

    /// Run an already computed plan as child processes
    pub async fn execute_plan(
        &self,
        plan: &LayerPlan,
        config: TaskRunnerConfig,
    ) -> RunnerResult<RunSummary> {
        TaskRunner::new(Arc::clone(&self.registry))
            .config(config)
            .run(plan)
            .await
    }
}
