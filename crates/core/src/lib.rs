//! Runnerup Core Library
//!
//! This is the core library for the runnerup task runner. Given a task file that
//! maps task names to shell actions and dependencies, it resolves the
//! dependencies of a requested task, groups them into layers, and runs each
//! layer concurrently, cancelling the whole layer as soon as one task fails.
//!
//! ## Architecture
//!
//! - [`configs`] - Task file parsing
//! - [`registry`] - Read-only task registry shared by concurrent tasks
//! - [`graph`] - Dependency tree construction and cycle detection
//! - [`execution`] - Layer planning, the layer runner and action execution
//! - [`task_manager`] - High-level interface tying the pieces together
//! - [`tasks`] - Terminal colours for task names
//! - [`types`] - Common error types and type aliases
//!
//! ## Usage
//!
//! ```rust,no_run
//! use runnerup_core::execution::TaskRunnerConfig;
//! use runnerup_core::task_manager::{TaskManager, TaskManagerConfig};
//!
//! # async fn example() -> runnerup_core::types::RunnerResult<()> {
//! let manager = TaskManager::new(TaskManagerConfig::default())?;
//! manager.run("build", TaskRunnerConfig::default()).await?;
//! # Ok(())
//! # }
//! ```

pub mod configs;
pub mod execution;
pub mod graph;
pub mod registry;
pub mod task_manager;
pub mod tasks;
pub mod types;

#[cfg(test)]
pub(crate) mod test_support;

// Re-export the main types for easier usage
pub use task_manager::{TaskManager, TaskManagerConfig};
pub use types::{RunnerError, RunnerResult};
