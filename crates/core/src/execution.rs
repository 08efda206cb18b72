//! Task execution module
//!
//! This module handles layer planning, concurrent layer execution and the
//! execution of individual actions.

pub mod command;
pub mod dependencies;
pub mod runner;

pub use command::{ActionExecutor, CancelSignal, ProcessExecutor, TaskOutcome};
pub use dependencies::{group_by_dependency_levels, LayerPlan};
pub use runner::{RunSummary, TaskRunner, TaskRunnerConfig};
