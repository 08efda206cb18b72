//! Read-only task registry
//!
//! The registry is built once from a loaded task file and then shared, usually
//! behind an `Arc`, by the graph builder and every concurrently running task.

use std::collections::HashMap;

use crate::configs::tasks::{TaskConfig, TasksFileConfig};
use crate::types::TaskName;

#[derive(Debug, Default, Clone)]
pub struct TaskRegistry {
    tasks: HashMap<TaskName, TaskConfig>,
}

impl TaskRegistry {
    pub fn from_config(config: TasksFileConfig) -> Self {
        Self {
            tasks: config.tasks,
        }
    }

    pub fn from_tasks<I, N>(tasks: I) -> Self
    where
        I: IntoIterator<Item = (N, TaskConfig)>,
        N: Into<TaskName>,
    {
        Self {
            tasks: tasks
                .into_iter()
                .map(|(name, task)| (name.into(), task))
                .collect(),
        }
    }

    pub fn get(&self, name: &str) -> Option<&TaskConfig> {
        self.tasks.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.tasks.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Task names in sorted order
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.tasks.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}
