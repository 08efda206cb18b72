use std::collections::HashMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::types::{Action, RunnerError, RunnerResult, TaskName};

/// Default name of the task file looked up in the current directory
pub const DEFAULT_TASKS_FILE: &str = "tasks.yaml";

#[derive(Debug, Default, Deserialize, Serialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct TaskConfig {
    #[serde(default)]
    pub actions: Vec<Action>,
    #[serde(alias = "deps")]
    pub dependencies: Option<Vec<TaskName>>,
}

impl TaskConfig {
    /// Dependencies of the task, empty when none were declared
    pub fn dependencies(&self) -> &[TaskName] {
        self.dependencies.as_deref().unwrap_or_default()
    }

    pub fn is_leaf(&self) -> bool {
        self.dependencies().is_empty()
    }
}

/// Top-level mapping of a task file: task name to its definition
#[derive(Debug, Default, Deserialize, Serialize, Clone, PartialEq, Eq)]
#[serde(transparent)]
pub struct TasksFileConfig {
    pub tasks: HashMap<TaskName, TaskConfig>,
}

pub fn parse_tasks_config(yaml_str: &str) -> RunnerResult<TasksFileConfig> {
    if yaml_str.trim().is_empty() {
        return Err(RunnerError::Config("task file is empty".to_string()));
    }
    let config: TasksFileConfig = serde_yaml::from_str(yaml_str)?;
    Ok(config)
}

pub fn load_tasks_file(path: &Path) -> RunnerResult<TasksFileConfig> {
    let content = fs::read_to_string(path).map_err(|e| {
        RunnerError::Config(format!(
            "Failed to read task file {}: {}",
            path.display(),
            e
        ))
    })?;

    tracing::debug!(path = %path.display(), "loaded task file");
    parse_tasks_config(&content)
}
