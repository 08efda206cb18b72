use thiserror::Error;

/// Name of a task, unique within a task file
pub type TaskName = String;

/// One command line belonging to a task: a command followed by space-separated arguments
pub type Action = String;

/// The main error type for runnerup operations
#[derive(Debug, Error)]
pub enum RunnerError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("the task '{0}' is not in the list of defined tasks")]
    UnknownTask(TaskName),

    #[error("the task '{0}' is cyclic")]
    CyclicDependency(TaskName),

    #[error("task '{task}' has an empty action")]
    EmptyAction { task: TaskName },

    #[error("task '{task}': failed to start '{action}': {source}")]
    ActionSpawn {
        task: TaskName,
        action: Action,
        #[source]
        source: std::io::Error,
    },

    #[error("task '{task}': '{action}' failed with {}", exit_description(.code))]
    ActionFailure {
        task: TaskName,
        action: Action,
        code: Option<i32>,
    },

    #[error("task unit terminated abnormally: {0}")]
    Join(String),
}

impl RunnerError {
    /// Name of the task this error points at, when there is one
    pub fn task_name(&self) -> Option<&str> {
        match self {
            Self::UnknownTask(name) | Self::CyclicDependency(name) => Some(name),
            Self::EmptyAction { task }
            | Self::ActionSpawn { task, .. }
            | Self::ActionFailure { task, .. } => Some(task),
            Self::Io(_) | Self::Yaml(_) | Self::Config(_) | Self::Join(_) => None,
        }
    }
}

fn exit_description(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("exit code {}", code),
        None => "no exit code (terminated by signal)".to_string(),
    }
}

/// Result type alias for runnerup operations
pub type RunnerResult<T> = Result<T, RunnerError>;
