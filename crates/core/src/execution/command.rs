//! Action execution
//!
//! Runs the actions of a single task one after another. Every action races
//! against the layer's cancellation signal; when another task in the layer
//! fails, the running process is killed and the remaining actions are skipped.

use std::process::Stdio;

use async_trait::async_trait;
use tokio::process::Command;
use tokio::sync::broadcast;

use crate::types::{Action, RunnerError, RunnerResult};

/// Receiving end of a layer's cancellation broadcast.
///
/// Once a cancellation has been observed it stays observed.
#[derive(Debug)]
pub struct CancelSignal {
    receiver: broadcast::Receiver<()>,
    cancelled: bool,
}

impl CancelSignal {
    pub fn new(receiver: broadcast::Receiver<()>) -> Self {
        Self {
            receiver,
            cancelled: false,
        }
    }

    /// Check for a pending cancellation without waiting
    pub fn is_cancelled(&mut self) -> bool {
        if !self.cancelled {
            self.cancelled = match self.receiver.try_recv() {
                Ok(()) | Err(broadcast::error::TryRecvError::Lagged(_)) => true,
                Err(broadcast::error::TryRecvError::Empty)
                | Err(broadcast::error::TryRecvError::Closed) => false,
            };
        }
        self.cancelled
    }

    /// Wait until the layer is cancelled. Never resolves if the sender goes
    /// away without cancelling.
    pub async fn cancelled(&mut self) {
        if self.cancelled {
            return;
        }
        match self.receiver.recv().await {
            Ok(()) | Err(broadcast::error::RecvError::Lagged(_)) => self.cancelled = true,
            Err(broadcast::error::RecvError::Closed) => std::future::pending::<()>().await,
        }
    }
}

/// How a single action ended when it did not fail
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionStatus {
    Completed,
    Cancelled,
}

/// How a task ended when it did not fail
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskOutcome {
    Completed,
    /// Stopped because a sibling task failed. Not an error of its own.
    Cancelled,
}

/// Runs one action on behalf of a task
#[async_trait]
pub trait ActionExecutor: Send + Sync + 'static {
    async fn execute(
        &self,
        task: &str,
        action: &str,
        cancel: &mut CancelSignal,
    ) -> RunnerResult<ActionStatus>;
}

/// Executes actions as child processes.
///
/// The action string is split on whitespace into a program and its arguments;
/// no shell quoting is applied. Standard output is shared with the runner.
#[derive(Debug, Default, Clone, Copy)]
pub struct ProcessExecutor;

impl ProcessExecutor {
    pub fn new() -> Self {
        Self
    }

    fn command_for(task: &str, action: &str) -> RunnerResult<Command> {
        let mut words = action.split_whitespace();
        let program = words.next().ok_or_else(|| RunnerError::EmptyAction {
            task: task.to_string(),
        })?;

        let mut command = Command::new(program);
        command
            .args(words)
            .stdin(Stdio::null())
            .stdout(Stdio::inherit())
            .kill_on_drop(true);
        Ok(command)
    }
}

#[async_trait]
impl ActionExecutor for ProcessExecutor {
    async fn execute(
        &self,
        task: &str,
        action: &str,
        cancel: &mut CancelSignal,
    ) -> RunnerResult<ActionStatus> {
        let mut command = Self::command_for(task, action)?;
        let mut child = command.spawn().map_err(|source| RunnerError::ActionSpawn {
            task: task.to_string(),
            action: action.to_string(),
            source,
        })?;
        tracing::debug!(task, action, pid = child.id(), "process started");

        tokio::select! {
            status = child.wait() => {
                let status = status?;
                if status.success() {
                    Ok(ActionStatus::Completed)
                } else {
                    Err(RunnerError::ActionFailure {
                        task: task.to_string(),
                        action: action.to_string(),
                        code: status.code(),
                    })
                }
            }
            _ = cancel.cancelled() => {
                tracing::debug!(task, action, "cancelled, killing process");
                // The process may already have exited on its own
                if let Err(e) = child.kill().await {
                    tracing::warn!(task, action, error = %e, "failed to kill process");
                }
                Ok(ActionStatus::Cancelled)
            }
        }
    }
}

/// Run a task's actions in declared order.
///
/// Stops at the first failing action and returns its error. Returns
/// [`TaskOutcome::Cancelled`] when the signal arrives before or during an
/// action.
pub async fn run_task_actions<E: ActionExecutor + ?Sized>(
    executor: &E,
    task: &str,
    actions: &[Action],
    cancel: &mut CancelSignal,
) -> RunnerResult<TaskOutcome> {
    for action in actions {
        if cancel.is_cancelled() {
            tracing::debug!(task, "cancelled before next action");
            return Ok(TaskOutcome::Cancelled);
        }

        tracing::debug!(task, action = action.as_str(), "running action");
        match executor.execute(task, action, cancel).await? {
            ActionStatus::Completed => {}
            ActionStatus::Cancelled => return Ok(TaskOutcome::Cancelled),
        }
    }

    Ok(TaskOutcome::Completed)
}
