// src/job/task.rs

//! Task state machine around a caller-supplied unit of work.

use std::fmt;

use tracing::{debug, warn};

use crate::errors::{CrondagError, Result};

/// Public type alias for task ids throughout the crate.
pub type TaskName = String;

/// The work a task performs: an opaque, fallible, zero-argument callable.
/// The engine never inspects what it does, only whether it failed.
pub type WorkFn = Box<dyn FnMut() -> anyhow::Result<()> + Send>;

/// Lifecycle of a task within one job cycle.
///
/// Transitions are monotonic within a single attempt:
/// Pending -> Running -> {Completed, Failed}. [`Task::reset`] is the only way
/// back to Pending.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskStatus {
    Pending,
    Running,
    Completed,
    Failed,
}

/// One named unit of work inside a [`Job`](crate::job::Job).
pub struct Task {
    id: TaskName,
    work: WorkFn,
    status: TaskStatus,
    on_failed: Option<Box<dyn FnMut(&Task) + Send>>,
}

impl Task {
    pub fn new(
        id: impl Into<TaskName>,
        work: impl FnMut() -> anyhow::Result<()> + Send + 'static,
    ) -> Self {
        Self {
            id: id.into(),
            work: Box::new(work),
            status: TaskStatus::Pending,
            on_failed: None,
        }
    }

    /// Attach a hook invoked once when this task's work fails.
    pub fn with_on_failed(mut self, hook: impl FnMut(&Task) + Send + 'static) -> Self {
        self.on_failed = Some(Box::new(hook));
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn status(&self) -> TaskStatus {
        self.status
    }

    /// Back to Pending, whatever the current status.
    pub fn reset(&mut self) {
        self.status = TaskStatus::Pending;
    }

    /// Execute the wrapped work.
    ///
    /// No-op unless the task is Pending — a repeat visit within the same
    /// cycle is harmless. On failure the status becomes Failed, the on-failed
    /// hook fires, and the returned [`CrondagError::TaskFailed`] aborts the
    /// owning job's current run.
    pub fn run(&mut self) -> Result<()> {
        if self.status != TaskStatus::Pending {
            debug!(task = %self.id, status = ?self.status, "task not pending; skipping");
            return Ok(());
        }

        self.status = TaskStatus::Running;

        match (self.work)() {
            Ok(()) => {
                self.status = TaskStatus::Completed;
                Ok(())
            }
            Err(source) => {
                self.status = TaskStatus::Failed;
                warn!(task = %self.id, error = %source, "task work failed");

                // Take the hook out so it can borrow the task immutably.
                if let Some(mut hook) = self.on_failed.take() {
                    hook(&*self);
                    self.on_failed = Some(hook);
                }

                Err(CrondagError::TaskFailed {
                    task: self.id.clone(),
                    source,
                })
            }
        }
    }
}

impl fmt::Debug for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Task")
            .field("id", &self.id)
            .field("status", &self.status)
            .finish_non_exhaustive()
    }
}
