// src/job/mod.rs

//! A job: a named DAG of tasks plus a fixed-cadence schedule.

pub mod schedule;
pub mod task;

pub use schedule::{Schedule, TimeUnit, parse_offset};
pub use task::{Task, TaskName, TaskStatus, WorkFn};

use std::collections::{HashMap, HashSet};

use tracing::{debug, info};

use crate::dag::Dag;
use crate::engine::clock;
use crate::errors::{CrondagError, Result};

/// Owns a set of tasks and the dependency DAG over their ids.
///
/// Invariant: the DAG's node set is always exactly the task map's key set —
/// both are only ever mutated together in [`Job::add_task`]. Structure is
/// static once assembly is done; only task statuses and `last_run` change
/// while the scheduler is running.
pub struct Job {
    name: String,
    tasks: HashMap<TaskName, Task>,
    dag: Dag<TaskName>,
    schedule: Option<Schedule>,
    /// Unix seconds of the last run, used as the slot guard in
    /// [`Job::should_run_at`].
    last_run: Option<u64>,
}

impl Job {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            tasks: HashMap::new(),
            dag: Dag::new(),
            schedule: None,
            last_run: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Register a task. Ids are unique within a job.
    pub fn add_task(&mut self, task: Task) -> Result<()> {
        if self.tasks.contains_key(task.id()) {
            return Err(CrondagError::DuplicateTaskId {
                job: self.name.clone(),
                task: task.id().to_string(),
            });
        }
        self.dag.add_node(task.id().to_string())?;
        self.tasks.insert(task.id().to_string(), task);
        Ok(())
    }

    /// Declare that `upstream` must complete before `task`.
    pub fn set_upstream(&mut self, task: &str, upstream: &str) -> Result<()> {
        self.dag.add_edge(upstream.to_string(), task.to_string())
    }

    /// Start configuring the cadence: `job.every(2).hours().at("3:15")?`.
    pub fn every(&mut self, interval: u64) -> Every<'_> {
        Every {
            job: self,
            interval,
        }
    }

    pub fn set_schedule(&mut self, schedule: Schedule) {
        self.schedule = Some(schedule);
    }

    pub fn schedule(&self) -> Option<&Schedule> {
        self.schedule.as_ref()
    }

    pub fn last_run(&self) -> Option<u64> {
        self.last_run
    }

    /// Next scheduled instant (unix seconds) seen from `now`, if a schedule
    /// is configured.
    pub fn next_run_at(&self, now: u64) -> Option<u64> {
        self.schedule.as_ref().map(|s| s.next_run_at(now))
    }

    /// Whether the job is due: `now` has passed the next scheduled instant
    /// and the last run has not already consumed that slot.
    pub fn should_run_at(&self, now: u64) -> bool {
        let Some(next_run) = self.next_run_at(now) else {
            return false;
        };
        now >= next_run && self.last_run.is_none_or(|last| last < next_run)
    }

    pub fn should_run(&self) -> bool {
        self.should_run_at(clock::unix_now_secs())
    }

    /// Run the full task DAG once.
    ///
    /// Walks the traversal in prerequisite-first order, stopping at the first
    /// task failure. Whatever the outcome, every task is reset to Pending
    /// before this returns, so the job starts its next cycle clean; a task
    /// failure is re-raised only after the reset.
    pub fn run(&mut self) -> Result<()> {
        self.run_at(clock::unix_now_secs())
    }

    /// Deterministic-time variant of [`Job::run`]: records `now` as the last
    /// run instead of reading the wall clock.
    pub fn run_at(&mut self, now: u64) -> Result<()> {
        info!(job = %self.name, "job run starting");
        self.last_run = Some(now);

        let result = self.run_tasks();

        for task in self.tasks.values_mut() {
            task.reset();
        }

        match &result {
            Ok(()) => info!(job = %self.name, "job run finished"),
            Err(err) => debug!(job = %self.name, error = %err, "job run aborted"),
        }
        result
    }

    fn run_tasks(&mut self) -> Result<()> {
        let dag = &self.dag;
        let tasks = &mut self.tasks;

        for id in dag.traverse() {
            if let Some(task) = tasks.get_mut(&id) {
                task.run()?;
            }
        }
        Ok(())
    }

    /// Task ids transitively dependent on `task`.
    pub fn downstream(&self, task: &str) -> Result<HashSet<TaskName>> {
        self.dag.downstream(&task.to_string())
    }

    /// Task ids that are transitive prerequisites of `task`.
    pub fn upstream(&self, task: &str) -> Result<HashSet<TaskName>> {
        self.dag.upstream(&task.to_string())
    }

    /// Task ids with no declared prerequisite.
    pub fn independent(&self) -> HashSet<TaskName> {
        self.dag.independent_nodes()
    }

    pub fn task_names(&self) -> impl Iterator<Item = &str> {
        self.tasks.keys().map(|s| s.as_str())
    }

    /// Read-only view of a task's status, for tests and diagnostics.
    pub fn status_of(&self, task: &str) -> Option<TaskStatus> {
        self.tasks.get(task).map(|t| t.status())
    }
}

impl std::fmt::Debug for Job {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Job")
            .field("name", &self.name)
            .field("tasks", &self.tasks.len())
            .field("schedule", &self.schedule)
            .field("last_run", &self.last_run)
            .finish()
    }
}

/// First step of the fluent cadence builder; see [`Job::every`].
pub struct Every<'a> {
    job: &'a mut Job,
    interval: u64,
}

impl<'a> Every<'a> {
    pub fn minutes(self) -> Cadence<'a> {
        self.unit(TimeUnit::Minute)
    }

    pub fn minute(self) -> Cadence<'a> {
        self.minutes()
    }

    pub fn hours(self) -> Cadence<'a> {
        self.unit(TimeUnit::Hour)
    }

    pub fn hour(self) -> Cadence<'a> {
        self.hours()
    }

    fn unit(self, unit: TimeUnit) -> Cadence<'a> {
        let schedule = self
            .job
            .schedule
            .insert(Schedule::new(self.interval, unit));
        Cadence { schedule }
    }
}

/// Second step of the fluent cadence builder. The schedule is already set
/// with offset 0; `at` refines the landing offset within each window.
pub struct Cadence<'a> {
    schedule: &'a mut Schedule,
}

impl Cadence<'_> {
    /// Land at an `"M:S"` or `"H:M:S"` offset inside each window.
    pub fn at(self, offset: &str) -> Result<()> {
        *self.schedule = self.schedule.with_offset(offset)?;
        Ok(())
    }

    pub fn at_seconds(self, offset_secs: u64) -> Result<()> {
        *self.schedule = self.schedule.with_offset_secs(offset_secs)?;
        Ok(())
    }
}
