// src/config/validate.rs

use std::str::FromStr;

use crate::config::model::{ConfigFile, JobConfig};
use crate::dag::Dag;
use crate::errors::{CrondagError, Result};
use crate::job::schedule::{Schedule, TimeUnit, parse_offset};

/// Run semantic validation against a loaded configuration.
///
/// This checks:
/// - there is at least one job, and every job has at least one task
/// - `heartbeat_secs >= 1` and every cadence interval `>= 1`
/// - units parse and offsets parse and fit inside one window
/// - all `after` dependencies refer to existing tasks, with no self-deps
/// - each job's task graph has no cycles
pub fn validate_config(cfg: &ConfigFile) -> Result<()> {
    ensure_has_jobs(cfg)?;
    validate_scheduler_section(cfg)?;

    for (name, job) in cfg.job.iter() {
        validate_job_schedule(name, job)?;
        validate_task_dependencies(name, job)?;
        validate_job_dag(name, job)?;
    }
    Ok(())
}

fn ensure_has_jobs(cfg: &ConfigFile) -> Result<()> {
    if cfg.job.is_empty() {
        return Err(CrondagError::Config(
            "config must contain at least one [job.<name>] section".to_string(),
        ));
    }
    for (name, job) in cfg.job.iter() {
        if job.task.is_empty() {
            return Err(CrondagError::Config(format!(
                "job '{name}' must contain at least one [job.{name}.task.<id>] section"
            )));
        }
    }
    Ok(())
}

fn validate_scheduler_section(cfg: &ConfigFile) -> Result<()> {
    if cfg.scheduler.heartbeat_secs == 0 {
        return Err(CrondagError::Config(
            "[scheduler].heartbeat_secs must be >= 1 (got 0)".to_string(),
        ));
    }
    Ok(())
}

fn validate_job_schedule(name: &str, job: &JobConfig) -> Result<()> {
    if job.every == 0 {
        return Err(CrondagError::Config(format!(
            "job '{name}': every must be >= 1 (got 0)"
        )));
    }

    let unit = TimeUnit::from_str(&job.unit)
        .map_err(|e| CrondagError::Config(format!("job '{name}': {e}")))?;

    if let Some(at) = &job.at {
        let offset = parse_offset(at)
            .map_err(|e| CrondagError::Config(format!("job '{name}': {e}")))?;
        Schedule::new(job.every, unit)
            .with_offset_secs(offset)
            .map_err(|e| CrondagError::Config(format!("job '{name}': {e}")))?;
    }
    Ok(())
}

fn validate_task_dependencies(name: &str, job: &JobConfig) -> Result<()> {
    for (task, tc) in job.task.iter() {
        for dep in tc.after.iter() {
            if !job.task.contains_key(dep) {
                return Err(CrondagError::Config(format!(
                    "job '{name}': task '{task}' has unknown dependency '{dep}' in `after`"
                )));
            }
            if dep == task {
                return Err(CrondagError::Config(format!(
                    "job '{name}': task '{task}' cannot depend on itself in `after`"
                )));
            }
        }
    }
    Ok(())
}

fn validate_job_dag(name: &str, job: &JobConfig) -> Result<()> {
    // The Dag rejects cycles at edge insertion, so building it *is* the
    // check; assembly later repeats this construction and cannot fail.
    let mut dag: Dag<&str> = Dag::new();

    for task in job.task.keys() {
        dag.add_node(task.as_str())?;
    }
    for (task, tc) in job.task.iter() {
        for dep in tc.after.iter() {
            dag.add_edge(dep.as_str(), task.as_str()).map_err(|e| {
                CrondagError::Config(format!("job '{name}': {e}"))
            })?;
        }
    }
    Ok(())
}
