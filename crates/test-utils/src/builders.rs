#![allow(dead_code)]

use std::collections::BTreeMap;
use crondag::config::{ConfigFile, JobConfig, SchedulerSection, TaskConfig};

/// Builder for `ConfigFile` to simplify test setup.
pub struct ConfigFileBuilder {
    config: ConfigFile,
}

impl ConfigFileBuilder {
    pub fn new() -> Self {
        Self {
            config: ConfigFile {
                scheduler: SchedulerSection::default(),
                job: BTreeMap::new(),
            },
        }
    }

    pub fn with_heartbeat_secs(mut self, secs: u64) -> Self {
        self.config.scheduler.heartbeat_secs = secs;
        self
    }

    pub fn with_job(mut self, name: &str, job: JobConfig) -> Self {
        self.config.job.insert(name.to_string(), job);
        self
    }

    pub fn build(self) -> ConfigFile {
        self.config
    }
}

impl Default for ConfigFileBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for `JobConfig`.
pub struct JobConfigBuilder {
    job: JobConfig,
}

impl JobConfigBuilder {
    pub fn new() -> Self {
        Self {
            job: JobConfig {
                every: 1,
                unit: "minute".to_string(),
                at: None,
                task: BTreeMap::new(),
            },
        }
    }

    pub fn every(mut self, n: u64) -> Self {
        self.job.every = n;
        self
    }

    pub fn unit(mut self, unit: &str) -> Self {
        self.job.unit = unit.to_string();
        self
    }

    pub fn at(mut self, offset: &str) -> Self {
        self.job.at = Some(offset.to_string());
        self
    }

    pub fn with_task(mut self, id: &str, task: TaskConfig) -> Self {
        self.job.task.insert(id.to_string(), task);
        self
    }

    pub fn build(self) -> JobConfig {
        self.job
    }
}

impl Default for JobConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for `TaskConfig`.
pub struct TaskConfigBuilder {
    task: TaskConfig,
}

impl TaskConfigBuilder {
    pub fn new(cmd: &str) -> Self {
        Self {
            task: TaskConfig {
                cmd: cmd.to_string(),
                after: vec![],
            },
        }
    }

    pub fn after(mut self, dep: &str) -> Self {
        self.task.after.push(dep.to_string());
        self
    }

    pub fn build(self) -> TaskConfig {
        self.task
    }
}
