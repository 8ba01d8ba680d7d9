// src/config/model.rs

use std::collections::BTreeMap;

use serde::Deserialize;

/// Top-level configuration as read from a TOML file.
///
/// ```toml
/// [scheduler]
/// heartbeat_secs = 1
///
/// [job.recipes]
/// every = 1
/// unit = "minute"
/// at = "0:10"
///
/// [job.recipes.task.fetch]
/// cmd = "curl -fsSL -o /tmp/recipes.json https://example.com/recipes.json"
///
/// [job.recipes.task.convert]
/// cmd = "scripts/convert.sh /tmp/recipes.json"
/// after = ["fetch"]
/// ```
///
/// All sections are optional apart from the jobs themselves; defaults are a
/// 1-second heartbeat and an every-minute cadence at offset 0.
#[derive(Debug, Clone, Deserialize)]
pub struct ConfigFile {
    /// Global loop settings from `[scheduler]`.
    #[serde(default)]
    pub scheduler: SchedulerSection,

    /// All jobs from `[job.<name>]`. Keys are the job names.
    #[serde(default)]
    pub job: BTreeMap<String, JobConfig>,
}

/// `[scheduler]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct SchedulerSection {
    /// Heartbeat polling cadence in seconds.
    #[serde(default = "default_heartbeat_secs")]
    pub heartbeat_secs: u64,
}

fn default_heartbeat_secs() -> u64 {
    1
}

impl Default for SchedulerSection {
    fn default() -> Self {
        Self {
            heartbeat_secs: default_heartbeat_secs(),
        }
    }
}

/// `[job.<name>]` section: cadence plus the job's tasks.
#[derive(Debug, Clone, Deserialize)]
pub struct JobConfig {
    /// Run every `every` units of `unit`.
    #[serde(default = "default_every")]
    pub every: u64,

    /// `"minute"` or `"hour"`.
    #[serde(default = "default_unit")]
    pub unit: String,

    /// Offset inside each window, `"M:S"` or `"H:M:S"`. Defaults to the
    /// start of the window.
    #[serde(default)]
    pub at: Option<String>,

    /// All tasks from `[job.<name>.task.<id>]`. Keys are the task ids.
    #[serde(default)]
    pub task: BTreeMap<String, TaskConfig>,
}

fn default_every() -> u64 {
    1
}

fn default_unit() -> String {
    "minute".to_string()
}

/// `[job.<name>.task.<id>]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct TaskConfig {
    /// The command to execute.
    pub cmd: String,

    /// Dependency list: this task waits for all tasks listed here.
    #[serde(default)]
    pub after: Vec<String>,
}
