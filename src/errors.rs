// src/errors.rs

//! Crate-wide error type and `Result` alias.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CrondagError {
    /// A DAG node id was registered twice.
    #[error("node '{0}' already exists in DAG")]
    DuplicateNode(String),

    /// An edge referenced a node id that was never registered.
    #[error("unknown DAG node: '{0}'")]
    UnknownNode(String),

    /// Inserting the edge would make a node reachable from itself.
    #[error("edge '{prereq}' -> '{dependent}' would create a cycle")]
    CyclicDependence { prereq: String, dependent: String },

    /// A task id was added twice to the same job.
    #[error("task '{task}' is already registered in job '{job}'")]
    DuplicateTaskId { job: String, task: String },

    /// A job with the same name was registered twice.
    #[error("job '{0}' is already registered")]
    DuplicateJob(String),

    /// A task's work callable failed. Fatal to the owning job's current run.
    #[error("task '{task}' failed")]
    TaskFailed {
        task: String,
        #[source]
        source: anyhow::Error,
    },

    /// Invalid cadence or offset configuration.
    #[error("invalid schedule: {0}")]
    InvalidSchedule(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, CrondagError>;
