// src/errors.rs

//! Crate-wide error aliases and helpers.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DagschedError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Task not found: {0}")]
    TaskNotFound(String),

    #[error("Cycle detected in DAG: {0}")]
    DagCycle(String),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    /// `choose` was called with nothing to choose from.
    #[error("cannot choose from an empty ready set")]
    EmptyReadySet,

    /// A ready task has no computed priority (priorities were never
    /// calculated, or the task is unreachable from every root).
    #[error("task '{0}' has no computed priority")]
    PriorityMissing(String),

    #[error("priority of task '{0}' overflows u64")]
    PriorityOverflow(String),
}

pub type Result<T> = std::result::Result<T, DagschedError>;
