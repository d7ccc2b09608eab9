// src/config/model.rs

use std::collections::BTreeMap;

use serde::Deserialize;

use crate::types::AlgorithmKind;

/// Execution time used when neither the task nor `[default]` sets one.
pub const FALLBACK_EXECUTION_TIME: u64 = 1;

/// Top-level configuration as read from a TOML file, before validation.
///
/// ```toml
/// [config]
/// algorithm = "hlfet"
///
/// [default]
/// execution_time = 1
///
/// [task.fetch]
/// execution_time = 2
///
/// [task.build]
/// execution_time = 5
/// after = ["fetch"]
/// ```
///
/// All sections are optional and have reasonable defaults; an empty task
/// table is rejected during validation.
#[derive(Debug, Clone, Deserialize)]
pub struct RawConfigFile {
    /// Global behaviour config from `[config]`.
    #[serde(default)]
    pub config: ConfigSection,

    /// Defaults applied to tasks that leave a field unset.
    #[serde(default)]
    pub default: DefaultSection,

    /// All tasks from `[task.<name>]`, keyed by task name.
    #[serde(default)]
    pub task: BTreeMap<String, TaskConfig>,
}

/// A configuration that passed validation: every `after` reference exists,
/// no task depends on itself, and the dependency graph is acyclic.
///
/// Only obtainable through `ConfigFile::try_from(RawConfigFile)`.
#[derive(Debug, Clone)]
pub struct ConfigFile {
    pub config: ConfigSection,
    pub default: DefaultSection,
    pub task: BTreeMap<String, TaskConfig>,
}

impl ConfigFile {
    pub(crate) fn new_unchecked(
        config: ConfigSection,
        default: DefaultSection,
        task: BTreeMap<String, TaskConfig>,
    ) -> Self {
        Self {
            config,
            default,
            task,
        }
    }
}

/// `[config]` section.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ConfigSection {
    /// Scheduling policy used to rank and pick ready tasks.
    #[serde(default)]
    pub algorithm: AlgorithmKind,
}

/// `[default]` section.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DefaultSection {
    /// Default execution time for tasks that do not set one; if `None`,
    /// [`FALLBACK_EXECUTION_TIME`] is used.
    #[serde(default)]
    pub execution_time: Option<u64>,
}

/// `[task.<name>]` section.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TaskConfig {
    /// Estimated cost of running the task, in abstract time units.
    #[serde(default)]
    pub execution_time: Option<u64>,

    /// Dependency list: this task waits for all tasks listed here.
    ///
    /// For `after = ["A"]` on task `B` the graph gets the edge `A -> B`.
    #[serde(default)]
    pub after: Vec<String>,
}

impl TaskConfig {
    /// Effective execution time given a default from `[default]`.
    pub fn effective_execution_time(&self, default_execution_time: Option<u64>) -> u64 {
        self.execution_time
            .or(default_execution_time)
            .unwrap_or(FALLBACK_EXECUTION_TIME)
    }
}
