use std::collections::BTreeMap;

use dagsched::config::{ConfigFile, ConfigSection, DefaultSection, RawConfigFile, TaskConfig};
use dagsched::dag::Schedule;
use dagsched::types::AlgorithmKind;

/// Builder for `ConfigFile` to simplify test setup.
pub struct ConfigFileBuilder {
    config: RawConfigFile,
}

impl ConfigFileBuilder {
    pub fn new() -> Self {
        Self {
            config: RawConfigFile {
                config: ConfigSection::default(),
                default: DefaultSection::default(),
                task: BTreeMap::new(),
            },
        }
    }

    pub fn with_task(mut self, name: &str, task: TaskConfig) -> Self {
        self.config.task.insert(name.to_string(), task);
        self
    }

    pub fn with_algorithm(mut self, algorithm: AlgorithmKind) -> Self {
        self.config.config.algorithm = algorithm;
        self
    }

    pub fn with_default_execution_time(mut self, time: u64) -> Self {
        self.config.default.execution_time = Some(time);
        self
    }

    /// The unvalidated config, for tests that exercise validation itself.
    pub fn build_raw(self) -> RawConfigFile {
        self.config
    }

    pub fn build(self) -> ConfigFile {
        ConfigFile::try_from(self.config).expect("Failed to build valid config from builder")
    }

    /// Validated config turned straight into a [`Schedule`].
    pub fn build_schedule(self) -> Schedule {
        let cfg = self.build();
        let schedule = Schedule::from_config(&cfg).expect("Failed to build schedule from config");
        tracing::debug!(
            tasks = schedule.dependencies().len(),
            algorithm = %schedule.algorithm_kind(),
            "test schedule built"
        );
        schedule
    }
}

impl Default for ConfigFileBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for `TaskConfig`.
pub struct TaskConfigBuilder {
    task: TaskConfig,
}

impl TaskConfigBuilder {
    pub fn new(execution_time: u64) -> Self {
        Self {
            task: TaskConfig {
                execution_time: Some(execution_time),
                after: vec![],
            },
        }
    }

    /// A task that takes its execution time from `[default]`.
    pub fn with_default_time() -> Self {
        Self {
            task: TaskConfig {
                execution_time: None,
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
