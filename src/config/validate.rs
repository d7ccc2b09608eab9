// src/config/validate.rs

use petgraph::algo::toposort;
use petgraph::graphmap::DiGraphMap;

use crate::config::model::{ConfigFile, RawConfigFile};
use crate::errors::{DagschedError, Result};

impl TryFrom<RawConfigFile> for ConfigFile {
    type Error = DagschedError;

    fn try_from(raw: RawConfigFile) -> std::result::Result<Self, Self::Error> {
        validate_raw_config(&raw)?;
        Ok(ConfigFile::new_unchecked(raw.config, raw.default, raw.task))
    }
}

fn validate_raw_config(cfg: &RawConfigFile) -> Result<()> {
    ensure_has_tasks(cfg)?;
    validate_task_dependencies(cfg)?;
    validate_dag(cfg)?;
    Ok(())
}

fn ensure_has_tasks(cfg: &RawConfigFile) -> Result<()> {
    if cfg.task.is_empty() {
        return Err(DagschedError::ConfigError(
            "config must contain at least one [task.<name>] section".to_string(),
        ));
    }
    Ok(())
}

fn validate_task_dependencies(cfg: &RawConfigFile) -> Result<()> {
    for (name, task) in cfg.task.iter() {
        for dep in task.after.iter() {
            if !cfg.task.contains_key(dep) {
                return Err(DagschedError::ConfigError(format!(
                    "task '{}' has unknown dependency '{}' in `after`",
                    name, dep
                )));
            }
            if dep == name {
                return Err(DagschedError::ConfigError(format!(
                    "task '{}' cannot depend on itself in `after`",
                    name
                )));
            }
        }
    }
    Ok(())
}

fn validate_dag(cfg: &RawConfigFile) -> Result<()> {
    // Edge direction: dep -> task. For `[task.B] after = ["A"]` we add A -> B.
    let mut graph: DiGraphMap<&str, ()> = DiGraphMap::new();

    for name in cfg.task.keys() {
        graph.add_node(name.as_str());
    }

    for (name, task) in cfg.task.iter() {
        for dep in task.after.iter() {
            graph.add_edge(dep.as_str(), name.as_str(), ());
        }
    }

    match toposort(&graph, None) {
        Ok(_order) => Ok(()),
        Err(cycle) => {
            let node = cycle.node_id();
            Err(DagschedError::DagCycle(format!(
                "cycle detected in task DAG involving task '{}'",
                node
            )))
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;
    use crate::config::model::{ConfigSection, DefaultSection, TaskConfig};

    fn raw(tasks: Vec<(&str, Vec<&str>)>) -> RawConfigFile {
        let task = tasks
            .into_iter()
            .map(|(name, after)| {
                (
                    name.to_string(),
                    TaskConfig {
                        execution_time: Some(1),
                        after: after.iter().map(|s| s.to_string()).collect(),
                    },
                )
            })
            .collect::<BTreeMap<_, _>>();
        RawConfigFile {
            config: ConfigSection::default(),
            default: DefaultSection::default(),
            task,
        }
    }

    #[test]
    fn accepts_diamond() {
        let cfg = raw(vec![
            ("A", vec![]),
            ("B", vec!["A"]),
            ("C", vec!["A"]),
            ("D", vec!["B", "C"]),
        ]);
        assert!(ConfigFile::try_from(cfg).is_ok());
    }

    #[test]
    fn rejects_empty_task_table() {
        let err = ConfigFile::try_from(raw(vec![])).unwrap_err();
        assert!(matches!(err, DagschedError::ConfigError(msg) if msg.contains("at least one")));
    }

    #[test]
    fn rejects_self_dependency() {
        let err = ConfigFile::try_from(raw(vec![("A", vec!["A"])])).unwrap_err();
        assert!(matches!(err, DagschedError::ConfigError(msg) if msg.contains("itself")));
    }

    #[test]
    fn rejects_longer_cycle() {
        let cfg = raw(vec![("A", vec!["C"]), ("B", vec!["A"]), ("C", vec!["B"])]);
        let err = ConfigFile::try_from(cfg).unwrap_err();
        assert!(matches!(err, DagschedError::DagCycle(_)));
    }
}
