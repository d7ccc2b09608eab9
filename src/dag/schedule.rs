// src/dag/schedule.rs

use crate::algorithms::{self, SchedulingAlgorithm};
use crate::config::model::ConfigFile;
use crate::dag::graph::TaskGraph;
use crate::errors::Result;
use crate::types::AlgorithmKind;

/// A task graph together with the policy chosen to schedule it.
#[derive(Debug, Clone)]
pub struct Schedule {
    graph: TaskGraph,
    algorithm: AlgorithmKind,
}

impl Schedule {
    pub fn new(graph: TaskGraph, algorithm: AlgorithmKind) -> Self {
        Self { graph, algorithm }
    }

    pub fn from_config(cfg: &ConfigFile) -> Result<Self> {
        let graph = TaskGraph::from_config(cfg)?;
        Ok(Self::new(graph, cfg.config.algorithm))
    }

    /// The dependency graph this schedule owns.
    pub fn dependencies(&self) -> &TaskGraph {
        &self.graph
    }

    pub fn algorithm_kind(&self) -> AlgorithmKind {
        self.algorithm
    }

    /// Instantiate the policy selected for this schedule.
    pub fn algorithm(&self) -> Box<dyn SchedulingAlgorithm> {
        algorithms::for_kind(self.algorithm)
    }
}
