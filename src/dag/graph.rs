// src/dag/graph.rs

use std::collections::HashMap;

use petgraph::Direction;
use petgraph::graph::{DiGraph, NodeIndex};
use tracing::trace;

use crate::config::model::ConfigFile;
use crate::dag::task::{Task, TaskId};
use crate::errors::{DagschedError, Result};
use crate::types::TaskName;

/// Directed task graph. An edge `A -> B` means B must run after A.
///
/// Acyclicity is checked when a config is validated (`config::validate`);
/// graphs assembled by hand through [`TaskGraph::add_dependency`] are trusted
/// to be acyclic as well.
#[derive(Debug, Clone, Default)]
pub struct TaskGraph {
    graph: DiGraph<Task, ()>,
    by_name: HashMap<TaskName, TaskId>,
}

impl TaskGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a graph from a validated [`ConfigFile`].
    ///
    /// Tasks are inserted in name order, so iteration order is deterministic.
    pub fn from_config(cfg: &ConfigFile) -> Result<Self> {
        let mut graph = TaskGraph::new();

        for (name, task) in cfg.task.iter() {
            let time = task.effective_execution_time(cfg.default.execution_time);
            graph.add_task(name.clone(), time)?;
        }

        for (name, task) in cfg.task.iter() {
            for dep in task.after.iter() {
                graph.add_dependency(dep, name)?;
            }
        }

        Ok(graph)
    }

    /// Add a task. Names must be unique within the graph.
    pub fn add_task(&mut self, name: impl Into<TaskName>, execution_time: u64) -> Result<TaskId> {
        let name = name.into();
        if self.by_name.contains_key(&name) {
            return Err(DagschedError::ConfigError(format!(
                "task '{}' is defined more than once",
                name
            )));
        }

        let index = NodeIndex::new(self.graph.node_count());
        let id = TaskId(index);
        let added = self.graph.add_node(Task::new(id, name.clone(), execution_time));
        debug_assert_eq!(added, index);

        trace!(task = %name, execution_time, "task added");
        self.by_name.insert(name, id);
        Ok(id)
    }

    /// Record that `after` depends on `before` (edge `before -> after`).
    ///
    /// Adding the same dependency twice has no effect.
    pub fn add_dependency(&mut self, before: &str, after: &str) -> Result<()> {
        let from = self.id_of(before)?;
        let to = self.id_of(after)?;
        self.graph.update_edge(from.0, to.0, ());
        Ok(())
    }

    fn id_of(&self, name: &str) -> Result<TaskId> {
        self.by_name
            .get(name)
            .copied()
            .ok_or_else(|| DagschedError::TaskNotFound(name.to_string()))
    }

    pub fn task(&self, id: TaskId) -> Option<&Task> {
        self.graph.node_weight(id.0)
    }

    pub fn task_by_name(&self, name: &str) -> Option<&Task> {
        self.by_name.get(name).and_then(|id| self.task(*id))
    }

    /// All tasks in insertion order.
    pub fn tasks(&self) -> impl Iterator<Item = &Task> {
        self.graph.node_weights()
    }

    /// Tasks with no incoming edges, in insertion order.
    pub fn roots(&self) -> impl Iterator<Item = &Task> {
        self.tasks().filter(|t| self.in_degree(t.id()) == 0)
    }

    pub fn in_degree(&self, id: TaskId) -> usize {
        self.graph.edges_directed(id.0, Direction::Incoming).count()
    }

    pub fn out_degree(&self, id: TaskId) -> usize {
        self.graph.edges_directed(id.0, Direction::Outgoing).count()
    }

    /// Direct successors (targets of outgoing edges), in edge insertion order.
    pub fn successors(&self, id: TaskId) -> Vec<TaskId> {
        self.neighbors(id, Direction::Outgoing)
    }

    /// Direct predecessors (sources of incoming edges), in edge insertion order.
    pub fn predecessors(&self, id: TaskId) -> Vec<TaskId> {
        self.neighbors(id, Direction::Incoming)
    }

    fn neighbors(&self, id: TaskId, dir: Direction) -> Vec<TaskId> {
        // petgraph walks adjacency lists newest-first.
        let mut out: Vec<TaskId> = self
            .graph
            .neighbors_directed(id.0, dir)
            .map(TaskId)
            .collect();
        out.reverse();
        out
    }

    pub fn len(&self) -> usize {
        self.graph.node_count()
    }

    pub fn is_empty(&self) -> bool {
        self.graph.node_count() == 0
    }
}
