// src/dag/task.rs

//! Task nodes of the dependency graph.

use std::fmt;

use petgraph::graph::NodeIndex;

use crate::types::TaskName;

/// Stable identity of a task inside one [`TaskGraph`](crate::dag::TaskGraph).
///
/// Ids are only meaningful for the graph that issued them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TaskId(pub(crate) NodeIndex);

impl TaskId {
    /// Dense index of the task (insertion position in its graph).
    pub fn index(self) -> usize {
        self.0.index()
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0.index())
    }
}

/// A unit of work with an estimated execution time.
///
/// Tasks carry no scheduling state; computed priorities live in
/// [`Priorities`](crate::dag::Priorities).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Task {
    id: TaskId,
    name: TaskName,
    execution_time: u64,
}

impl Task {
    pub(crate) fn new(id: TaskId, name: TaskName, execution_time: u64) -> Self {
        Self {
            id,
            name,
            execution_time,
        }
    }

    pub fn id(&self) -> TaskId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn execution_time(&self) -> u64 {
        self.execution_time
    }
}
