// src/dag/priorities.rs

use std::collections::HashMap;

use crate::dag::task::TaskId;

/// Computed task priorities for one scheduling pass.
///
/// Kept apart from the tasks so that several schedules over the same graph
/// never share results. A missing entry means the priority is undefined.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Priorities {
    values: HashMap<TaskId, u64>,
}

impl Priorities {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, id: TaskId) -> Option<u64> {
        self.values.get(&id).copied()
    }

    pub fn contains(&self, id: TaskId) -> bool {
        self.values.contains_key(&id)
    }

    /// Store a priority unless one is already present. Returns the value
    /// that is stored afterwards; an existing value always wins.
    pub fn record(&mut self, id: TaskId, priority: u64) -> u64 {
        *self.values.entry(id).or_insert(priority)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (TaskId, u64)> + '_ {
        self.values.iter().map(|(id, p)| (*id, *p))
    }
}

#[cfg(test)]
mod tests {
    use petgraph::graph::NodeIndex;

    use super::*;

    #[test]
    fn record_is_write_once() {
        let id = TaskId(NodeIndex::new(0));
        let mut p = Priorities::new();

        assert_eq!(p.get(id), None);
        assert_eq!(p.record(id, 5), 5);
        assert_eq!(p.record(id, 8), 5);
        assert_eq!(p.get(id), Some(5));
        assert_eq!(p.len(), 1);
    }
}
