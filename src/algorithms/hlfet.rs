// src/algorithms/hlfet.rs

//! Highest Level First with Estimated Times.
//!
//! The priority of a task is its upward rank: the largest sum of execution
//! times along any path from the task to a sink, the task itself included.
//! Ready tasks are dispatched in decreasing priority order.

use std::collections::HashSet;

use tracing::{debug, trace};

use crate::algorithms::SchedulingAlgorithm;
use crate::dag::{Priorities, Schedule, Task, TaskGraph, TaskId};
use crate::errors::{DagschedError, Result};

#[derive(Debug, Clone, Copy, Default)]
pub struct Hlfet;

/// Work item of the explicit depth-first traversal.
enum Visit {
    /// First time on top of the stack: expand successors.
    Enter(TaskId),
    /// All successors are ranked: rank the task itself.
    Exit(TaskId),
}

impl SchedulingAlgorithm for Hlfet {
    fn choose<'a>(&self, ready: &[&'a Task], priorities: &Priorities) -> Result<&'a Task> {
        if ready.is_empty() {
            return Err(DagschedError::EmptyReadySet);
        }

        let mut best: Option<(&'a Task, u64)> = None;
        for &task in ready {
            let priority = priorities
                .get(task.id())
                .ok_or_else(|| DagschedError::PriorityMissing(task.name().to_string()))?;

            // Strictly greater: the first of several equal maxima wins.
            match best {
                Some((_, best_priority)) if best_priority >= priority => {}
                _ => best = Some((task, priority)),
            }
        }

        best.map(|(task, _)| task).ok_or(DagschedError::EmptyReadySet)
    }

    fn uses_priority(&self) -> bool {
        true
    }

    fn calculate_priorities(&self, schedule: &Schedule, priorities: &mut Priorities) -> Result<()> {
        let graph = schedule.dependencies();
        let roots: Vec<TaskId> = graph.roots().map(Task::id).collect();

        debug!(
            tasks = graph.len(),
            roots = roots.len(),
            "hlfet: calculating priorities"
        );

        for root in roots {
            rank_from(graph, root, priorities)?;
        }

        debug!(ranked = priorities.len(), "hlfet: priorities calculated");
        Ok(())
    }
}

/// Rank `root` and everything below it that is not ranked yet.
///
/// Post-order traversal driven by an explicit stack, so graph depth is not
/// limited by the call stack.
fn rank_from(graph: &TaskGraph, root: TaskId, priorities: &mut Priorities) -> Result<()> {
    let mut on_path: HashSet<TaskId> = HashSet::new();
    let mut stack = vec![Visit::Enter(root)];

    while let Some(visit) = stack.pop() {
        match visit {
            Visit::Enter(id) => {
                if priorities.contains(id) {
                    continue;
                }
                if !on_path.insert(id) {
                    return Err(cycle_error(graph, id));
                }
                stack.push(Visit::Exit(id));

                for succ in graph.successors(id) {
                    if priorities.contains(succ) {
                        continue;
                    }
                    if on_path.contains(&succ) {
                        return Err(cycle_error(graph, succ));
                    }
                    stack.push(Visit::Enter(succ));
                }
            }
            Visit::Exit(id) => {
                on_path.remove(&id);
                let priority = rank_of(graph, id, priorities)?;
                priorities.record(id, priority);
            }
        }
    }

    Ok(())
}

/// Own execution time plus the highest priority among direct successors,
/// all of which must already be ranked.
fn rank_of(graph: &TaskGraph, id: TaskId, priorities: &Priorities) -> Result<u64> {
    let task = graph
        .task(id)
        .ok_or_else(|| DagschedError::TaskNotFound(id.to_string()))?;

    let mut longest_below = 0u64;
    for succ in graph.successors(id) {
        let below = priorities
            .get(succ)
            .ok_or_else(|| DagschedError::PriorityMissing(name_of(graph, succ)))?;
        longest_below = longest_below.max(below);
    }

    let priority = task
        .execution_time()
        .checked_add(longest_below)
        .ok_or_else(|| DagschedError::PriorityOverflow(task.name().to_string()))?;

    trace!(task = %task.name(), priority, "hlfet: task ranked");
    Ok(priority)
}

fn name_of(graph: &TaskGraph, id: TaskId) -> String {
    graph
        .task(id)
        .map(|t| t.name().to_string())
        .unwrap_or_else(|| id.to_string())
}

fn cycle_error(graph: &TaskGraph, id: TaskId) -> DagschedError {
    DagschedError::DagCycle(format!(
        "cycle detected in task DAG involving task '{}'",
        name_of(graph, id)
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::AlgorithmKind;

    fn schedule(tasks: &[(&str, u64)], edges: &[(&str, &str)]) -> Schedule {
        let mut graph = TaskGraph::new();
        for (name, time) in tasks {
            graph.add_task(*name, *time).unwrap();
        }
        for (before, after) in edges {
            graph.add_dependency(before, after).unwrap();
        }
        Schedule::new(graph, AlgorithmKind::Hlfet)
    }

    fn ranked(schedule: &Schedule) -> Priorities {
        let mut priorities = Priorities::new();
        Hlfet.calculate_priorities(schedule, &mut priorities).unwrap();
        priorities
    }

    fn priority(schedule: &Schedule, priorities: &Priorities, name: &str) -> Option<u64> {
        let id = schedule.dependencies().task_by_name(name).unwrap().id();
        priorities.get(id)
    }

    #[test]
    fn isolated_task_priority_is_its_execution_time() {
        let s = schedule(&[("solo", 42)], &[]);
        let p = ranked(&s);
        assert_eq!(priority(&s, &p, "solo"), Some(42));
    }

    #[test]
    fn chain_accumulates_towards_the_root() {
        let s = schedule(&[("A", 1), ("B", 2), ("C", 3)], &[("A", "B"), ("B", "C")]);
        let p = ranked(&s);
        assert_eq!(priority(&s, &p, "C"), Some(3));
        assert_eq!(priority(&s, &p, "B"), Some(5));
        assert_eq!(priority(&s, &p, "A"), Some(6));
    }

    #[test]
    fn diamond_takes_the_longer_branch() {
        let s = schedule(
            &[("A", 1), ("B", 2), ("C", 3), ("D", 4)],
            &[("A", "B"), ("A", "C"), ("B", "D"), ("C", "D")],
        );
        let p = ranked(&s);
        assert_eq!(priority(&s, &p, "D"), Some(4));
        assert_eq!(priority(&s, &p, "B"), Some(6));
        assert_eq!(priority(&s, &p, "C"), Some(7));
        assert_eq!(priority(&s, &p, "A"), Some(8));
    }

    #[test]
    fn zero_cost_tasks_are_ranked() {
        let s = schedule(&[("A", 0), ("B", 0)], &[("A", "B")]);
        let p = ranked(&s);
        assert_eq!(priority(&s, &p, "A"), Some(0));
        assert_eq!(priority(&s, &p, "B"), Some(0));
    }

    #[test]
    fn second_pass_keeps_existing_values() {
        let s = schedule(&[("A", 1), ("B", 2)], &[("A", "B")]);
        let first = ranked(&s);

        let mut second = first.clone();
        Hlfet.calculate_priorities(&s, &mut second).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn preset_priorities_are_not_recomputed() {
        let s = schedule(&[("A", 1), ("B", 2)], &[("A", "B")]);
        let b = s.dependencies().task_by_name("B").unwrap().id();

        let mut p = Priorities::new();
        p.record(b, 100);
        Hlfet.calculate_priorities(&s, &mut p).unwrap();

        assert_eq!(priority(&s, &p, "B"), Some(100));
        assert_eq!(priority(&s, &p, "A"), Some(101));
    }

    #[test]
    fn overflowing_path_is_an_error() {
        let s = schedule(&[("A", u64::MAX), ("B", 1)], &[("A", "B")]);
        let mut p = Priorities::new();
        let err = Hlfet.calculate_priorities(&s, &mut p).unwrap_err();
        assert!(matches!(err, DagschedError::PriorityOverflow(name) if name == "A"));
    }

    #[test]
    fn cycle_below_a_root_is_reported_instead_of_looping() {
        let s = schedule(
            &[("root", 1), ("X", 1), ("Y", 1)],
            &[("root", "X"), ("X", "Y"), ("Y", "X")],
        );
        let mut p = Priorities::new();
        let err = Hlfet.calculate_priorities(&s, &mut p).unwrap_err();
        assert!(matches!(err, DagschedError::DagCycle(_)));
    }

    #[test]
    fn tasks_unreachable_from_any_root_stay_unranked() {
        // A two-task cycle has no root at all.
        let s = schedule(&[("X", 1), ("Y", 1)], &[("X", "Y"), ("Y", "X")]);
        let p = ranked(&s);
        assert!(p.is_empty());
    }

    #[test]
    fn long_chain_does_not_exhaust_the_stack() {
        let n = 100_000u64;
        let mut graph = TaskGraph::new();
        let names: Vec<String> = (0..n).map(|i| format!("t{i}")).collect();
        for name in &names {
            graph.add_task(name.clone(), 1).unwrap();
        }
        for pair in names.windows(2) {
            graph.add_dependency(&pair[0], &pair[1]).unwrap();
        }
        let s = Schedule::new(graph, AlgorithmKind::Hlfet);

        let p = ranked(&s);
        assert_eq!(priority(&s, &p, "t0"), Some(n));
        assert_eq!(p.len(), n as usize);
    }

    #[test]
    fn choose_prefers_first_of_equal_maxima() {
        let s = schedule(&[("a", 5), ("b", 9), ("c", 9), ("d", 2)], &[]);
        let p = ranked(&s);
        let ready: Vec<&Task> = s.dependencies().tasks().collect();

        let chosen = Hlfet.choose(&ready, &p).unwrap();
        assert_eq!(chosen.name(), "b");
    }

    #[test]
    fn choose_on_empty_ready_set_fails() {
        let err = Hlfet.choose(&[], &Priorities::new()).unwrap_err();
        assert!(matches!(err, DagschedError::EmptyReadySet));
    }

    #[test]
    fn choose_without_priorities_fails() {
        let s = schedule(&[("a", 1)], &[]);
        let ready: Vec<&Task> = s.dependencies().tasks().collect();
        let err = Hlfet.choose(&ready, &Priorities::new()).unwrap_err();
        assert!(matches!(err, DagschedError::PriorityMissing(name) if name == "a"));
    }

    #[test]
    fn hlfet_uses_priority() {
        assert!(Hlfet.uses_priority());
    }
}
