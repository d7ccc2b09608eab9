// src/dag/scheduler_step.rs

//! Step-by-step result types for the list scheduler.

use crate::types::TaskName;

/// One dispatch decision, placed on a single simulated worker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dispatch {
    pub task: TaskName,
    /// Priority the policy assigned, if it ranks tasks at all.
    pub priority: Option<u64>,
    pub start: u64,
    pub finish: u64,
}

/// Structured result of a single scheduler "step".
///
/// Useful for tests that want to step the DAG manually and make assertions
/// about what changed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchedulerStep {
    /// The task picked in this step.
    pub dispatched: Dispatch,
    /// Tasks whose last dependency was the dispatched task, in successor order.
    pub newly_ready: Vec<TaskName>,
}

/// Complete dispatch order of a schedule.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DispatchPlan {
    pub dispatches: Vec<Dispatch>,
    /// Finish time of the last dispatched task.
    pub makespan: u64,
}

impl DispatchPlan {
    /// Task names in dispatch order.
    pub fn order(&self) -> Vec<&str> {
        self.dispatches.iter().map(|d| d.task.as_str()).collect()
    }
}
