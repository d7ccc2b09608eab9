// src/dag/scheduler.rs

use tracing::{debug, info, warn};

use crate::algorithms::SchedulingAlgorithm;
use crate::dag::priorities::Priorities;
use crate::dag::schedule::Schedule;
use crate::dag::scheduler_step::{Dispatch, DispatchPlan, SchedulerStep};
use crate::dag::task::{Task, TaskId};
use crate::errors::{DagschedError, Result};

/// Sequential list scheduler.
///
/// It is responsible for:
/// - running the policy's priority pass before any decision (if it has one)
/// - tracking which tasks are ready (all dependencies dispatched)
/// - asking the policy to choose among the ready tasks, one at a time
/// - releasing dependents once their last dependency is dispatched
///
/// Tasks are never executed; each dispatch is placed on one simulated worker
/// right after the previous one finishes.
#[derive(Debug)]
pub struct ListScheduler<'s> {
    schedule: &'s Schedule,
    algorithm: Box<dyn SchedulingAlgorithm>,
    priorities: Priorities,
    /// Undispatched dependencies per task, indexed by `TaskId::index`.
    remaining_deps: Vec<usize>,
    /// Ready tasks in the order they became ready.
    ready: Vec<TaskId>,
    dispatched: usize,
    clock: u64,
}

impl<'s> ListScheduler<'s> {
    /// Prepare a scheduler for `schedule` with the policy it selects.
    pub fn new(schedule: &'s Schedule) -> Result<Self> {
        Self::with_algorithm(schedule, schedule.algorithm())
    }

    /// Prepare a scheduler for `schedule` using an explicit policy.
    pub fn with_algorithm(
        schedule: &'s Schedule,
        algorithm: Box<dyn SchedulingAlgorithm>,
    ) -> Result<Self> {
        let graph = schedule.dependencies();

        let mut priorities = Priorities::new();
        if algorithm.uses_priority() {
            algorithm.calculate_priorities(schedule, &mut priorities)?;
        }

        let remaining_deps = graph.tasks().map(|t| graph.in_degree(t.id())).collect();
        let ready: Vec<TaskId> = graph.roots().map(Task::id).collect();

        debug!(
            algorithm = ?algorithm,
            tasks = graph.len(),
            ready = ready.len(),
            "scheduler: prepared"
        );

        Ok(Self {
            schedule,
            algorithm,
            priorities,
            remaining_deps,
            ready,
            dispatched: 0,
            clock: 0,
        })
    }

    /// Priorities computed for this schedule (empty for policies that do not
    /// rank tasks).
    pub fn priorities(&self) -> &Priorities {
        &self.priorities
    }

    pub fn priority_of(&self, task: &str) -> Option<u64> {
        let task = self.schedule.dependencies().task_by_name(task)?;
        self.priorities.get(task.id())
    }

    /// Tasks currently eligible for dispatch, in ready order.
    pub fn ready_tasks(&self) -> Vec<&'s Task> {
        let schedule: &'s Schedule = self.schedule;
        let graph = schedule.dependencies();
        self.ready.iter().filter_map(|id| graph.task(*id)).collect()
    }

    /// `true` once every task has been dispatched.
    pub fn is_finished(&self) -> bool {
        self.dispatched == self.schedule.dependencies().len()
    }

    /// Dispatch the next task. Returns `Ok(None)` when nothing is ready.
    pub fn step(&mut self) -> Result<Option<SchedulerStep>> {
        if self.ready.is_empty() {
            return Ok(None);
        }

        let schedule: &'s Schedule = self.schedule;
        let graph = schedule.dependencies();
        let ready = self.ready_tasks();
        let chosen = self.algorithm.choose(&ready, &self.priorities)?;
        let chosen_id = chosen.id();

        if let Some(pos) = self.ready.iter().position(|id| *id == chosen_id) {
            self.ready.remove(pos);
        } else {
            warn!(task = %chosen.name(), "policy chose a task outside the ready set");
            return Err(DagschedError::TaskNotFound(chosen.name().to_string()));
        }

        let start = self.clock;
        let finish = start.saturating_add(chosen.execution_time());
        self.clock = finish;
        self.dispatched += 1;

        let mut newly_ready = Vec::new();
        for succ in graph.successors(chosen_id) {
            let remaining = &mut self.remaining_deps[succ.index()];
            *remaining = remaining.saturating_sub(1);
            if *remaining == 0 {
                self.ready.push(succ);
                if let Some(task) = graph.task(succ) {
                    newly_ready.push(task.name().to_string());
                }
            }
        }

        let dispatched = Dispatch {
            task: chosen.name().to_string(),
            priority: self.priorities.get(chosen_id),
            start,
            finish,
        };

        debug!(
            task = %dispatched.task,
            priority = ?dispatched.priority,
            start,
            finish,
            newly_ready = ?newly_ready,
            "scheduler: task dispatched"
        );

        Ok(Some(SchedulerStep {
            dispatched,
            newly_ready,
        }))
    }

    /// Dispatch every task and return the resulting plan.
    pub fn run_to_completion(mut self) -> Result<DispatchPlan> {
        let mut plan = DispatchPlan::default();

        while let Some(step) = self.step()? {
            plan.makespan = step.dispatched.finish;
            plan.dispatches.push(step.dispatched);
        }

        if !self.is_finished() {
            let total = self.schedule.dependencies().len();
            warn!(
                dispatched = self.dispatched,
                total,
                "scheduler: ready set drained before all tasks were dispatched"
            );
            return Err(DagschedError::DagCycle(format!(
                "{} of {} tasks never became ready",
                total - self.dispatched,
                total
            )));
        }

        info!(
            tasks = plan.dispatches.len(),
            makespan = plan.makespan,
            "scheduler: all tasks dispatched"
        );
        Ok(plan)
    }
}
