// src/dag/mod.rs

//! DAG representation and list scheduling.
//!
//! - [`graph`] holds the directed acyclic graph of tasks.
//! - [`task`] defines task nodes and their ids.
//! - [`schedule`] pairs a graph with the policy used to schedule it.
//! - [`priorities`] stores the per-pass priorities a policy computes.
//! - [`scheduler`] drives a policy over the graph and records the
//!   resulting dispatch order.
//! - [`scheduler_step`] defines the result types for scheduler steps.

pub mod graph;
pub mod priorities;
pub mod schedule;
pub mod scheduler;
pub mod scheduler_step;
pub mod task;

pub use graph::TaskGraph;
pub use priorities::Priorities;
pub use schedule::Schedule;
pub use scheduler::ListScheduler;
pub use scheduler_step::{Dispatch, DispatchPlan, SchedulerStep};
pub use task::{Task, TaskId};
