// src/algorithms/mod.rs

//! Pluggable scheduling policies.
//!
//! A policy ranks the tasks of a [`Schedule`] once (if it [uses
//! priorities](SchedulingAlgorithm::uses_priority)) and is then asked
//! repeatedly to pick the next task out of the current ready set.

pub mod hlfet;

use std::fmt::Debug;

use crate::dag::{Priorities, Schedule, Task};
use crate::errors::Result;
use crate::types::AlgorithmKind;

pub use hlfet::Hlfet;

/// Contract shared by every scheduling policy.
pub trait SchedulingAlgorithm: Debug + Send + Sync {
    /// Pick the task to dispatch next from `ready`.
    ///
    /// Fails with [`EmptyReadySet`](crate::errors::DagschedError::EmptyReadySet)
    /// when `ready` is empty.
    fn choose<'a>(&self, ready: &[&'a Task], priorities: &Priorities) -> Result<&'a Task>;

    /// Whether [`calculate_priorities`](Self::calculate_priorities) must run
    /// before the first call to [`choose`](Self::choose).
    fn uses_priority(&self) -> bool;

    /// Fill `priorities` for every task of `schedule` reachable from a root.
    /// Entries already present are kept as they are.
    fn calculate_priorities(&self, schedule: &Schedule, priorities: &mut Priorities) -> Result<()>;
}

/// Build the policy for `kind`.
pub fn for_kind(kind: AlgorithmKind) -> Box<dyn SchedulingAlgorithm> {
    match kind {
        AlgorithmKind::Hlfet => Box::new(Hlfet),
    }
}
