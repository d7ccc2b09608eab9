// src/types.rs

use std::fmt;
use std::str::FromStr;

use serde::Deserialize;

/// Task names as they appear in `[task.<name>]` sections.
pub type TaskName = String;

/// Which scheduling policy a schedule is built with.
///
/// - `Hlfet`: Highest Level First with Estimated Times. Tasks are ranked by
///   the longest cumulative execution time from the task to any sink, and the
///   highest-ranked ready task is always dispatched first (default).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlgorithmKind {
    #[default]
    Hlfet,
}

impl FromStr for AlgorithmKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "hlfet" => Ok(AlgorithmKind::Hlfet),
            other => Err(format!("invalid algorithm: {other} (expected \"hlfet\")")),
        }
    }
}

impl fmt::Display for AlgorithmKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AlgorithmKind::Hlfet => write!(f, "hlfet"),
        }
    }
}
