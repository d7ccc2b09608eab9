// src/lib.rs

pub mod algorithms;
pub mod cli;
pub mod config;
pub mod dag;
pub mod errors;
pub mod logging;
pub mod types;

use std::fmt::Write as _;

use anyhow::{Context, Result};
use tracing::{debug, info};

use crate::cli::CliArgs;
use crate::config::load_and_validate;
use crate::config::model::ConfigFile;
use crate::dag::{DispatchPlan, ListScheduler, Priorities, Schedule};

/// High-level entry point used by `main.rs`.
///
/// This wires together:
/// - config loading and validation
/// - schedule construction
/// - the priority pass and the list scheduler
/// - report output on stdout
pub fn run(args: CliArgs) -> Result<()> {
    let cfg = load_and_validate(&args.config)
        .with_context(|| format!("loading config from {}", args.config))?;

    if args.dry_run {
        print!("{}", render_dry_run(&cfg));
        debug!("dry-run complete (no scheduling)");
        return Ok(());
    }

    let schedule = Schedule::from_config(&cfg)?;
    info!(
        algorithm = %schedule.algorithm_kind(),
        tasks = schedule.dependencies().len(),
        "schedule built"
    );

    let scheduler = ListScheduler::new(&schedule)?;
    let priorities = scheduler.priorities().clone();
    let plan = scheduler.run_to_completion()?;

    print!("{}", render_report(&schedule, &priorities, &plan));
    Ok(())
}

/// Dry-run output: algorithm, tasks, execution times and dependencies.
pub fn render_dry_run(cfg: &ConfigFile) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "dagsched dry-run");
    let _ = writeln!(out, "  config.algorithm = {}", cfg.config.algorithm);
    let _ = writeln!(out);

    let _ = writeln!(out, "tasks ({}):", cfg.task.len());
    for (name, task) in cfg.task.iter() {
        let _ = writeln!(out, "  - {name}");
        let _ = writeln!(
            out,
            "      execution_time: {}",
            task.effective_execution_time(cfg.default.execution_time)
        );
        if !task.after.is_empty() {
            let _ = writeln!(out, "      after: {:?}", task.after);
        }
    }
    out
}

/// Priorities (highest first, ties by name) followed by the dispatch order.
pub fn render_report(schedule: &Schedule, priorities: &Priorities, plan: &DispatchPlan) -> String {
    let graph = schedule.dependencies();
    let mut ranked: Vec<(&str, u64)> = priorities
        .iter()
        .filter_map(|(id, p)| graph.task(id).map(|t| (t.name(), p)))
        .collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));

    let mut out = String::new();
    let _ = writeln!(out, "priorities ({}):", schedule.algorithm_kind());
    for (name, priority) in ranked {
        let _ = writeln!(out, "  {name}: {priority}");
    }
    let _ = writeln!(out);

    let _ = writeln!(out, "dispatch order:");
    for (i, d) in plan.dispatches.iter().enumerate() {
        let _ = writeln!(out, "  {}. {} [{}..{}]", i + 1, d.task, d.start, d.finish);
    }
    let _ = writeln!(out, "makespan: {}", plan.makespan);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RawConfigFile;

    fn chain_config() -> ConfigFile {
        let raw: RawConfigFile = toml::from_str(
            r#"
[task.A]
execution_time = 1

[task.B]
execution_time = 2
after = ["A"]

[task.C]
execution_time = 3
after = ["B"]
"#,
        )
        .unwrap();
        ConfigFile::try_from(raw).unwrap()
    }

    #[test]
    fn report_lists_priorities_then_order() {
        let cfg = chain_config();
        let schedule = Schedule::from_config(&cfg).unwrap();
        let scheduler = ListScheduler::new(&schedule).unwrap();
        let priorities = scheduler.priorities().clone();
        let plan = scheduler.run_to_completion().unwrap();

        let report = render_report(&schedule, &priorities, &plan);
        let expected = "\
priorities (hlfet):
  A: 6
  B: 5
  C: 3

dispatch order:
  1. A [0..1]
  2. B [1..3]
  3. C [3..6]
makespan: 6
";
        assert_eq!(report, expected);
    }

    #[test]
    fn dry_run_shows_dependencies() {
        let text = render_dry_run(&chain_config());
        assert!(text.contains("config.algorithm = hlfet"));
        assert!(text.contains("tasks (3):"));
        assert!(text.contains("after: [\"B\"]"));
    }
}
