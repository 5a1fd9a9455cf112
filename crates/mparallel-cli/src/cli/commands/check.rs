//! `mparallel check` – validate a job file and show the scheduling order.

use anyhow::Result;
use mparallel::config::RunLimits;
use mparallel::job::JobList;
use std::io::Write;

use super::prepare;
use crate::cli::JobArgs;

pub fn run_check(args: &JobArgs, json: bool, out: &mut dyn Write) -> Result<()> {
    let (_, limits, backlog) = prepare(args)?;
    if json {
        let plan = serde_json::json!({
            "max_memory": limits.max_memory,
            "jobs": limits.max_jobs,
            "backlog": backlog.iter().collect::<Vec<_>>(),
        });
        writeln!(out, "{}", serde_json::to_string_pretty(&plan)?)?;
    } else {
        write!(out, "{}", render_plan(&backlog, &limits))?;
    }
    Ok(())
}

/// Text table of the backlog in priority order plus a one-line summary.
fn render_plan(backlog: &JobList, limits: &RunLimits) -> String {
    let mut s = format!("{:<10} {}\n", "MEMORY", "COMMAND");
    for job in backlog.iter() {
        s.push_str(&format!("{:<10} {}\n", job.memory, job.command));
    }
    s.push_str(&format!(
        "{} job(s), memory budget {}, up to {} at once\n",
        backlog.len(),
        limits.max_memory,
        limits.max_jobs
    ));
    s
}
