//! CLI command handlers. Each command is in its own file.

mod check;
mod completions;
mod man;
mod run;

pub use check::run_check;
pub use completions::run_completions;
pub use man::run_man;
pub use run::run_scheduler;

use anyhow::Result;
use mparallel::config::{self, MparallelConfig, RunLimits};
use mparallel::job::{self, JobList};
use std::path::Path;

use super::JobArgs;

fn load_config(path: Option<&Path>) -> Result<MparallelConfig> {
    let cfg = match path {
        Some(p) => config::load_from_path(p)?,
        None => config::load_or_default()?,
    };
    tracing::debug!("loaded config: {:?}", cfg);
    Ok(cfg)
}

/// Loads config, resolves the budgets, and builds the validated backlog.
/// Nothing is executed; every fatal input error surfaces here.
fn prepare(args: &JobArgs) -> Result<(MparallelConfig, RunLimits, JobList)> {
    let cfg = load_config(args.config.as_deref())?;
    let limits = cfg.resolve_limits(args.max_memory, args.jobs)?;
    let jobs = job::read_job_file(&args.job_file)?;
    let backlog = JobList::new(jobs, &limits)?;
    Ok((cfg, limits, backlog))
}
