//! `mparallel run` – execute every job under the memory and job budgets.

use anyhow::{bail, Context, Result};
use mparallel::runner::ShellRunner;
use mparallel::scheduler::Coordinator;
use std::fs::File;
use std::io::Write;
use std::path::Path;
use std::sync::Arc;

use super::prepare;
use crate::cli::JobArgs;

/// Runs the job file to completion, writing one line per dispatch and per
/// completion to `out`. Jobs that exit non-zero are reported but do not make
/// this fail.
pub fn run_scheduler(
    args: &JobArgs,
    output_file: Option<&Path>,
    directory: Option<&Path>,
    out: &mut dyn Write,
) -> Result<()> {
    if let Some(dir) = directory {
        if !dir.is_dir() {
            bail!("directory does not exist: {}", dir.display());
        }
    }
    let (cfg, limits, backlog) = prepare(args)?;

    let mut runner = ShellRunner::new(&cfg);
    if let Some(path) = output_file {
        let file = File::create(path)
            .with_context(|| format!("failed to create output file: {}", path.display()))?;
        runner = runner.with_output(file);
    }
    if let Some(dir) = directory {
        runner = runner.with_directory(dir);
    }

    let coordinator = Coordinator::new(backlog, &limits, Arc::new(runner))?;
    let mut write_failed = false;
    let summary = coordinator.run(|event| {
        if writeln!(out, "{}", event).and_then(|_| out.flush()).is_err() && !write_failed {
            tracing::warn!("could not write progress line");
            write_failed = true;
        }
    })?;

    let failed = summary.failed();
    if failed > 0 {
        tracing::warn!("{} of {} job(s) exited non-zero", failed, summary.results.len());
    }
    tracing::info!("run completed {} job(s)", summary.results.len());
    Ok(())
}
