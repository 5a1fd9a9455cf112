//! The coordinator: admission, completion draining, and the run loop.
//!
//! All admission decisions and every ledger mutation happen on the thread
//! that calls [`Coordinator::run`]. Workers only execute commands and send
//! results back; the blocking receive on that channel is the only place the
//! loop waits.

use std::sync::mpsc;
use std::sync::Arc;

use crate::config::RunLimits;
use crate::error::{ConfigError, Result, SchedulerError};
use crate::job::{Job, JobList};
use crate::runner::CommandRunner;

use super::budget::ResourceLedger;
use super::choose::select_candidate;
use super::pool::WorkerPool;
use super::progress::{JobResult, Progress, RunSummary, SchedulerEvent};

pub struct Coordinator {
    backlog: JobList,
    ledger: ResourceLedger,
    progress: Progress,
    pool: WorkerPool,
    results: mpsc::Receiver<JobResult>,
    summary: RunSummary,
}

impl Coordinator {
    /// Prepares a run of `backlog` under `limits`. Worker threads are started
    /// here (one per slot, never more than there are jobs) but nothing is
    /// dispatched until [`run`](Self::run).
    pub fn new(backlog: JobList, limits: &RunLimits, runner: Arc<dyn CommandRunner>) -> Result<Self> {
        limits.validate()?;
        if let Some(largest) = backlog.iter().map(|j| j.memory).max() {
            if largest > limits.max_memory {
                return Err(ConfigError::InsufficientMemory {
                    required: largest,
                    available: limits.max_memory,
                }
                .into());
            }
        }

        let (results_tx, results) = mpsc::channel();
        let pool = WorkerPool::start(limits.max_jobs.min(backlog.len()), runner, results_tx)?;
        Ok(Self {
            progress: Progress::new(backlog.len()),
            ledger: ResourceLedger::new(limits),
            backlog,
            pool,
            results,
            summary: RunSummary::default(),
        })
    }

    pub fn progress(&self) -> Progress {
        self.progress
    }

    pub fn ledger(&self) -> &ResourceLedger {
        &self.ledger
    }

    pub fn backlog(&self) -> &JobList {
        &self.backlog
    }

    /// Admits jobs until no slot is free or no pending job fits.
    /// Returns how many were admitted in this pass.
    pub fn fill_capacity<F>(&mut self, on_event: &mut F) -> Result<usize>
    where
        F: FnMut(&SchedulerEvent<'_>),
    {
        let mut admitted = 0;
        while let Some(index) = select_candidate(&self.backlog, &self.ledger) {
            self.admit_one(index, on_event)?;
            admitted += 1;
        }
        Ok(admitted)
    }

    fn admit_one<F>(&mut self, index: usize, on_event: &mut F) -> Result<()>
    where
        F: FnMut(&SchedulerEvent<'_>),
    {
        let job: Job = self.backlog.take(index);
        let reserved = self.ledger.reserve(job.memory);
        debug_assert!(reserved, "selected job must fit the ledger");
        self.progress.record_dispatch();

        let left = self.ledger.available_memory();
        tracing::debug!(
            command = %job.command,
            memory = job.memory,
            left,
            running = self.progress.running(),
            "dispatch"
        );
        on_event(&SchedulerEvent::Dispatched {
            command: &job.command,
            memory: job.memory,
            left,
        });
        self.summary.dispatch_order.push(job.command.clone());

        self.pool
            .submit(job)
            .map_err(|_| SchedulerError::WorkersGone {
                outstanding: self.progress.running(),
            })
    }

    fn complete<F>(&mut self, result: JobResult, on_event: &mut F)
    where
        F: FnMut(&SchedulerEvent<'_>),
    {
        self.ledger.release(result.memory);
        self.progress.record_completion();
        if result.succeeded() {
            tracing::debug!(command = %result.command, "finished");
        } else {
            tracing::info!(command = %result.command, exit_code = result.exit_code, "finished with non-zero exit");
        }
        on_event(&SchedulerEvent::Finished {
            command: &result.command,
            exit_code: result.exit_code,
        });
        self.summary.results.push(result);
    }

    /// Runs every job to completion, calling `on_event` for each dispatch and
    /// each completion. Jobs exiting non-zero do not stop the run.
    pub fn run<F>(mut self, mut on_event: F) -> Result<RunSummary>
    where
        F: FnMut(&SchedulerEvent<'_>),
    {
        tracing::info!(
            jobs = self.progress.total,
            max_memory = self.ledger.available_memory(),
            workers = self.pool.size(),
            "run starting"
        );

        while !self.progress.is_done() {
            self.fill_capacity(&mut on_event)?;
            debug_assert!(self.progress.running() > 0, "nothing running with jobs pending");

            let result = self
                .results
                .recv()
                .map_err(|_| SchedulerError::WorkersGone {
                    outstanding: self.progress.running(),
                })?;
            self.complete(result, &mut on_event);
        }

        self.pool.shutdown();
        let summary = std::mem::take(&mut self.summary);
        tracing::info!(
            completed = self.progress.completed,
            failed = summary.failed(),
            "run finished"
        );
        Ok(summary)
    }
}

/// Sorts and validates `jobs`, then runs them all under `limits`.
pub fn run_jobs<F>(
    jobs: Vec<Job>,
    limits: &RunLimits,
    runner: Arc<dyn CommandRunner>,
    on_event: F,
) -> Result<RunSummary>
where
    F: FnMut(&SchedulerEvent<'_>),
{
    let backlog = JobList::new(jobs, limits)?;
    Coordinator::new(backlog, limits, runner)?.run(on_event)
}
