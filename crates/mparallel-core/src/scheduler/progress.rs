//! Run progress: counters, per-job results, and the lines printed for users.

use serde::Serialize;
use std::fmt;

/// Outcome of one executed job. A non-zero `exit_code` is data, not an error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct JobResult {
    pub command: String,
    pub memory: u64,
    pub exit_code: i32,
}

impl JobResult {
    pub fn succeeded(&self) -> bool {
        self.exit_code == 0
    }
}

/// Job counters for one run. `completed <= dispatched <= total` always holds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Progress {
    pub total: usize,
    pub dispatched: usize,
    pub completed: usize,
}

impl Progress {
    pub fn new(total: usize) -> Self {
        Self {
            total,
            ..Self::default()
        }
    }

    /// Jobs dispatched but not yet drained.
    pub fn running(&self) -> usize {
        self.dispatched - self.completed
    }

    pub fn is_done(&self) -> bool {
        self.completed == self.total
    }

    pub(crate) fn record_dispatch(&mut self) {
        debug_assert!(self.dispatched < self.total);
        self.dispatched += 1;
    }

    pub(crate) fn record_completion(&mut self) {
        debug_assert!(self.completed < self.dispatched);
        self.completed += 1;
    }
}

/// A state change reported by the coordinator. `Display` gives the exact
/// line printed to stdout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SchedulerEvent<'a> {
    Dispatched {
        command: &'a str,
        memory: u64,
        /// Memory left in the ledger after this job's reservation.
        left: u64,
    },
    Finished {
        command: &'a str,
        exit_code: i32,
    },
}

impl fmt::Display for SchedulerEvent<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SchedulerEvent::Dispatched {
                command,
                memory,
                left,
            } => write!(f, "\"{}\" dispatched (alloc {} / left {})", command, memory, left),
            SchedulerEvent::Finished { command, exit_code } => {
                write!(f, "\"{}\" finished with code {}.", command, exit_code)
            }
        }
    }
}

/// Everything a finished run produced.
#[derive(Debug, Clone, Default, Serialize)]
pub struct RunSummary {
    /// Results in completion order.
    pub results: Vec<JobResult>,
    /// Commands in the order they were dispatched.
    pub dispatch_order: Vec<String>,
}

impl RunSummary {
    /// Number of jobs that exited non-zero.
    pub fn failed(&self) -> usize {
        self.results.iter().filter(|r| !r.succeeded()).count()
    }
}
