//! Jobs and the priority-ordered backlog.
//!
//! A [`JobList`] is built once per run from parsed jobs: it is sorted by
//! memory requirement (largest first, stable for ties) and validated against
//! the run limits before anything is dispatched. After that, jobs only ever
//! leave it, one at a time, when the coordinator admits them.

mod parse;

pub use parse::parse_job_lines;

use anyhow::{Context, Result};
use serde::Serialize;
use std::fs;
use std::path::Path;

use crate::config::RunLimits;
use crate::error::ConfigError;

/// One command and the memory it needs while running.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Job {
    pub command: String,
    pub memory: u64,
}

impl Job {
    pub fn new(command: impl Into<String>, memory: u64) -> Self {
        Self {
            command: command.into(),
            memory,
        }
    }
}

/// Reads and parses a job file from disk.
pub fn read_job_file(path: &Path) -> Result<Vec<Job>> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read job file: {}", path.display()))?;
    Ok(parse_job_lines(text.lines())?)
}

/// Pending jobs in admission priority order.
#[derive(Debug, Clone)]
pub struct JobList {
    pending: Vec<Job>,
}

impl JobList {
    /// Sorts `jobs` by memory descending and checks them against `limits`.
    ///
    /// Fails with [`ConfigError::NoParallelism`] when `limits.max_jobs` is 0,
    /// then with [`ConfigError::InsufficientMemory`] when the largest job does
    /// not fit into `limits.max_memory` on its own.
    pub fn new(mut jobs: Vec<Job>, limits: &RunLimits) -> Result<Self, ConfigError> {
        limits.validate()?;
        jobs.sort_by(|a, b| b.memory.cmp(&a.memory));
        if let Some(largest) = jobs.first() {
            if largest.memory > limits.max_memory {
                return Err(ConfigError::InsufficientMemory {
                    required: largest.memory,
                    available: limits.max_memory,
                });
            }
        }
        Ok(Self { pending: jobs })
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Job> {
        self.pending.get(index)
    }

    /// Pending jobs in priority order.
    pub fn iter(&self) -> impl Iterator<Item = &Job> {
        self.pending.iter()
    }

    /// Removes the job at `index`, keeping the order of the rest.
    pub(crate) fn take(&mut self, index: usize) -> Job {
        self.pending.remove(index)
    }
}
