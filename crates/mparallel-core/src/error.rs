//! Typed errors for job-file parsing, run validation, and the scheduler loop.
//!
//! Parse and config errors are fatal and always surface before any job is
//! dispatched. A job exiting non-zero is not an error; it is reported in its
//! [`JobResult`](crate::scheduler::JobResult).

use thiserror::Error;

/// The job file could not be turned into a list of jobs.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    /// A memory line (1-based physical line number) is not a non-negative integer.
    #[error("The memory footprint on line {line} is not parsable")]
    InvalidMemory { line: usize },

    #[error(
        "In the job file, the number of memory constraints ({memories}) and commands ({commands}) does not match"
    )]
    CountMismatch { memories: usize, commands: usize },
}

/// The run parameters cannot schedule the given job list.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("The maximum level of parallelism must >= 1")]
    NoParallelism,

    #[error("This job list needs at least {required} memory to schedule.\nBut only {available} is allocated for it.")]
    InsufficientMemory { required: u64, available: u64 },

    /// Neither the command line nor the config file supplied the value.
    #[error("missing required setting `{0}` (pass it on the command line or set it in config.toml)")]
    Missing(&'static str),
}

/// Failure of a scheduler run.
#[derive(Debug, Error)]
pub enum SchedulerError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Every worker went away while results were still outstanding.
    #[error("worker result channel closed with {outstanding} job(s) outstanding (worker may have panicked)")]
    WorkersGone { outstanding: usize },

    #[error("failed to start worker thread: {0}")]
    Spawn(#[source] std::io::Error),
}

pub type Result<T> = std::result::Result<T, SchedulerError>;
