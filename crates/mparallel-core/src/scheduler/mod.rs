//! Memory- and slot-bounded job scheduler.
//!
//! Jobs wait in a priority-ordered backlog (largest memory first). The
//! coordinator admits them first-fit whenever the ledger has a free slot and
//! enough memory, hands them to the worker pool, and releases their budget
//! as completions come back, until every job has finished.

mod budget;
mod choose;
mod pool;
mod progress;
mod run;

pub use budget::ResourceLedger;
pub use choose::select_candidate;
pub use pool::{WorkerPool, SPAWN_FAILURE_CODE};
pub use progress::{JobResult, Progress, RunSummary, SchedulerEvent};
pub use run::{run_jobs, Coordinator};
