//! Bounded worker pool that executes admitted jobs on OS threads.
//!
//! Workers pull jobs from a shared queue, run them through the
//! [`CommandRunner`], and post a [`JobResult`] on the completion channel.
//! Every job handed to the pool yields exactly one result, even if the
//! command cannot be started or the runner panics.

use std::panic::{self, AssertUnwindSafe};
use std::sync::mpsc;
use std::sync::{Arc, Mutex};
use std::thread::{self, JoinHandle};

use crate::error::SchedulerError;
use crate::job::Job;
use crate::runner::CommandRunner;

use super::progress::JobResult;

/// Exit code reported for a job whose command could not be run at all.
pub const SPAWN_FAILURE_CODE: i32 = -1;

pub struct WorkerPool {
    work_tx: Option<mpsc::Sender<Job>>,
    handles: Vec<JoinHandle<()>>,
}

impl WorkerPool {
    /// Starts `size` worker threads. Results are sent on `results`; the pool
    /// keeps no sender of its own, so the channel disconnects once every
    /// worker has exited.
    pub fn start(
        size: usize,
        runner: Arc<dyn CommandRunner>,
        results: mpsc::Sender<JobResult>,
    ) -> Result<Self, SchedulerError> {
        let (work_tx, work_rx) = mpsc::channel::<Job>();
        let work_rx = Arc::new(Mutex::new(work_rx));
        let mut handles = Vec::with_capacity(size);
        for i in 0..size {
            let work_rx = Arc::clone(&work_rx);
            let runner = Arc::clone(&runner);
            let results = results.clone();
            let handle = thread::Builder::new()
                .name(format!("mparallel-worker-{}", i))
                .spawn(move || worker_loop(work_rx, runner, results))
                .map_err(SchedulerError::Spawn)?;
            handles.push(handle);
        }
        tracing::debug!(workers = size, "worker pool started");
        Ok(Self {
            work_tx: Some(work_tx),
            handles,
        })
    }

    pub fn size(&self) -> usize {
        self.handles.len()
    }

    /// Queue a job for execution. Gives the job back if no worker is left.
    pub fn submit(&self, job: Job) -> Result<(), Job> {
        match &self.work_tx {
            Some(tx) => tx.send(job).map_err(|e| e.0),
            None => Err(job),
        }
    }

    /// Close the queue and wait for every worker to exit.
    pub fn shutdown(&mut self) {
        self.work_tx.take();
        for h in self.handles.drain(..) {
            if let Err(e) = h.join() {
                tracing::warn!("worker panicked: {:?}", e);
            }
        }
    }
}

impl Drop for WorkerPool {
    fn drop(&mut self) {
        self.shutdown();
    }
}

fn worker_loop(
    work_rx: Arc<Mutex<mpsc::Receiver<Job>>>,
    runner: Arc<dyn CommandRunner>,
    results: mpsc::Sender<JobResult>,
) {
    loop {
        let next = match work_rx.lock() {
            Ok(rx) => rx.recv(),
            Err(_) => break,
        };
        let Ok(job) = next else {
            break;
        };
        let exit_code = execute(runner.as_ref(), &job.command);
        let result = JobResult {
            command: job.command,
            memory: job.memory,
            exit_code,
        };
        if results.send(result).is_err() {
            break;
        }
    }
}

fn execute(runner: &dyn CommandRunner, command: &str) -> i32 {
    match panic::catch_unwind(AssertUnwindSafe(|| runner.run(command))) {
        Ok(Ok(code)) => code,
        Ok(Err(e)) => {
            tracing::warn!(command, error = %e, "failed to run command");
            SPAWN_FAILURE_CODE
        }
        Err(_) => {
            tracing::warn!(command, "command runner panicked");
            SPAWN_FAILURE_CODE
        }
    }
}
