//! In-process command runner that records what ran concurrently.
//!
//! Each command's memory and run time come from a table set up by the test.
//! The runner tracks memory and job count in flight and keeps the peaks, so
//! tests can check the budgets held for the whole run.

use std::collections::HashMap;
use std::io;
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

use mparallel::runner::CommandRunner;

#[derive(Debug, Clone, Copy)]
pub struct Scripted {
    pub memory: u64,
    pub millis: u64,
    pub exit_code: i32,
}

#[derive(Debug, Default)]
pub struct Observed {
    pub memory_in_flight: u64,
    pub jobs_in_flight: usize,
    pub peak_memory: u64,
    pub peak_jobs: usize,
    pub started: Vec<String>,
    pub finished: Vec<String>,
}

#[derive(Clone)]
pub struct RecordingRunner {
    table: Arc<HashMap<String, Scripted>>,
    observed: Arc<Mutex<Observed>>,
}

impl RecordingRunner {
    pub fn new(table: impl IntoIterator<Item = (String, Scripted)>) -> Self {
        Self {
            table: Arc::new(table.into_iter().collect()),
            observed: Arc::new(Mutex::new(Observed::default())),
        }
    }

    pub fn observed(&self) -> std::sync::MutexGuard<'_, Observed> {
        self.observed.lock().unwrap()
    }
}

impl CommandRunner for RecordingRunner {
    fn run(&self, command: &str) -> io::Result<i32> {
        let scripted = *self
            .table
            .get(command)
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, command.to_string()))?;
        {
            let mut o = self.observed.lock().unwrap();
            o.memory_in_flight += scripted.memory;
            o.jobs_in_flight += 1;
            o.peak_memory = o.peak_memory.max(o.memory_in_flight);
            o.peak_jobs = o.peak_jobs.max(o.jobs_in_flight);
            o.started.push(command.to_string());
        }
        thread::sleep(Duration::from_millis(scripted.millis));
        {
            let mut o = self.observed.lock().unwrap();
            o.memory_in_flight -= scripted.memory;
            o.jobs_in_flight -= 1;
            o.finished.push(command.to_string());
        }
        Ok(scripted.exit_code)
    }
}
