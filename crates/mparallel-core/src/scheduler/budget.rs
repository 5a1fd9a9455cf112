//! Memory and slot budget for one run.
//!
//! Only the coordinator thread touches the ledger, so plain integers suffice.

use crate::config::RunLimits;

/// Free memory and free execution slots. Jobs reserve both before starting
/// and release both when their result has been drained.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceLedger {
    total_memory: u64,
    total_slots: usize,
    available_memory: u64,
    available_slots: usize,
}

impl ResourceLedger {
    /// A ledger with everything free.
    pub fn new(limits: &RunLimits) -> Self {
        Self {
            total_memory: limits.max_memory,
            total_slots: limits.max_jobs,
            available_memory: limits.max_memory,
            available_slots: limits.max_jobs,
        }
    }

    pub fn available_memory(&self) -> u64 {
        self.available_memory
    }

    pub fn available_slots(&self) -> usize {
        self.available_slots
    }

    /// Memory currently held by running jobs.
    pub fn memory_in_use(&self) -> u64 {
        self.total_memory - self.available_memory
    }

    /// Number of running jobs.
    pub fn slots_in_use(&self) -> usize {
        self.total_slots - self.available_slots
    }

    /// Takes one slot and `memory`. Returns false (and changes nothing) when
    /// no slot is free or not enough memory is left.
    pub fn reserve(&mut self, memory: u64) -> bool {
        if self.available_slots == 0 || self.available_memory < memory {
            return false;
        }
        self.available_slots -= 1;
        self.available_memory -= memory;
        true
    }

    /// Returns one slot and `memory`. Call with the value passed to `reserve`.
    pub fn release(&mut self, memory: u64) {
        debug_assert!(self.available_slots < self.total_slots, "release without reserve");
        debug_assert!(memory <= self.memory_in_use(), "release exceeds reserved memory");
        self.available_slots = (self.available_slots + 1).min(self.total_slots);
        self.available_memory = self
            .available_memory
            .saturating_add(memory)
            .min(self.total_memory);
    }
}
