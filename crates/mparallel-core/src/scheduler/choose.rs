//! Admission candidate selection (first fit in priority order).

use crate::job::JobList;

use super::budget::ResourceLedger;

/// Index of the first pending job that fits into the free memory, scanning
/// largest-first. `None` if no slot is free or nothing fits.
///
/// The scan stops at the first fit: a big job that does not fit is skipped
/// in favour of a later smaller one, but fits further down are not compared.
pub fn select_candidate(backlog: &JobList, ledger: &ResourceLedger) -> Option<usize> {
    if ledger.available_slots() == 0 {
        return None;
    }
    backlog
        .iter()
        .position(|job| job.memory <= ledger.available_memory())
}
