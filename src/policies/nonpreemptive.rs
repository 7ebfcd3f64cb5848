//! Non-preemptive disciplines: FCFS, SJF, and priority.
//!
//! All three share one shape: at each decision point, pick the ready
//! process minimizing a selection key (ties to the lowest id) and run
//! it to completion. Only the key differs:
//!
//! - **FCFS**: arrival time
//! - **SJF**: remaining time (equal to burst time at selection, since
//!   a selected process always runs to completion)
//! - **Priority**: priority value (lower = more urgent)
//!
//! When nothing is ready, the decision is an idle jump to the next
//! arrival.
//!
//! # Reference
//! Silberschatz et al. (2018), "Operating System Concepts", Ch. 5.3.1-5.3.3

use super::{idle_until_next_arrival, select_ready_min, Decision, SchedulingPolicy};
use crate::error::SimResult;
use crate::models::Process;

/// Runs the selected process to completion.
fn run_to_completion(processes: &[Process], index: usize) -> Decision {
    Decision::Run {
        index,
        duration: processes[index].remaining_time,
    }
}

/// First-come-first-served.
#[derive(Debug, Clone, Copy)]
pub struct Fcfs;

impl SchedulingPolicy for Fcfs {
    fn name(&self) -> &'static str {
        "FCFS"
    }

    fn next_slice(&mut self, processes: &[Process], now: i64) -> SimResult<Decision> {
        match select_ready_min(processes, now, |p| p.arrival_time) {
            Some(i) => Ok(run_to_completion(processes, i)),
            None => idle_until_next_arrival(processes, now),
        }
    }
}

/// Shortest job first, non-preemptive selection.
#[derive(Debug, Clone, Copy)]
pub struct Sjf;

impl SchedulingPolicy for Sjf {
    fn name(&self) -> &'static str {
        "SJF"
    }

    fn next_slice(&mut self, processes: &[Process], now: i64) -> SimResult<Decision> {
        match select_ready_min(processes, now, |p| p.remaining_time) {
            Some(i) => Ok(run_to_completion(processes, i)),
            None => idle_until_next_arrival(processes, now),
        }
    }
}

/// Priority scheduling without preemption.
///
/// Once selected, a process runs to completion even if a more urgent
/// process arrives mid-slice. That is the defining difference from
/// [`super::PriorityPreemptive`].
#[derive(Debug, Clone, Copy)]
pub struct PriorityNonPreemptive;

impl SchedulingPolicy for PriorityNonPreemptive {
    fn name(&self) -> &'static str {
        "PRIORITY"
    }

    fn next_slice(&mut self, processes: &[Process], now: i64) -> SimResult<Decision> {
        // Validation guarantees priorities are present for this policy.
        match select_ready_min(processes, now, |p| p.priority.unwrap_or(i64::MAX)) {
            Some(i) => Ok(run_to_completion(processes, i)),
            None => idle_until_next_arrival(processes, now),
        }
    }
}
