//! Preemptive priority discipline.
//!
//! The most urgent ready process holds the CPU, and loses it the
//! instant a process with a lower priority value arrives. The ready
//! set only changes at arrivals (and at completions, which end the
//! slice anyway), so a slice is cut at the next future arrival rather
//! than re-decided every time unit; after the timeline merges
//! same-occupant neighbors the result is identical to unit stepping.
//!
//! # Reference
//! Silberschatz et al. (2018), "Operating System Concepts", Ch. 5.3.3

use super::{idle_until_next_arrival, next_arrival, select_ready_min, Decision, SchedulingPolicy};
use crate::error::SimResult;
use crate::models::Process;

/// Priority scheduling with preemption at arrivals.
#[derive(Debug, Clone, Copy)]
pub struct PriorityPreemptive;

impl SchedulingPolicy for PriorityPreemptive {
    fn name(&self) -> &'static str {
        "PRIORITY-P"
    }

    fn next_slice(&mut self, processes: &[Process], now: i64) -> SimResult<Decision> {
        // Validation guarantees priorities are present for this policy.
        let index = match select_ready_min(processes, now, |p| p.priority.unwrap_or(i64::MAX)) {
            Some(i) => i,
            None => return idle_until_next_arrival(processes, now),
        };

        let remaining = processes[index].remaining_time;
        let duration = match next_arrival(processes, now) {
            Some(at) => remaining.min(at - now),
            None => remaining,
        };
        Ok(Decision::Run { index, duration })
    }
}
