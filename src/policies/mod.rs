//! Dispatch policies.
//!
//! Each policy answers one question for the engine: given the current
//! process states and the clock, what runs next and for how long? The
//! engine owns the clock, the timeline, and all process mutation; a
//! policy only decides. This keeps the five disciplines behind a single
//! loop instead of five copies of it.
//!
//! # Usage
//!
//! ```
//! use cpu_sched::models::{PolicyConfig, Process};
//! use cpu_sched::policies;
//!
//! let mut policy = policies::build(&PolicyConfig::Sjf);
//! let batch = vec![Process::new(1, 0, 4), Process::new(2, 0, 2)];
//! let decision = policy.next_slice(&batch, 0).unwrap();
//! // SJF picks P2, the shorter burst.
//! assert_eq!(decision, policies::Decision::Run { index: 1, duration: 2 });
//! ```
//!
//! # Reference
//! Silberschatz et al. (2018), "Operating System Concepts", Ch. 5.3

mod nonpreemptive;
mod preemptive;
mod round_robin;

pub use nonpreemptive::{Fcfs, PriorityNonPreemptive, Sjf};
pub use preemptive::PriorityPreemptive;
pub use round_robin::RoundRobin;

use std::fmt::Debug;

use crate::error::{SimError, SimResult};
use crate::models::{PolicyConfig, Process};

/// What the engine should do next.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    /// Run one process for a strictly positive duration.
    Run {
        /// Index into the engine's process slice.
        index: usize,
        /// How long the slice lasts. Never exceeds the process's
        /// remaining time.
        duration: i64,
    },
    /// Nothing is ready; idle the CPU forward to a strictly future
    /// instant (the next arrival).
    Idle {
        /// Clock value to jump to.
        until: i64,
    },
}

/// A dispatch discipline.
///
/// `next_slice` is called whenever a running slice ends or the CPU is
/// idle, and never after every process has completed. Implementations
/// must make strictly positive progress on some ready process or
/// correctly report the next arrival to idle toward.
pub trait SchedulingPolicy: Send + Sync + Debug {
    /// Policy name (e.g., "FCFS", "RR").
    fn name(&self) -> &'static str;

    /// Decides the next slice at time `now`.
    fn next_slice(&mut self, processes: &[Process], now: i64) -> SimResult<Decision>;
}

/// Builds the policy a configuration selects.
///
/// The quantum is taken from the `RoundRobin` variant; validation has
/// already established it is positive.
pub fn build(config: &PolicyConfig) -> Box<dyn SchedulingPolicy> {
    match config {
        PolicyConfig::Fcfs => Box::new(Fcfs),
        PolicyConfig::Sjf => Box::new(Sjf),
        PolicyConfig::PriorityNonPreemptive => Box::new(PriorityNonPreemptive),
        PolicyConfig::PriorityPreemptive => Box::new(PriorityPreemptive),
        PolicyConfig::RoundRobin { quantum } => Box::new(RoundRobin::new(*quantum)),
    }
}

/// Earliest arrival strictly after `now` among unfinished processes.
pub(crate) fn next_arrival(processes: &[Process], now: i64) -> Option<i64> {
    processes
        .iter()
        .filter(|p| p.remaining_time > 0 && p.arrival_time > now)
        .map(|p| p.arrival_time)
        .min()
}

/// Index of the ready process minimizing `(key, id)`.
///
/// Scanning in id order with a strict comparison makes the lowest id
/// win every key tie.
pub(crate) fn select_ready_min<K, F>(processes: &[Process], now: i64, key: F) -> Option<usize>
where
    K: Ord,
    F: Fn(&Process) -> K,
{
    processes
        .iter()
        .enumerate()
        .filter(|(_, p)| p.is_ready(now))
        .min_by_key(|(_, p)| (key(p), p.id))
        .map(|(i, _)| i)
}

/// Idle decision toward the next arrival, or an invariant error if no
/// unfinished process is ever going to arrive.
pub(crate) fn idle_until_next_arrival(processes: &[Process], now: i64) -> SimResult<Decision> {
    match next_arrival(processes, now) {
        Some(until) => Ok(Decision::Idle { until }),
        None => Err(SimError::InvariantViolation {
            time: now,
            detail: "no process is ready and none will arrive".into(),
        }),
    }
}
