//! Process model.
//!
//! A process is the unit of work competing for the simulated CPU: an
//! immutable input record (arrival, burst, optional priority) plus the
//! per-run execution state the engine mutates (remaining time,
//! completion time).
//!
//! # Reference
//! Silberschatz et al. (2018), "Operating System Concepts", Ch. 5.1

use serde::{Deserialize, Serialize};

/// Process identifier: positive, unique, 1-based from input order.
pub type ProcessId = u32;

/// A process competing for the CPU.
///
/// Turnaround and waiting time are derived from `completion_time`
/// rather than stored, so the identities
/// `turnaround = completion - arrival` and `waiting = turnaround - burst`
/// hold by construction.
///
/// # Time Representation
/// All times are integer simulation units from t=0. Lower `priority`
/// values are more urgent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Process {
    /// Unique process identifier.
    pub id: ProcessId,
    /// Instant the process becomes eligible to run.
    pub arrival_time: i64,
    /// Total CPU time the process requires.
    pub burst_time: i64,
    /// Dispatch priority (lower = more urgent). Required by the
    /// priority policies, ignored by the others.
    pub priority: Option<i64>,
    /// Burst time not yet granted. Reaches 0 exactly once.
    pub remaining_time: i64,
    /// Instant the process finished. `None` until it does.
    pub completion_time: Option<i64>,
}

/// Raw input descriptor for one process, before ids are assigned.
///
/// Mirrors what an interactive front-end would collect: arrival time,
/// burst time, and (for priority policies) a priority value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessRequest {
    /// Instant the process becomes eligible to run.
    pub arrival_time: i64,
    /// Total CPU time the process requires.
    pub burst_time: i64,
    /// Dispatch priority (lower = more urgent), if any.
    pub priority: Option<i64>,
}

impl ProcessRequest {
    /// Creates a request without a priority.
    pub fn new(arrival_time: i64, burst_time: i64) -> Self {
        Self {
            arrival_time,
            burst_time,
            priority: None,
        }
    }

    /// Sets the priority.
    pub fn with_priority(mut self, priority: i64) -> Self {
        self.priority = Some(priority);
        self
    }
}

impl Process {
    /// Creates a process with no priority.
    pub fn new(id: ProcessId, arrival_time: i64, burst_time: i64) -> Self {
        Self {
            id,
            arrival_time,
            burst_time,
            priority: None,
            remaining_time: burst_time,
            completion_time: None,
        }
    }

    /// Sets the dispatch priority.
    pub fn with_priority(mut self, priority: i64) -> Self {
        self.priority = Some(priority);
        self
    }

    /// Builds a batch from raw requests, assigning 1-based ids in
    /// input order.
    pub fn from_requests(requests: &[ProcessRequest]) -> Vec<Process> {
        requests
            .iter()
            .enumerate()
            .map(|(i, r)| Process {
                id: i as ProcessId + 1,
                arrival_time: r.arrival_time,
                burst_time: r.burst_time,
                priority: r.priority,
                remaining_time: r.burst_time,
                completion_time: None,
            })
            .collect()
    }

    /// Whether the process has arrived and still has work left at `now`.
    #[inline]
    pub fn is_ready(&self, now: i64) -> bool {
        self.arrival_time <= now && self.remaining_time > 0
    }

    /// Whether the process has finished.
    #[inline]
    pub fn is_complete(&self) -> bool {
        self.completion_time.is_some()
    }

    /// Completion time minus arrival time. `None` until completion.
    pub fn turnaround_time(&self) -> Option<i64> {
        self.completion_time.map(|c| c - self.arrival_time)
    }

    /// Time spent ready but not running. `None` until completion.
    pub fn waiting_time(&self) -> Option<i64> {
        self.turnaround_time().map(|t| t - self.burst_time)
    }

    /// Clears per-run state so the record can seed a fresh run.
    pub(crate) fn reset(&mut self) {
        self.remaining_time = self.burst_time;
        self.completion_time = None;
    }
}
