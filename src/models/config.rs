//! Scheduler configuration.

use serde::{Deserialize, Serialize};

/// Which dispatch discipline drives a run, plus its parameters.
///
/// The round-robin quantum travels with its variant, so a configured
/// policy is always complete.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PolicyConfig {
    /// First-come-first-served: arrival order, run to completion.
    Fcfs,
    /// Shortest job first, non-preemptive selection.
    Sjf,
    /// Lowest priority value first; never interrupts a running process.
    PriorityNonPreemptive,
    /// Lowest priority value first; re-decided whenever a process arrives.
    PriorityPreemptive,
    /// Fixed time slices from a FIFO ready queue.
    RoundRobin {
        /// Maximum contiguous time granted per turn. Must be positive.
        quantum: i64,
    },
}

impl PolicyConfig {
    /// Short policy name for logs and reports.
    pub fn name(&self) -> &'static str {
        match self {
            PolicyConfig::Fcfs => "FCFS",
            PolicyConfig::Sjf => "SJF",
            PolicyConfig::PriorityNonPreemptive => "PRIORITY",
            PolicyConfig::PriorityPreemptive => "PRIORITY-P",
            PolicyConfig::RoundRobin { .. } => "RR",
        }
    }

    /// Whether every process must carry a priority value.
    pub fn requires_priority(&self) -> bool {
        matches!(
            self,
            PolicyConfig::PriorityNonPreemptive | PolicyConfig::PriorityPreemptive
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names() {
        assert_eq!(PolicyConfig::Fcfs.name(), "FCFS");
        assert_eq!(PolicyConfig::RoundRobin { quantum: 2 }.name(), "RR");
    }

    #[test]
    fn test_requires_priority() {
        assert!(PolicyConfig::PriorityNonPreemptive.requires_priority());
        assert!(PolicyConfig::PriorityPreemptive.requires_priority());
        assert!(!PolicyConfig::Fcfs.requires_priority());
        assert!(!PolicyConfig::Sjf.requires_priority());
        assert!(!PolicyConfig::RoundRobin { quantum: 1 }.requires_priority());
    }

    #[test]
    fn test_serde_round_trip() {
        let cfg = PolicyConfig::RoundRobin { quantum: 3 };
        let json = serde_json::to_string(&cfg).unwrap();
        let back: PolicyConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, cfg);
    }
}
