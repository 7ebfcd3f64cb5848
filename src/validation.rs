//! Input validation for simulation runs.
//!
//! Checks structural integrity of a process batch and its policy
//! configuration before any simulation state is touched. Detects:
//! - Empty batches
//! - Negative arrival times and non-positive burst times
//! - Duplicate process ids
//! - A non-positive round-robin quantum
//! - Priority policies over processes without priority values
//!
//! All problems are collected so callers can report them together; the
//! engine fails a run atomically on the first one.

use std::collections::HashSet;

use crate::error::SimError;
use crate::models::{PolicyConfig, Process};

/// Validates a batch and configuration for a run.
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with every detected issue.
pub fn validate_batch(processes: &[Process], config: &PolicyConfig) -> Result<(), Vec<SimError>> {
    if processes.is_empty() {
        return Err(vec![SimError::EmptyBatch]);
    }

    let mut errors = Vec::new();
    let mut seen_ids = HashSet::new();

    for p in processes {
        if !seen_ids.insert(p.id) {
            errors.push(SimError::InvalidProcess {
                id: p.id,
                reason: "duplicate process id".into(),
            });
        }
        if p.arrival_time < 0 {
            errors.push(SimError::InvalidProcess {
                id: p.id,
                reason: format!("arrival_time must be >= 0, got {}", p.arrival_time),
            });
        }
        if p.burst_time <= 0 {
            errors.push(SimError::InvalidProcess {
                id: p.id,
                reason: format!("burst_time must be positive, got {}", p.burst_time),
            });
        }
    }

    if let PolicyConfig::RoundRobin { quantum } = config {
        if *quantum <= 0 {
            errors.push(SimError::InvalidConfig {
                reason: format!("round-robin quantum must be positive, got {quantum}"),
            });
        }
    }

    if config.requires_priority() {
        for p in processes {
            if p.priority.is_none() {
                errors.push(SimError::InvalidConfig {
                    reason: format!("{} policy requires a priority for P{}", config.name(), p.id),
                });
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
