//! Error kinds for the simulator.
//!
//! Every error is a caller-input or logic defect, never a transient
//! condition: validation errors are raised before a run starts and fail
//! it atomically, and invariant violations abort the run with the clock
//! value and offending context attached.

use std::fmt;

use crate::models::ProcessId;

/// Result alias used throughout the crate.
pub type SimResult<T> = Result<T, SimError>;

/// Everything that can go wrong in a simulation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SimError {
    /// The batch is empty; averages would be undefined.
    EmptyBatch,
    /// A process record fails a precondition (negative arrival,
    /// non-positive burst, duplicate id).
    InvalidProcess {
        /// Offending process.
        id: ProcessId,
        /// What is wrong with it.
        reason: String,
    },
    /// The policy configuration is unusable for this batch.
    InvalidConfig {
        /// What is wrong with it.
        reason: String,
    },
    /// An internal scheduling invariant broke mid-run. Indicates a
    /// policy or engine bug, never bad input.
    InvariantViolation {
        /// Simulation clock when the fault was detected.
        time: i64,
        /// Diagnostic context.
        detail: String,
    },
}

impl fmt::Display for SimError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SimError::EmptyBatch => write!(f, "empty process batch"),
            SimError::InvalidProcess { id, reason } => {
                write!(f, "invalid process P{id}: {reason}")
            }
            SimError::InvalidConfig { reason } => {
                write!(f, "invalid scheduler configuration: {reason}")
            }
            SimError::InvariantViolation { time, detail } => {
                write!(f, "scheduling invariant violated at t={time}: {detail}")
            }
        }
    }
}

impl std::error::Error for SimError {}
