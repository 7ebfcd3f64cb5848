//! Aggregate run metrics (KPIs).
//!
//! Computes standard scheduling performance indicators from a
//! finished simulation outcome.
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Avg Turnaround | mean(completion - arrival) |
//! | Avg Waiting | mean(turnaround - burst) |
//! | Makespan | End of the last timeline segment |
//! | CPU Utilization | busy time / makespan |
//! | Throughput | processes / makespan |
//!
//! # Reference
//! Silberschatz et al. (2018), "Operating System Concepts", Ch. 5.2
//! (Scheduling Criteria)

use serde::{Deserialize, Serialize};

use crate::engine::SimulationOutcome;
use crate::error::{SimError, SimResult};

/// Performance indicators for one finished run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimMetrics {
    /// Mean turnaround time.
    pub average_turnaround: f64,
    /// Mean waiting time.
    pub average_waiting: f64,
    /// End of the schedule.
    pub makespan: i64,
    /// Fraction of the makespan the CPU spent running (0.0..1.0).
    pub cpu_utilization: f64,
    /// Completed processes per time unit.
    pub throughput: f64,
}

impl SimMetrics {
    /// Computes metrics from a finished outcome.
    ///
    /// # Errors
    /// [`SimError::EmptyBatch`] for an outcome with no processes (the
    /// averages would be undefined); an invariant error if any process
    /// has not completed, which the engine never produces.
    pub fn calculate(outcome: &SimulationOutcome) -> SimResult<Self> {
        let n = outcome.processes.len();
        if n == 0 {
            return Err(SimError::EmptyBatch);
        }

        let mut total_turnaround: i64 = 0;
        let mut total_waiting: i64 = 0;
        for p in &outcome.processes {
            let (turnaround, waiting) = p
                .turnaround_time()
                .zip(p.waiting_time())
                .ok_or_else(|| SimError::InvariantViolation {
                    time: outcome.timeline.makespan(),
                    detail: format!("P{} has no completion time in a finished outcome", p.id),
                })?;
            total_turnaround += turnaround;
            total_waiting += waiting;
        }

        let makespan = outcome.timeline.makespan();
        // Positive bursts make the makespan positive for any non-empty run.
        let cpu_utilization = outcome.timeline.busy_time() as f64 / makespan as f64;

        Ok(Self {
            average_turnaround: total_turnaround as f64 / n as f64,
            average_waiting: total_waiting as f64 / n as f64,
            makespan,
            cpu_utilization,
            throughput: n as f64 / makespan as f64,
        })
    }
}
