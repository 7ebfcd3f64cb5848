//! Simulation driver.
//!
//! Owns the clock, the process state, and the timeline; a
//! [`SchedulingPolicy`](crate::policies::SchedulingPolicy) only decides
//! what runs next. One loop serves all five disciplines.
//!
//! # Algorithm
//!
//! 1. Validate the batch and configuration; fail atomically.
//! 2. Clone the batch and reset per-run state. The caller's list is
//!    never mutated.
//! 3. Until every process completes: ask the policy for a decision,
//!    advance the clock by the slice (or idle jump), record the
//!    timeline segment, and fix completion/derived times the instant
//!    remaining time reaches zero.
//!
//! Termination is guaranteed: bursts are positive, every run decision
//! makes strictly positive progress, and every idle decision jumps to
//! a strictly later arrival.

use log::{debug, trace};
use serde::{Deserialize, Serialize};

use crate::error::{SimError, SimResult};
use crate::metrics::SimMetrics;
use crate::models::{Occupant, PolicyConfig, Process, ProcessId, Timeline};
use crate::policies::{self, Decision};
use crate::validation::validate_batch;

/// A configured simulation run.
///
/// # Example
///
/// ```
/// use cpu_sched::engine::Simulation;
/// use cpu_sched::models::{PolicyConfig, Process};
///
/// let batch = vec![Process::new(1, 0, 5), Process::new(2, 1, 3)];
/// let outcome = Simulation::new(batch, PolicyConfig::Fcfs).run().unwrap();
/// assert_eq!(outcome.processes[0].completion_time, Some(5));
/// assert_eq!(outcome.timeline.makespan(), 8);
/// ```
#[derive(Debug, Clone)]
pub struct Simulation {
    processes: Vec<Process>,
    config: PolicyConfig,
}

/// Finalized result of a run: every process completed, plus the
/// gap-free execution timeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationOutcome {
    /// Finished processes, in input (id) order.
    pub processes: Vec<Process>,
    /// Merged execution timeline from t=0 to the makespan.
    pub timeline: Timeline,
    /// Name of the policy that produced this outcome.
    pub policy: String,
}

/// One row of the per-process result table: the typed boundary a
/// text renderer consumes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultRow {
    /// Process id.
    pub id: ProcessId,
    /// Arrival time.
    pub arrival_time: i64,
    /// Burst time.
    pub burst_time: i64,
    /// Completion time.
    pub completion_time: i64,
    /// Turnaround time.
    pub turnaround_time: i64,
    /// Waiting time.
    pub waiting_time: i64,
    /// Priority, when the policy used one.
    pub priority: Option<i64>,
}

impl Simulation {
    /// Creates a run over the given batch and configuration.
    pub fn new(processes: Vec<Process>, config: PolicyConfig) -> Self {
        Self { processes, config }
    }

    /// Runs the simulation to completion.
    ///
    /// # Errors
    /// Validation errors before any state is touched; an
    /// [`SimError::InvariantViolation`] if a policy or the engine
    /// misbehaves mid-run (a bug, not an input problem).
    pub fn run(&self) -> SimResult<SimulationOutcome> {
        validate_batch(&self.processes, &self.config).map_err(|mut errors| errors.remove(0))?;

        let mut procs = self.processes.clone();
        for p in &mut procs {
            p.reset();
        }

        let mut policy = policies::build(&self.config);
        let mut timeline = Timeline::new();
        let mut now: i64 = 0;
        let mut completed = 0usize;

        debug!(
            "dispatching {} processes under {}",
            procs.len(),
            policy.name()
        );

        while completed < procs.len() {
            match policy.next_slice(&procs, now)? {
                Decision::Idle { until } => {
                    if until <= now {
                        return Err(SimError::InvariantViolation {
                            time: now,
                            detail: format!("idle decision does not advance the clock (until={until})"),
                        });
                    }
                    trace!("t={now}: idle until {until}");
                    timeline.push(Occupant::Idle, now, until);
                    now = until;
                }
                Decision::Run { index, duration } => {
                    let p = procs.get_mut(index).ok_or_else(|| SimError::InvariantViolation {
                        time: now,
                        detail: format!("decision names process index {index} out of bounds"),
                    })?;
                    if duration <= 0 || duration > p.remaining_time || p.arrival_time > now {
                        return Err(SimError::InvariantViolation {
                            time: now,
                            detail: format!(
                                "bad slice for P{}: duration={duration}, remaining={}, arrival={}",
                                p.id, p.remaining_time, p.arrival_time
                            ),
                        });
                    }

                    let end = now + duration;
                    p.remaining_time -= duration;
                    timeline.push(Occupant::Running(p.id), now, end);
                    trace!("t={now}: P{} runs until {end}", p.id);
                    now = end;

                    if p.remaining_time == 0 {
                        p.completion_time = Some(now);
                        completed += 1;
                        debug!(
                            "t={now}: P{} completed (turnaround {}, waiting {})",
                            p.id,
                            p.turnaround_time().unwrap_or(0),
                            p.waiting_time().unwrap_or(0)
                        );
                    }
                }
            }
        }

        debug_assert!(timeline.is_well_formed());
        debug_assert!(procs.iter().all(|p| p.waiting_time().unwrap_or(-1) >= 0));

        Ok(SimulationOutcome {
            processes: procs,
            timeline,
            policy: self.config.name().to_string(),
        })
    }
}

/// Convenience wrapper: clones the batch and runs it under `config`.
pub fn simulate(processes: &[Process], config: &PolicyConfig) -> SimResult<SimulationOutcome> {
    Simulation::new(processes.to_vec(), *config).run()
}

impl SimulationOutcome {
    /// Per-process result rows in id order.
    ///
    /// Every process in an outcome has completed, so the unwrapped
    /// fields are always present; a process that somehow is not is a
    /// constructed-by-hand outcome, and is skipped.
    pub fn result_rows(&self) -> Vec<ResultRow> {
        self.processes
            .iter()
            .filter_map(|p| {
                Some(ResultRow {
                    id: p.id,
                    arrival_time: p.arrival_time,
                    burst_time: p.burst_time,
                    completion_time: p.completion_time?,
                    turnaround_time: p.turnaround_time()?,
                    waiting_time: p.waiting_time()?,
                    priority: p.priority,
                })
            })
            .collect()
    }

    /// Overall makespan.
    pub fn makespan(&self) -> i64 {
        self.timeline.makespan()
    }

    /// Aggregate metrics for this outcome.
    pub fn metrics(&self) -> SimResult<SimMetrics> {
        SimMetrics::calculate(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::GanttSegment;
    use rand::rngs::SmallRng;
    use rand::{Rng, SeedableRng};

    fn seg(occupant: Occupant, start: i64, end: i64) -> GanttSegment {
        GanttSegment {
            occupant,
            start_time: start,
            end_time: end,
        }
    }

    fn completions(outcome: &SimulationOutcome) -> Vec<i64> {
        outcome
            .processes
            .iter()
            .map(|p| p.completion_time.unwrap())
            .collect()
    }

    #[test]
    fn test_fcfs_reference_case() {
        // Arrivals (0,1,2), bursts (5,3,2).
        let batch = vec![
            Process::new(1, 0, 5),
            Process::new(2, 1, 3),
            Process::new(3, 2, 2),
        ];
        let outcome = simulate(&batch, &PolicyConfig::Fcfs).unwrap();
        assert_eq!(completions(&outcome), vec![5, 8, 10]);
        let rows = outcome.result_rows();
        assert_eq!(
            rows.iter().map(|r| r.turnaround_time).collect::<Vec<_>>(),
            vec![5, 7, 8]
        );
        assert_eq!(
            rows.iter().map(|r| r.waiting_time).collect::<Vec<_>>(),
            vec![0, 4, 6]
        );
        assert_eq!(
            outcome.timeline.segments(),
            &[
                seg(Occupant::Running(1), 0, 5),
                seg(Occupant::Running(2), 5, 8),
                seg(Occupant::Running(3), 8, 10),
            ]
        );
    }

    #[test]
    fn test_sjf_reference_case() {
        let batch = vec![
            Process::new(1, 0, 7),
            Process::new(2, 2, 4),
            Process::new(3, 4, 1),
            Process::new(4, 5, 4),
        ];
        let outcome = simulate(&batch, &PolicyConfig::Sjf).unwrap();
        // P1 runs 0..7 alone, then P3 (shortest), then P2 over P4 by id.
        assert_eq!(
            outcome.timeline.segments(),
            &[
                seg(Occupant::Running(1), 0, 7),
                seg(Occupant::Running(3), 7, 8),
                seg(Occupant::Running(2), 8, 12),
                seg(Occupant::Running(4), 12, 16),
            ]
        );
        assert_eq!(completions(&outcome), vec![7, 12, 8, 16]);
    }

    #[test]
    fn test_round_robin_reference_case() {
        let batch = vec![Process::new(1, 0, 5), Process::new(2, 1, 3)];
        let outcome = simulate(&batch, &PolicyConfig::RoundRobin { quantum: 2 }).unwrap();
        assert_eq!(
            outcome.timeline.segments(),
            &[
                seg(Occupant::Running(1), 0, 2),
                seg(Occupant::Running(2), 2, 4),
                seg(Occupant::Running(1), 4, 6),
                seg(Occupant::Running(2), 6, 7),
                seg(Occupant::Running(1), 7, 8),
            ]
        );
        assert_eq!(completions(&outcome), vec![8, 7]);
    }

    #[test]
    fn test_preemptive_priority_reference_case() {
        let batch = vec![
            Process::new(1, 0, 4).with_priority(2),
            Process::new(2, 1, 3).with_priority(1),
        ];
        let outcome = simulate(&batch, &PolicyConfig::PriorityPreemptive).unwrap();
        // P1 runs 0..1, P2 preempts and runs 1..4, P1 resumes 4..7.
        assert_eq!(
            outcome.timeline.segments(),
            &[
                seg(Occupant::Running(1), 0, 1),
                seg(Occupant::Running(2), 1, 4),
                seg(Occupant::Running(1), 4, 7),
            ]
        );
        assert_eq!(completions(&outcome), vec![7, 4]);
    }

    #[test]
    fn test_nonpreemptive_priority_finishes_running_slice() {
        let batch = vec![
            Process::new(1, 0, 4).with_priority(2),
            Process::new(2, 1, 3).with_priority(1),
        ];
        let outcome = simulate(&batch, &PolicyConfig::PriorityNonPreemptive).unwrap();
        // P2 is more urgent but P1 was already committed.
        assert_eq!(
            outcome.timeline.segments(),
            &[
                seg(Occupant::Running(1), 0, 4),
                seg(Occupant::Running(2), 4, 7),
            ]
        );
    }

    #[test]
    fn test_idle_gap_recorded_explicitly() {
        let batch = vec![Process::new(1, 3, 2), Process::new(2, 9, 1)];
        let outcome = simulate(&batch, &PolicyConfig::Fcfs).unwrap();
        assert_eq!(
            outcome.timeline.segments(),
            &[
                seg(Occupant::Idle, 0, 3),
                seg(Occupant::Running(1), 3, 5),
                seg(Occupant::Idle, 5, 9),
                seg(Occupant::Running(2), 9, 10),
            ]
        );
        assert_eq!(outcome.timeline.idle_time(), 7);
    }

    #[test]
    fn test_input_batch_not_mutated() {
        let batch = vec![Process::new(1, 0, 5), Process::new(2, 1, 3)];
        let before = batch.clone();
        let _ = simulate(&batch, &PolicyConfig::Sjf).unwrap();
        assert_eq!(batch, before);
    }

    #[test]
    fn test_empty_batch_refused() {
        assert_eq!(
            simulate(&[], &PolicyConfig::Fcfs).unwrap_err(),
            SimError::EmptyBatch
        );
    }

    #[test]
    fn test_invalid_input_fails_atomically() {
        let batch = vec![Process::new(1, 0, 0)];
        assert!(matches!(
            simulate(&batch, &PolicyConfig::Fcfs).unwrap_err(),
            SimError::InvalidProcess { id: 1, .. }
        ));

        let ok = vec![Process::new(1, 0, 5)];
        assert!(matches!(
            simulate(&ok, &PolicyConfig::RoundRobin { quantum: 0 }).unwrap_err(),
            SimError::InvalidConfig { .. }
        ));
        assert!(matches!(
            simulate(&ok, &PolicyConfig::PriorityPreemptive).unwrap_err(),
            SimError::InvalidConfig { .. }
        ));
    }

    #[test]
    fn test_outcome_serde_round_trip() {
        let batch = vec![Process::new(1, 0, 2), Process::new(2, 0, 1)];
        let outcome = simulate(&batch, &PolicyConfig::Sjf).unwrap();
        let json = serde_json::to_string(&outcome).unwrap();
        let back: SimulationOutcome = serde_json::from_str(&json).unwrap();
        assert_eq!(back.timeline, outcome.timeline);
        assert_eq!(back.processes, outcome.processes);
        assert_eq!(back.policy, "SJF");
    }

    /// Universal invariants, checked across every policy on random
    /// batches: the turnaround and waiting identities, non-negative
    /// waiting, a well-formed timeline, and busy time equal to the
    /// total burst demand.
    #[test]
    fn test_random_batches_satisfy_invariants() {
        let mut rng = SmallRng::seed_from_u64(42);
        let policies = [
            PolicyConfig::Fcfs,
            PolicyConfig::Sjf,
            PolicyConfig::PriorityNonPreemptive,
            PolicyConfig::PriorityPreemptive,
            PolicyConfig::RoundRobin { quantum: 3 },
            PolicyConfig::RoundRobin { quantum: 1 },
        ];

        for _ in 0..50 {
            let n = rng.random_range(1..=8);
            let batch: Vec<Process> = (0..n)
                .map(|i| {
                    Process::new(
                        i as u32 + 1,
                        rng.random_range(0..12),
                        rng.random_range(1..=9),
                    )
                    .with_priority(rng.random_range(0..4))
                })
                .collect();
            let total_burst: i64 = batch.iter().map(|p| p.burst_time).sum();

            for config in &policies {
                let outcome = simulate(&batch, config).unwrap();
                assert!(outcome.timeline.is_well_formed(), "{config:?}");
                assert_eq!(outcome.timeline.busy_time(), total_burst, "{config:?}");

                for p in &outcome.processes {
                    let completion = p.completion_time.unwrap();
                    let turnaround = p.turnaround_time().unwrap();
                    let waiting = p.waiting_time().unwrap();
                    assert_eq!(turnaround, completion - p.arrival_time);
                    assert_eq!(waiting, turnaround - p.burst_time);
                    assert!(waiting >= 0, "{config:?}: P{} waited {waiting}", p.id);
                    assert_eq!(p.remaining_time, 0);

                    // The per-process timeline shares must add up too.
                    let granted: i64 = outcome
                        .timeline
                        .segments_for(p.id)
                        .iter()
                        .map(|s| s.duration())
                        .sum();
                    assert_eq!(granted, p.burst_time, "{config:?}: P{}", p.id);
                }
            }
        }
    }
}
