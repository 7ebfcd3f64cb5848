//! Round-robin discipline.
//!
//! A FIFO ready queue and a fixed quantum. Each cycle dequeues the
//! head, runs it for `min(remaining, quantum)`, then refills the
//! queue: processes that arrived during the slice are admitted first,
//! in ascending id order, and only then is the preempted process put
//! back. A process arriving exactly when a slice ends therefore queues
//! ahead of the process that just ran.
//!
//! The admit-then-requeue step runs at the start of the next decision
//! instead of the end of the previous one; the clock has not moved in
//! between, so the orderings are identical.
//!
//! # Reference
//! Silberschatz et al. (2018), "Operating System Concepts", Ch. 5.3.4

use std::collections::VecDeque;

use super::{next_arrival, Decision, SchedulingPolicy};
use crate::error::{SimError, SimResult};
use crate::models::Process;

/// Round-robin over a FIFO ready queue.
///
/// Queue membership is tracked in a boolean vector alongside the
/// queue, so admission stays O(n) per cycle without rescanning the
/// queue itself.
#[derive(Debug)]
pub struct RoundRobin {
    quantum: i64,
    queue: VecDeque<usize>,
    queued: Vec<bool>,
    /// Process whose slice just ended and may need requeueing.
    preempted: Option<usize>,
    seeded: bool,
}

impl RoundRobin {
    /// Creates a round-robin policy. The quantum must be positive;
    /// validation enforces this before the policy is built.
    pub fn new(quantum: i64) -> Self {
        Self {
            quantum,
            queue: VecDeque::new(),
            queued: Vec::new(),
            preempted: None,
            seeded: false,
        }
    }

    /// Enqueues every process already arrived at `now`, in
    /// `(arrival_time, id)` order. Runs once, at the first decision.
    fn seed(&mut self, processes: &[Process], now: i64) {
        self.queued = vec![false; processes.len()];
        let mut order: Vec<usize> = (0..processes.len()).collect();
        order.sort_by_key(|&i| (processes[i].arrival_time, processes[i].id));
        for i in order {
            if processes[i].arrival_time <= now {
                self.queue.push_back(i);
                self.queued[i] = true;
            }
        }
        self.seeded = true;
    }

    /// Admits newly arrived processes in ascending id order, then
    /// requeues the preempted process behind them.
    fn refill(&mut self, processes: &[Process], now: i64) {
        let preempted = self.preempted.take();
        for (i, p) in processes.iter().enumerate() {
            if Some(i) == preempted {
                continue;
            }
            if p.is_ready(now) && !self.queued[i] {
                self.queue.push_back(i);
                self.queued[i] = true;
            }
        }
        if let Some(i) = preempted {
            if processes[i].remaining_time > 0 {
                self.queue.push_back(i);
                self.queued[i] = true;
            }
        }
    }
}

impl SchedulingPolicy for RoundRobin {
    fn name(&self) -> &'static str {
        "RR"
    }

    fn next_slice(&mut self, processes: &[Process], now: i64) -> SimResult<Decision> {
        if !self.seeded {
            self.seed(processes, now);
        } else {
            self.refill(processes, now);
        }

        let index = match self.queue.pop_front() {
            Some(i) => i,
            None => {
                // An arrived, unfinished process missing from the
                // queue is a scheduling bug, not an idle period.
                if let Some(stuck) = processes.iter().find(|p| p.is_ready(now)) {
                    return Err(SimError::InvariantViolation {
                        time: now,
                        detail: format!(
                            "ready queue empty with P{} arrived and unfinished",
                            stuck.id
                        ),
                    });
                }
                return match next_arrival(processes, now) {
                    Some(until) => Ok(Decision::Idle { until }),
                    None => Err(SimError::InvariantViolation {
                        time: now,
                        detail: "ready queue empty with no future arrivals".into(),
                    }),
                };
            }
        };

        self.queued[index] = false;
        self.preempted = Some(index);
        Ok(Decision::Run {
            index,
            duration: processes[index].remaining_time.min(self.quantum),
        })
    }
}
