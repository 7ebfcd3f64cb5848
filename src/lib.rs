//! Deterministic single-CPU scheduling simulator.
//!
//! Simulates a finite, fully known batch of processes under five
//! dispatch disciplines (FCFS, SJF, non-preemptive priority,
//! preemptive priority, round robin) and reports per-process
//! completion, turnaround, and waiting times, the merged Gantt
//! timeline, and aggregate averages.
//!
//! # Modules
//!
//! - **`models`**: Domain types: `Process`, `PolicyConfig`, `Timeline`,
//!   `GanttSegment`, `Occupant`
//! - **`policies`**: The `SchedulingPolicy` trait and the five disciplines
//! - **`engine`**: The simulation driver and its `SimulationOutcome`
//! - **`metrics`**: Aggregate KPIs over a finished run
//! - **`validation`**: Input integrity checks (ids, times, quantum, priorities)
//!
//! # Example
//!
//! ```
//! use cpu_sched::{simulate, PolicyConfig, Process};
//!
//! let batch = vec![Process::new(1, 0, 5), Process::new(2, 1, 3)];
//! let outcome = simulate(&batch, &PolicyConfig::RoundRobin { quantum: 2 }).unwrap();
//!
//! assert_eq!(outcome.timeline.makespan(), 8);
//! let metrics = outcome.metrics().unwrap();
//! assert!(metrics.average_waiting >= 0.0);
//! ```
//!
//! The simulation is a pure computation: given a batch and a
//! configuration it produces exactly one outcome, operating on an
//! owned copy of the input. There is no real concurrency; the
//! contention is the simulated one among processes for a single CPU.
//!
//! # References
//!
//! - Silberschatz, Galvin & Gagne (2018), "Operating System Concepts", Ch. 5
//! - Tanenbaum & Bos (2015), "Modern Operating Systems", Ch. 2.4

pub mod engine;
pub mod error;
pub mod metrics;
pub mod models;
pub mod policies;
pub mod validation;

pub use engine::{simulate, ResultRow, Simulation, SimulationOutcome};
pub use error::{SimError, SimResult};
pub use metrics::SimMetrics;
pub use models::{GanttSegment, Occupant, PolicyConfig, Process, ProcessId, ProcessRequest, Timeline};
