//! Simulation domain models.
//!
//! Leaf data types for the simulator: the process record, the scheduler
//! configuration, and the execution timeline. These carry no policy
//! logic; they are mutated by the engine and read by everything else.
//!
//! # Domain Mappings
//!
//! | cpu-sched | OS textbook term |
//! |-----------|------------------|
//! | Process | Process / PCB |
//! | Occupant | Gantt chart cell |
//! | GanttSegment | Gantt chart interval |
//! | Timeline | Gantt chart |
//! | PolicyConfig | Dispatch discipline |

mod config;
mod process;
mod timeline;

pub use config::PolicyConfig;
pub use process::{Process, ProcessId, ProcessRequest};
pub use timeline::{GanttSegment, Occupant, Timeline};
