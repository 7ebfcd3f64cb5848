//! Execution timeline (Gantt chart) model.
//!
//! The timeline is an ordered, gap-free partition of `[0, makespan]`
//! into segments, each attributing the CPU to one occupant: a running
//! process or an explicit idle marker. Adjacent segments never share
//! an occupant; a contiguous extension merges into its predecessor.
//!
//! # Reference
//! Silberschatz et al. (2018), "Operating System Concepts", Ch. 5.2
//! (Gantt chart notation)

use serde::{Deserialize, Serialize};

use super::ProcessId;

/// Who holds the CPU during a segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Occupant {
    /// A process is executing.
    Running(ProcessId),
    /// No process is ready; the CPU is idle.
    Idle,
}

impl Occupant {
    /// Whether this occupant is the idle marker.
    #[inline]
    pub fn is_idle(&self) -> bool {
        matches!(self, Occupant::Idle)
    }

    /// The running process id, if any.
    pub fn process_id(&self) -> Option<ProcessId> {
        match self {
            Occupant::Running(id) => Some(*id),
            Occupant::Idle => None,
        }
    }
}

/// One contiguous interval of CPU attribution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GanttSegment {
    /// Who held the CPU.
    pub occupant: Occupant,
    /// Segment start (inclusive).
    pub start_time: i64,
    /// Segment end (exclusive). Always greater than `start_time`.
    pub end_time: i64,
}

impl GanttSegment {
    /// Segment length.
    #[inline]
    pub fn duration(&self) -> i64 {
        self.end_time - self.start_time
    }
}

/// Ordered, gap-free sequence of Gantt segments.
///
/// Append-only: segments are pushed as simulated time advances, and a
/// push that contiguously extends the previous segment with the same
/// occupant merges into it instead of appending.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Timeline {
    segments: Vec<GanttSegment>,
}

impl Timeline {
    /// Creates an empty timeline.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records that `occupant` held the CPU over `[start, end)`.
    ///
    /// Merges into the previous segment when the occupant matches and
    /// the interval is contiguous. Zero-length intervals are ignored.
    pub fn push(&mut self, occupant: Occupant, start_time: i64, end_time: i64) {
        debug_assert!(start_time <= end_time);
        debug_assert!(
            self.segments
                .last()
                .map_or(true, |last| last.end_time == start_time),
            "timeline must stay gap-free"
        );
        if start_time == end_time {
            return;
        }
        if let Some(last) = self.segments.last_mut() {
            if last.occupant == occupant && last.end_time == start_time {
                last.end_time = end_time;
                return;
            }
        }
        self.segments.push(GanttSegment {
            occupant,
            start_time,
            end_time,
        });
    }

    /// The recorded segments, in time order.
    pub fn segments(&self) -> &[GanttSegment] {
        &self.segments
    }

    /// Number of segments.
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Whether nothing has been recorded.
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// End of the last segment, or 0 for an empty timeline.
    pub fn makespan(&self) -> i64 {
        self.segments.last().map_or(0, |s| s.end_time)
    }

    /// Total duration attributed to running processes.
    pub fn busy_time(&self) -> i64 {
        self.segments
            .iter()
            .filter(|s| !s.occupant.is_idle())
            .map(GanttSegment::duration)
            .sum()
    }

    /// Total duration attributed to the idle marker.
    pub fn idle_time(&self) -> i64 {
        self.makespan() - self.busy_time()
    }

    /// Segments during which the given process ran.
    pub fn segments_for(&self, id: ProcessId) -> Vec<&GanttSegment> {
        self.segments
            .iter()
            .filter(|s| s.occupant == Occupant::Running(id))
            .collect()
    }

    /// Whether the segments partition `[0, makespan]`: positive
    /// lengths, no gaps or overlaps, and no same-occupant neighbors.
    pub fn is_well_formed(&self) -> bool {
        let mut cursor = 0;
        let mut prev: Option<Occupant> = None;
        for s in &self.segments {
            if s.start_time != cursor || s.duration() <= 0 || prev == Some(s.occupant) {
                return false;
            }
            cursor = s.end_time;
            prev = Some(s.occupant);
        }
        true
    }
}
