//! The occupancy-annotated busy interval.

use chrono::NaiveDateTime;
use serde::Serialize;

/// A half-open span `[start, end)` during which `occupancy` people are busy.
///
/// Values are never mutated once built; merging produces new intervals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct BusyInterval {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    pub occupancy: usize,
}

impl BusyInterval {
    pub fn new(start: NaiveDateTime, end: NaiveDateTime, occupancy: usize) -> Self {
        debug_assert!(start <= end, "busy interval ends before it starts");
        Self {
            start,
            end,
            occupancy,
        }
    }

    /// A single person's raw busy record.
    pub fn single(start: NaiveDateTime, end: NaiveDateTime) -> Self {
        Self::new(start, end, 1)
    }

    /// True when the interval covers no time at all.
    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }

    /// Whether `instant` falls inside `[start, end)`.
    pub fn contains(&self, instant: NaiveDateTime) -> bool {
        self.start <= instant && instant < self.end
    }

    /// Two intervals overlap iff `a.start < b.end && b.start < a.end`.
    /// Touching intervals (`a.end == b.start`) do not overlap.
    pub fn overlaps(&self, other: &BusyInterval) -> bool {
        self.start < other.end && other.start < self.end
    }

    pub(crate) fn with_bounds(&self, start: NaiveDateTime, end: NaiveDateTime) -> Self {
        Self::new(start, end, self.occupancy)
    }
}
