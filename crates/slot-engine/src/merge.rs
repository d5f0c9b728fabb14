//! Fold busy intervals into an occupancy timeline.
//!
//! The timeline is a sorted, non-overlapping list of [`BusyInterval`]s, each
//! annotated with how many raw busy records cover it. New records are folded in
//! one at a time: the incoming interval is compared against each timeline entry
//! in order, split at every boundary it crosses, and whatever sticks out past
//! the current entry (the *residual*) is carried on to the next one.

use chrono::NaiveDateTime;
use tracing::{debug, trace};

use crate::finder;
use crate::interval::BusyInterval;

/// How an incoming interval `[s2, e2)` relates to an existing entry `[s1, e1)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Relation {
    /// No shared time. Touching boundaries (`e1 == s2` or `e2 == s1`) land here.
    Disjoint,
    /// `s1 < s2 < e1 <= e2`: incoming overlaps the tail of existing.
    StartsInside,
    /// `s2 <= s1 < e2 < e1`: incoming overlaps the head of existing.
    EndsInside,
    /// `s1 < s2` and `e2 < e1`: existing strictly contains incoming.
    Contains,
    /// `s2 <= s1` and `e1 <= e2`: incoming covers all of existing.
    Covered,
}

/// Classify the overlap topology of `incoming` against `existing`.
pub fn classify(existing: &BusyInterval, incoming: &BusyInterval) -> Relation {
    if !existing.overlaps(incoming) {
        Relation::Disjoint
    } else if existing.start < incoming.start {
        if incoming.end < existing.end {
            Relation::Contains
        } else {
            Relation::StartsInside
        }
    } else if incoming.end < existing.end {
        Relation::EndsInside
    } else {
        Relation::Covered
    }
}

/// Result of folding one incoming interval against one timeline entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fold {
    /// Pieces that replace the existing entry, ordered by start.
    pub produced: Vec<BusyInterval>,
    /// The part of the incoming interval past the existing entry's end.
    /// `None` once the incoming interval is fully consumed.
    pub residual: Option<BusyInterval>,
}

/// Fold `incoming` against a single `existing` timeline entry.
///
/// Overlapping time is emitted once with the summed occupancy; the parts of
/// either interval outside the overlap keep their own occupancy. No produced
/// piece is ever zero-length. An empty or zero-occupancy `incoming` leaves
/// `existing` untouched and has no residual.
pub fn fold(existing: &BusyInterval, incoming: &BusyInterval) -> Fold {
    if incoming.is_empty() || incoming.occupancy == 0 {
        return Fold {
            produced: vec![*existing],
            residual: None,
        };
    }

    let relation = classify(existing, incoming);
    trace!(?relation, ?existing, ?incoming, "fold");

    let combined = existing.occupancy + incoming.occupancy;
    let mut produced = Vec::with_capacity(3);
    let residual = match relation {
        Relation::Disjoint => {
            return Fold {
                produced: vec![*existing],
                residual: Some(*incoming),
            };
        }
        Relation::StartsInside => {
            push_piece(&mut produced, existing.start, incoming.start, existing.occupancy);
            push_piece(&mut produced, incoming.start, existing.end, combined);
            remainder(incoming, existing.end)
        }
        Relation::EndsInside => {
            push_piece(&mut produced, incoming.start, existing.start, incoming.occupancy);
            push_piece(&mut produced, existing.start, incoming.end, combined);
            push_piece(&mut produced, incoming.end, existing.end, existing.occupancy);
            None
        }
        Relation::Contains => {
            push_piece(&mut produced, existing.start, incoming.start, existing.occupancy);
            push_piece(&mut produced, incoming.start, incoming.end, combined);
            push_piece(&mut produced, incoming.end, existing.end, existing.occupancy);
            None
        }
        Relation::Covered => {
            push_piece(&mut produced, incoming.start, existing.start, incoming.occupancy);
            push_piece(&mut produced, existing.start, existing.end, combined);
            remainder(incoming, existing.end)
        }
    };

    Fold { produced, residual }
}

fn push_piece(
    pieces: &mut Vec<BusyInterval>,
    start: NaiveDateTime,
    end: NaiveDateTime,
    occupancy: usize,
) {
    if start < end {
        pieces.push(BusyInterval::new(start, end, occupancy));
    }
}

fn remainder(incoming: &BusyInterval, from: NaiveDateTime) -> Option<BusyInterval> {
    (from < incoming.end).then(|| incoming.with_bounds(from, incoming.end))
}

/// Sorted, non-overlapping occupancy timeline.
///
/// Invariants after every [`Timeline::ingest`]:
/// - entries are strictly ordered by start and `entry.end <= next.start`;
/// - no entry is zero-length or has zero occupancy;
/// - touching entries never share an occupancy (they are coalesced), so the
///   timeline does not depend on the order records were ingested in.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Timeline {
    entries: Vec<BusyInterval>,
}

impl Timeline {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> &[BusyInterval] {
        &self.entries
    }

    pub fn into_entries(self) -> Vec<BusyInterval> {
        self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Fold one raw busy interval into the timeline.
    ///
    /// The current entries are read from a snapshot and the result is built in
    /// a fresh buffer, which is sorted, coalesced and swapped in at the end.
    /// Degenerate input (`start == end` or zero occupancy) is ignored.
    pub fn ingest(&mut self, raw: BusyInterval) {
        if raw.is_empty() || raw.occupancy == 0 {
            trace!(?raw, "skipping degenerate interval");
            return;
        }

        let snapshot = std::mem::take(&mut self.entries);
        let mut rebuilt = Vec::with_capacity(snapshot.len() + 3);
        let mut remaining = snapshot.into_iter();

        let mut residual = Some(raw);
        while let Some(incoming) = residual {
            let Some(existing) = remaining.next() else {
                break;
            };
            let folded = fold(&existing, &incoming);
            rebuilt.extend(folded.produced);
            residual = folded.residual;
        }

        // Entries past the point where the residual ran out are untouched.
        rebuilt.extend(remaining);
        rebuilt.extend(residual);

        // Pieces that precede an existing entry are emitted out of order.
        rebuilt.sort_by_key(|entry| entry.start);
        self.entries = coalesce(rebuilt);

        debug!(start = %raw.start, end = %raw.end, entries = self.entries.len(), "ingested busy interval");
    }

    /// Occupancy of the entry covering `instant`, or 0 when nobody is busy.
    pub fn occupancy_at(&self, instant: NaiveDateTime) -> usize {
        let idx = self.entries.partition_point(|entry| entry.end <= instant);
        self.entries
            .get(idx)
            .filter(|entry| entry.contains(instant))
            .map_or(0, |entry| entry.occupancy)
    }

    /// Entries where fewer than `min_people` of `total_people` are free.
    pub fn blocking(
        &self,
        total_people: usize,
        min_people: usize,
    ) -> impl Iterator<Item = &BusyInterval> + '_ {
        self.entries
            .iter()
            .filter(move |entry| finder::is_blocking(entry.occupancy, total_people, min_people))
    }
}

impl FromIterator<BusyInterval> for Timeline {
    fn from_iter<I: IntoIterator<Item = BusyInterval>>(iter: I) -> Self {
        let mut timeline = Timeline::new();
        timeline.extend(iter);
        timeline
    }
}

impl Extend<BusyInterval> for Timeline {
    fn extend<I: IntoIterator<Item = BusyInterval>>(&mut self, iter: I) {
        for raw in iter {
            self.ingest(raw);
        }
    }
}

/// Join touching entries that carry the same occupancy. Input must be sorted.
fn coalesce(sorted: Vec<BusyInterval>) -> Vec<BusyInterval> {
    let mut merged: Vec<BusyInterval> = Vec::with_capacity(sorted.len());
    for entry in sorted {
        if let Some(last) = merged.last_mut() {
            if last.end == entry.start && last.occupancy == entry.occupancy {
                *last = last.with_bounds(last.start, entry.end);
                continue;
            }
        }
        merged.push(entry);
    }
    merged
}
