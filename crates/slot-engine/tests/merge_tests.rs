//! Tests for folding busy intervals into an occupancy timeline.

use chrono::{NaiveDate, NaiveDateTime};
use slot_engine::merge::{classify, fold, Relation, Timeline};
use slot_engine::BusyInterval;

// ── Helpers ─────────────────────────────────────────────────────────────────

fn at(hour: u32, min: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2026, 7, 1)
        .unwrap()
        .and_hms_opt(hour, min, 0)
        .unwrap()
}

fn busy(start: (u32, u32), end: (u32, u32), occupancy: usize) -> BusyInterval {
    BusyInterval::new(at(start.0, start.1), at(end.0, end.1), occupancy)
}

fn person(start: (u32, u32), end: (u32, u32)) -> BusyInterval {
    busy(start, end, 1)
}

fn assert_well_formed(timeline: &Timeline) {
    for entry in timeline.entries() {
        assert!(entry.start < entry.end, "zero-length entry: {:?}", entry);
        assert!(entry.occupancy > 0, "zero occupancy entry: {:?}", entry);
    }
    for pair in timeline.entries().windows(2) {
        assert!(
            pair[0].end <= pair[1].start,
            "entries overlap or are out of order: {:?} then {:?}",
            pair[0],
            pair[1]
        );
    }
}

// ── classify ────────────────────────────────────────────────────────────────

#[test]
fn classify_covers_every_topology() {
    let existing = person((9, 0), (10, 0));

    assert_eq!(classify(&existing, &person((10, 0), (11, 0))), Relation::Disjoint);
    assert_eq!(classify(&existing, &person((8, 0), (9, 0))), Relation::Disjoint);
    assert_eq!(classify(&existing, &person((9, 30), (10, 30))), Relation::StartsInside);
    assert_eq!(classify(&existing, &person((9, 30), (10, 0))), Relation::StartsInside);
    assert_eq!(classify(&existing, &person((8, 30), (9, 30))), Relation::EndsInside);
    assert_eq!(classify(&existing, &person((9, 0), (9, 30))), Relation::EndsInside);
    assert_eq!(classify(&existing, &person((9, 15), (9, 45))), Relation::Contains);
    assert_eq!(classify(&existing, &person((8, 0), (11, 0))), Relation::Covered);
    assert_eq!(classify(&existing, &person((9, 0), (10, 0))), Relation::Covered);
}

// ── fold ────────────────────────────────────────────────────────────────────

#[test]
fn fold_incoming_starting_inside_splits_and_leaves_residual() {
    let folded = fold(&person((9, 0), (10, 0)), &person((9, 30), (10, 30)));

    assert_eq!(
        folded.produced,
        vec![busy((9, 0), (9, 30), 1), busy((9, 30), (10, 0), 2)]
    );
    assert_eq!(folded.residual, Some(busy((10, 0), (10, 30), 1)));
}

#[test]
fn fold_incoming_ending_inside_produces_three_pieces_in_order() {
    let folded = fold(&busy((9, 0), (10, 0), 2), &person((8, 30), (9, 30)));

    assert_eq!(
        folded.produced,
        vec![
            busy((8, 30), (9, 0), 1),
            busy((9, 0), (9, 30), 3),
            busy((9, 30), (10, 0), 2),
        ]
    );
    assert_eq!(folded.residual, None);
}

#[test]
fn fold_existing_contains_incoming() {
    let folded = fold(&person((9, 0), (12, 0)), &person((10, 0), (11, 0)));

    assert_eq!(
        folded.produced,
        vec![
            busy((9, 0), (10, 0), 1),
            busy((10, 0), (11, 0), 2),
            busy((11, 0), (12, 0), 1),
        ]
    );
    assert_eq!(folded.residual, None);
}

#[test]
fn fold_incoming_covers_existing() {
    let folded = fold(&person((9, 0), (10, 0)), &busy((8, 0), (11, 0), 2));

    assert_eq!(
        folded.produced,
        vec![busy((8, 0), (9, 0), 2), busy((9, 0), (10, 0), 3)]
    );
    assert_eq!(folded.residual, Some(busy((10, 0), (11, 0), 2)));
}

#[test]
fn fold_disjoint_passes_both_through() {
    let existing = person((9, 0), (10, 0));
    let incoming = person((11, 0), (12, 0));

    let folded = fold(&existing, &incoming);

    assert_eq!(folded.produced, vec![existing]);
    assert_eq!(folded.residual, Some(incoming));
}

#[test]
fn fold_touching_boundary_emits_no_zero_length_piece() {
    let existing = person((9, 0), (10, 0));
    let incoming = person((10, 0), (11, 0));

    let folded = fold(&existing, &incoming);

    assert_eq!(folded.produced, vec![existing]);
    assert_eq!(folded.residual, Some(incoming));
}

#[test]
fn fold_shared_start_omits_empty_head() {
    let folded = fold(&person((9, 0), (10, 0)), &person((9, 0), (9, 30)));

    assert_eq!(
        folded.produced,
        vec![busy((9, 0), (9, 30), 2), busy((9, 30), (10, 0), 1)]
    );
    assert_eq!(folded.residual, None);
}

#[test]
fn fold_shared_end_has_no_residual() {
    let folded = fold(&person((9, 0), (10, 0)), &person((9, 30), (10, 0)));

    assert_eq!(
        folded.produced,
        vec![busy((9, 0), (9, 30), 1), busy((9, 30), (10, 0), 2)]
    );
    assert_eq!(folded.residual, None);
}

#[test]
fn fold_identical_intervals_doubles_occupancy() {
    let folded = fold(&person((9, 0), (10, 0)), &person((9, 0), (10, 0)));

    assert_eq!(folded.produced, vec![busy((9, 0), (10, 0), 2)]);
    assert_eq!(folded.residual, None);
}

#[test]
fn fold_empty_incoming_is_consumed_without_change() {
    let existing = person((9, 0), (10, 0));
    let folded = fold(&existing, &person((9, 30), (9, 30)));

    assert_eq!(folded.produced, vec![existing]);
    assert_eq!(folded.residual, None);
}

// ── Timeline::ingest ────────────────────────────────────────────────────────

#[test]
fn ingest_into_empty_timeline_appends() {
    let mut timeline = Timeline::new();
    timeline.ingest(person((9, 0), (10, 0)));

    assert_eq!(timeline.entries(), &[person((9, 0), (10, 0))]);
}

#[test]
fn ingest_two_overlapping_people() {
    let mut timeline = Timeline::new();
    timeline.ingest(person((9, 0), (10, 0)));
    timeline.ingest(person((9, 30), (10, 30)));

    assert_eq!(
        timeline.entries(),
        &[
            busy((9, 0), (9, 30), 1),
            busy((9, 30), (10, 0), 2),
            busy((10, 0), (10, 30), 1),
        ]
    );
}

#[test]
fn ingest_before_existing_entries_is_sorted_in() {
    let mut timeline = Timeline::new();
    timeline.ingest(person((13, 0), (14, 0)));
    timeline.ingest(person((9, 0), (10, 0)));

    assert_eq!(
        timeline.entries(),
        &[person((9, 0), (10, 0)), person((13, 0), (14, 0))]
    );
}

#[test]
fn ingest_spanning_several_entries_fills_the_gaps() {
    let mut timeline = Timeline::new();
    timeline.ingest(person((9, 0), (10, 0)));
    timeline.ingest(person((11, 0), (12, 0)));
    timeline.ingest(person((8, 0), (13, 0)));

    assert_eq!(
        timeline.entries(),
        &[
            busy((8, 0), (9, 0), 1),
            busy((9, 0), (10, 0), 2),
            busy((10, 0), (11, 0), 1),
            busy((11, 0), (12, 0), 2),
            busy((12, 0), (13, 0), 1),
        ]
    );
    assert_well_formed(&timeline);
}

#[test]
fn ingest_keeps_entries_after_the_residual_is_consumed() {
    let mut timeline = Timeline::new();
    timeline.ingest(person((9, 0), (10, 0)));
    timeline.ingest(person((11, 0), (12, 0)));
    timeline.ingest(person((14, 0), (15, 0)));
    timeline.ingest(person((9, 15), (9, 45)));

    assert_eq!(
        timeline.entries(),
        &[
            busy((9, 0), (9, 15), 1),
            busy((9, 15), (9, 45), 2),
            busy((9, 45), (10, 0), 1),
            busy((11, 0), (12, 0), 1),
            busy((14, 0), (15, 0), 1),
        ]
    );
}

#[test]
fn ingest_touching_intervals_coalesce() {
    let mut timeline = Timeline::new();
    timeline.ingest(person((9, 0), (10, 0)));
    timeline.ingest(person((10, 0), (11, 0)));

    assert_eq!(timeline.entries(), &[person((9, 0), (11, 0))]);
}

#[test]
fn ingest_touching_intervals_with_different_occupancy_stay_split() {
    let mut timeline = Timeline::new();
    timeline.ingest(person((9, 0), (10, 0)));
    timeline.ingest(person((9, 0), (10, 0)));
    timeline.ingest(person((10, 0), (11, 0)));

    assert_eq!(
        timeline.entries(),
        &[busy((9, 0), (10, 0), 2), busy((10, 0), (11, 0), 1)]
    );
    assert_well_formed(&timeline);
}

#[test]
fn ingest_degenerate_interval_is_ignored() {
    let mut timeline = Timeline::new();
    timeline.ingest(person((9, 0), (10, 0)));
    timeline.ingest(person((9, 30), (9, 30)));
    timeline.ingest(busy((9, 0), (12, 0), 0));

    assert_eq!(timeline.entries(), &[person((9, 0), (10, 0))]);
}

#[test]
fn ingest_order_does_not_change_the_timeline() {
    let records = [
        person((9, 0), (10, 0)),
        person((10, 0), (11, 0)),
        person((9, 0), (11, 0)),
        person((9, 30), (9, 45)),
    ];

    let forward: Timeline = records.iter().copied().collect();
    let backward: Timeline = records.iter().rev().copied().collect();

    assert_eq!(forward, backward);
    assert_well_formed(&forward);
}

// ── Read-side helpers ───────────────────────────────────────────────────────

#[test]
fn occupancy_at_reports_covering_entry() {
    let timeline: Timeline = [person((9, 0), (10, 0)), person((9, 30), (10, 30))]
        .into_iter()
        .collect();

    assert_eq!(timeline.occupancy_at(at(8, 59)), 0);
    assert_eq!(timeline.occupancy_at(at(9, 0)), 1);
    assert_eq!(timeline.occupancy_at(at(9, 30)), 2);
    assert_eq!(timeline.occupancy_at(at(10, 0)), 1);
    assert_eq!(timeline.occupancy_at(at(10, 30)), 0);
}

#[test]
fn blocking_keeps_only_entries_with_too_few_free() {
    let timeline: Timeline = [person((9, 0), (10, 0)), person((9, 30), (10, 30))]
        .into_iter()
        .collect();

    let blocking: Vec<_> = timeline.blocking(2, 1).copied().collect();
    assert_eq!(blocking, vec![busy((9, 30), (10, 0), 2)]);

    let blocking: Vec<_> = timeline.blocking(2, 2).copied().collect();
    assert_eq!(blocking.len(), 3);
}

#[test]
fn extend_ingests_each_interval() {
    let mut timeline = Timeline::new();
    timeline.extend([person((9, 0), (10, 0)), person((9, 0), (10, 0))]);

    assert_eq!(timeline.len(), 1);
    assert_eq!(timeline.into_entries(), vec![busy((9, 0), (10, 0), 2)]);
}
