//! Locate the earliest shared free slot on an occupancy timeline.
//!
//! A timeline entry *blocks* a meeting when fewer than `min_people` of
//! `total_people` are free during it. Entries that leave enough people free
//! are ignored, so the search only walks the gaps between blocking entries.

use chrono::{NaiveDateTime, TimeDelta};
use serde::Serialize;
use tracing::info;

use crate::calendar::Calendar;
use crate::error::{Result, SlotError};
use crate::merge::Timeline;

/// Parameters of a slot search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SlotRequest {
    /// Required length of the slot.
    pub duration_minutes: u32,
    /// How many people must be free at once. The requester counts.
    pub min_people: usize,
}

impl SlotRequest {
    pub fn new(duration_minutes: u32, min_people: usize) -> Self {
        Self {
            duration_minutes,
            min_people,
        }
    }

    /// Reject requests that can never be satisfied by `total_people`.
    pub fn validate(&self, total_people: usize) -> Result<()> {
        if self.duration_minutes == 0 {
            return Err(SlotError::InvalidRequest(
                "duration must be at least one minute".to_string(),
            ));
        }
        if self.min_people == 0 {
            return Err(SlotError::InvalidRequest(
                "minimum people must be at least one".to_string(),
            ));
        }
        if self.min_people > total_people {
            return Err(SlotError::InsufficientPeople {
                required: self.min_people,
                available: total_people,
            });
        }
        Ok(())
    }
}

/// Whether an entry with `occupancy` busy people leaves fewer than
/// `min_people` of `total_people` free.
pub fn is_blocking(occupancy: usize, total_people: usize, min_people: usize) -> bool {
    total_people.saturating_sub(occupancy) < min_people
}

/// Find the earliest instant at or after `now` that starts a free span of
/// `duration_minutes` with at least `min_people` of `total_people` free.
///
/// The first gap is measured from `now`. Later gaps are measured from the end
/// of a blocking entry and the returned start is one second past that end.
/// With no qualifying gap the slot opens right after the last blocker.
///
/// Returns `None` only when the candidate instant overflows the timestamp range.
pub fn find_slot(
    timeline: &Timeline,
    total_people: usize,
    min_people: usize,
    duration_minutes: u32,
    now: NaiveDateTime,
) -> Option<NaiveDateTime> {
    let duration = TimeDelta::minutes(i64::from(duration_minutes));

    let mut free_from = now;
    let mut candidate = now;
    for blocker in timeline.blocking(total_people, min_people) {
        if blocker.end <= free_from {
            continue;
        }
        if blocker.start - free_from >= duration {
            return Some(candidate);
        }
        free_from = blocker.end;
        candidate = blocker.end.checked_add_signed(TimeDelta::seconds(1))?;
    }

    Some(candidate)
}

/// Validate `request` against `calendar`, fold every busy record and search the
/// resulting timeline.
pub fn find_slot_in_calendar(
    calendar: &Calendar,
    request: &SlotRequest,
    now: NaiveDateTime,
) -> Result<Option<NaiveDateTime>> {
    let total_people = calendar.total_people();
    request.validate(total_people)?;

    let timeline = calendar.timeline();
    let slot = find_slot(
        &timeline,
        total_people,
        request.min_people,
        request.duration_minutes,
        now,
    );

    match slot {
        Some(start) => info!(%start, total_people, "found free slot"),
        None => info!(total_people, "no free slot found"),
    }
    Ok(slot)
}
