//! # slot-engine
//!
//! Find the earliest moment when enough people are free at the same time.
//!
//! Each person's busy records are folded into a single occupancy timeline: a
//! sorted, non-overlapping list of intervals annotated with how many people are
//! busy during each. The finder then walks the gaps between intervals that
//! leave too few people free and returns the first gap long enough for the
//! requested meeting.
//!
//! ## Modules
//!
//! - [`interval`] — `BusyInterval`, the occupancy-annotated span
//! - [`merge`] — fold busy intervals into a `Timeline`
//! - [`finder`] — earliest free slot search over a timeline
//! - [`schedule`] — parse schedule text into busy intervals
//! - [`calendar`] — load a directory of per-person schedules
//! - [`error`] — Error types

pub mod calendar;
pub mod error;
pub mod finder;
pub mod interval;
pub mod merge;
pub mod schedule;

pub use calendar::{Calendar, PersonSchedule};
pub use error::SlotError;
pub use finder::{find_slot, find_slot_in_calendar, SlotRequest};
pub use interval::BusyInterval;
pub use merge::{fold, Fold, Timeline};
