//! Parse plain-text schedules into busy intervals.
//!
//! One record per line, either a range or a whole day:
//!
//! ```text
//! 2026-03-16 09:00:00 - 2026-03-16 10:30:00
//! 2026-03-17
//! ```
//!
//! A whole-day record covers `00:00:00` to `23:59:59` of that date.

use chrono::{NaiveDate, NaiveDateTime, TimeDelta};
use thiserror::Error;

use crate::error::{Result, SlotError};
use crate::interval::BusyInterval;

/// Format of a full timestamp in a schedule file.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Format of a whole-day record.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

const RANGE_SEPARATOR: &str = " - ";
const SECONDS_PER_DAY: i64 = 24 * 60 * 60;

/// Why a single schedule line was rejected.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RecordError {
    #[error("invalid timestamp '{value}'")]
    InvalidTimestamp {
        value: String,
        #[source]
        source: chrono::ParseError,
    },

    #[error("invalid date '{value}'")]
    InvalidDate {
        value: String,
        #[source]
        source: chrono::ParseError,
    },

    #[error("expected 'start - end' or a single date, found {0} separators")]
    TooManyParts(usize),

    #[error("interval ends before it starts ({start} > {end})")]
    Inverted {
        start: NaiveDateTime,
        end: NaiveDateTime,
    },
}

/// Parse one schedule line. Blank lines yield `Ok(None)`.
pub fn parse_line(line: &str) -> std::result::Result<Option<BusyInterval>, RecordError> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }

    let parts: Vec<&str> = line.split(RANGE_SEPARATOR).map(str::trim).collect();
    let (start, end) = match parts.as_slice() {
        [day] => whole_day(day)?,
        [start, end] => (parse_timestamp(start)?, parse_timestamp(end)?),
        _ => return Err(RecordError::TooManyParts(parts.len() - 1)),
    };

    if end < start {
        return Err(RecordError::Inverted { start, end });
    }
    Ok(Some(BusyInterval::single(start, end)))
}

/// Parse every record of one person's schedule.
///
/// `source_name` identifies the schedule in error messages.
pub fn parse_schedule(source_name: &str, text: &str) -> Result<Vec<BusyInterval>> {
    let mut busy = Vec::new();
    for (idx, line) in text.lines().enumerate() {
        match parse_line(line) {
            Ok(Some(interval)) => busy.push(interval),
            Ok(None) => {}
            Err(source) => {
                return Err(SlotError::MalformedRecord {
                    source_name: source_name.to_string(),
                    line: idx + 1,
                    source,
                });
            }
        }
    }
    Ok(busy)
}

/// Parse a timestamp in [`TIMESTAMP_FORMAT`].
pub fn parse_timestamp(value: &str) -> std::result::Result<NaiveDateTime, RecordError> {
    NaiveDateTime::parse_from_str(value, TIMESTAMP_FORMAT).map_err(|source| {
        RecordError::InvalidTimestamp {
            value: value.to_string(),
            source,
        }
    })
}

fn whole_day(value: &str) -> std::result::Result<(NaiveDateTime, NaiveDateTime), RecordError> {
    let date = NaiveDate::parse_from_str(value, DATE_FORMAT).map_err(|source| {
        RecordError::InvalidDate {
            value: value.to_string(),
            source,
        }
    })?;
    let start = date.and_time(chrono::NaiveTime::MIN);
    let end = start + TimeDelta::seconds(SECONDS_PER_DAY - 1);
    Ok((start, end))
}
