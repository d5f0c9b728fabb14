//! Error types for slot-engine operations.

use std::path::PathBuf;

use thiserror::Error;

use crate::schedule::RecordError;

#[derive(Error, Debug)]
pub enum SlotError {
    /// A schedule line could not be turned into a busy interval.
    /// `line` is 1-based.
    #[error("Malformed record in {source_name} at line {line}: {source}")]
    MalformedRecord {
        source_name: String,
        line: usize,
        #[source]
        source: RecordError,
    },

    #[error("Failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Too few people in the company. Required: {required}, All: {available}")]
    InsufficientPeople { required: usize, available: usize },

    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

pub type Result<T> = std::result::Result<T, SlotError>;
