//! Load a directory of per-person schedules.
//!
//! Every `.txt` file in the directory is one person; the file stem is the
//! person id. Files are read in name order so the timeline build is
//! deterministic.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{Result, SlotError};
use crate::interval::BusyInterval;
use crate::merge::Timeline;
use crate::schedule;

/// File extension of a schedule file.
pub const SCHEDULE_EXTENSION: &str = "txt";

/// The busy records of a single person.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersonSchedule {
    pub person_id: String,
    pub busy: Vec<BusyInterval>,
}

/// Every person taking part in a slot search.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Calendar {
    pub people: Vec<PersonSchedule>,
}

impl Calendar {
    pub fn from_people(people: Vec<PersonSchedule>) -> Self {
        Self { people }
    }

    /// Read every schedule file in `dir`.
    ///
    /// A person with an empty file still counts towards [`Calendar::total_people`].
    pub fn load_dir(dir: impl AsRef<Path>) -> Result<Self> {
        let dir = dir.as_ref();
        let mut paths = schedule_files(dir)?;
        paths.sort();

        let mut people = Vec::with_capacity(paths.len());
        for path in paths {
            let text = fs::read_to_string(&path).map_err(|source| SlotError::Io {
                path: path.clone(),
                source,
            })?;
            let source_name = path.display().to_string();
            let busy = schedule::parse_schedule(&source_name, &text)?;
            let person_id = path
                .file_stem()
                .map(|stem| stem.to_string_lossy().into_owned())
                .unwrap_or_default();

            debug!(person = %person_id, records = busy.len(), "loaded schedule");
            people.push(PersonSchedule { person_id, busy });
        }

        Ok(Self { people })
    }

    pub fn total_people(&self) -> usize {
        self.people.len()
    }

    /// Every busy record paired with the person it belongs to.
    pub fn busy_intervals(&self) -> impl Iterator<Item = (&str, &BusyInterval)> + '_ {
        self.people.iter().flat_map(|person| {
            person
                .busy
                .iter()
                .map(move |interval| (person.person_id.as_str(), interval))
        })
    }

    /// Fold every busy record into a fresh occupancy timeline.
    pub fn timeline(&self) -> Timeline {
        self.busy_intervals()
            .map(|(_, interval)| *interval)
            .collect()
    }
}

fn schedule_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let io_error = |source: std::io::Error| SlotError::Io {
        path: dir.to_path_buf(),
        source,
    };

    let mut paths = Vec::new();
    for entry in fs::read_dir(dir).map_err(io_error)? {
        let path = entry.map_err(io_error)?.path();
        let is_schedule = path
            .extension()
            .is_some_and(|ext| ext == SCHEDULE_EXTENSION);
        if is_schedule && path.is_file() {
            paths.push(path);
        }
    }
    Ok(paths)
}
