//! `find-slot` CLI — find the earliest meeting slot across a directory of schedules.
//!
//! ## Usage
//!
//! ```sh
//! # First 30 minute slot with at least 2 people free, starting now
//! find-slot --calendars ./calendars --duration-in-minutes 30 --minimum-people 2
//!
//! # Search from a fixed instant and print a JSON report
//! find-slot -c ./calendars -d 30 -m 2 --now "2026-07-01 09:00:00" --json
//!
//! # Show how the timeline is built
//! RUST_LOG=slot_engine=debug find-slot -c ./calendars -d 30 -m 2
//! ```

use anyhow::{Context, Result};
use chrono::{Local, NaiveDateTime, SubsecRound};
use clap::Parser;
use std::process;
use serde::Serialize;
use slot_engine::{schedule, BusyInterval, Calendar, SlotError, SlotRequest};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "find-slot",
    version,
    about = "Find the earliest slot when enough people are free"
)]
struct Cli {
    /// Directory holding one `.txt` schedule per person
    #[arg(short, long)]
    calendars: String,

    /// Length of the meeting in minutes
    #[arg(short, long = "duration-in-minutes", value_parser = clap::value_parser!(u32).range(1..))]
    duration: u32,

    /// How many people must be free at the same time
    #[arg(short, long = "minimum-people", value_parser = clap::value_parser!(u64).range(1..))]
    minimum_people: u64,

    /// Search start as "YYYY-MM-DD HH:MM:SS" (defaults to the current local time)
    #[arg(long, value_parser = parse_now)]
    now: Option<NaiveDateTime>,

    /// Print a JSON report instead of the bare timestamp
    #[arg(long)]
    json: bool,
}

/// Exit status when the calendar has fewer people than requested.
const EXIT_TOO_FEW_PEOPLE: i32 = 2;

#[derive(Serialize)]
struct SlotReport<'a> {
    start: Option<String>,
    #[serde(flatten)]
    request: SlotRequest,
    total_people: usize,
    /// Timeline entries that leave too few people free.
    blocking: Vec<&'a BusyInterval>,
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let calendar = Calendar::load_dir(&cli.calendars)
        .with_context(|| format!("Failed to load calendars from {}", cli.calendars))?;

    let min_people = usize::try_from(cli.minimum_people).context("Minimum people is too large")?;
    let request = SlotRequest::new(cli.duration, min_people);
    let now = cli
        .now
        .unwrap_or_else(|| Local::now().naive_local().trunc_subsecs(0));

    let total_people = calendar.total_people();
    tracing::debug!(
        people = total_people,
        %now,
        duration = request.duration_minutes,
        min_people = request.min_people,
        "searching for a free slot"
    );

    match request.validate(total_people) {
        Err(err @ SlotError::InsufficientPeople { .. }) => {
            eprintln!("Error: {err}");
            process::exit(EXIT_TOO_FEW_PEOPLE);
        }
        other => other?,
    }

    let timeline = calendar.timeline();
    let slot = slot_engine::find_slot(
        &timeline,
        total_people,
        request.min_people,
        request.duration_minutes,
        now,
    );
    tracing::info!(slot = ?slot, "search finished");
    let start = slot.map(|start| start.format(schedule::TIMESTAMP_FORMAT).to_string());

    if cli.json {
        let report = SlotReport {
            start,
            request,
            total_people,
            blocking: timeline.blocking(total_people, request.min_people).collect(),
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        match start {
            Some(start) => println!("{}", start),
            None => println!("No free slot found"),
        }
    }

    Ok(())
}

/// Log to stderr so stdout stays machine-readable. Filtered by `RUST_LOG`.
fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn parse_now(value: &str) -> std::result::Result<NaiveDateTime, String> {
    schedule::parse_timestamp(value.trim())
        .map_err(|err| format!("{err}, expected {}", schedule::TIMESTAMP_FORMAT))
}
