//! Wall-clock and day-grid utilities for slotwise
//!
//! Positions on the grid are expressed as a day offset relative to a
//! session reference date plus an `Hours` start. Busy blocks coming from a
//! fetch are keyed by absolute day index instead, so both conversions live
//! here.
//!
//! # Mock Time for Development
//!
//! In debug builds, the `SLOTWISE_MOCK_TIME` environment variable can be set
//! to override the system time. This is useful for exercising the floor
//! constraint near midnight.
//!
//! Format: `YYYY-MM-DD HH:MM:SS` (e.g., `2025-12-25 23:50:00`)

use chrono::{DateTime, Datelike, Local, NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::OnceLock;

use crate::Hours;

/// Environment variable name for mock time (debug builds only)
pub const MOCK_TIME_ENV_VAR: &str = "SLOTWISE_MOCK_TIME";

const SECONDS_PER_QUARTER: i64 = 15 * 60;

const MOCK_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Offset between the mocked and the real clock, read once per process.
static MOCK_OFFSET: OnceLock<Option<chrono::Duration>> = OnceLock::new();

#[cfg(debug_assertions)]
fn read_mock_offset() -> Option<chrono::Duration> {
    use chrono::TimeZone;

    let raw = std::env::var(MOCK_TIME_ENV_VAR).ok()?;
    let mocked = NaiveDateTime::parse_from_str(raw.trim(), MOCK_TIME_FORMAT)
        .ok()
        .and_then(|naive| Local.from_local_datetime(&naive).single());

    match mocked {
        Some(at) => {
            let offset = at - Local::now();
            tracing::info!(
                mock_time = %raw,
                offset_secs = offset.num_seconds(),
                "Clock is mocked"
            );
            Some(offset)
        }
        None => {
            tracing::warn!(
                mock_time = %raw,
                expected = MOCK_TIME_FORMAT,
                "Ignoring unreadable mock time"
            );
            None
        }
    }
}

#[cfg(not(debug_assertions))]
fn read_mock_offset() -> Option<chrono::Duration> {
    None
}

/// Current local time, shifted by the mock offset in debug builds.
pub fn now() -> DateTime<Local> {
    let real = Local::now();
    match *MOCK_OFFSET.get_or_init(read_mock_offset) {
        Some(offset) => real + offset,
        None => real,
    }
}

/// A position on the day grid: day offset from the reference date plus a
/// start time within that day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct DayPoint {
    pub day_offset: i32,
    pub start: Hours,
}

impl DayPoint {
    pub const fn new(day_offset: i32, start: Hours) -> Self {
        Self { day_offset, start }
    }

    /// True if this point lies strictly before `other`.
    pub fn is_before(&self, other: &DayPoint) -> bool {
        self < other
    }
}

impl fmt::Display for DayPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "day {:+} @ {}", self.day_offset, self.start)
    }
}

/// Absolute day index used to key fetched busy blocks.
pub fn day_index(date: NaiveDate) -> i64 {
    date.num_days_from_ce() as i64
}

/// Calendar date for a day offset relative to `reference`.
pub fn date_for_offset(reference: NaiveDate, day_offset: i32) -> NaiveDate {
    reference + chrono::Duration::days(day_offset as i64)
}

/// Wall-clock instant for a grid position.
pub fn datetime_at(reference: NaiveDate, point: DayPoint) -> NaiveDateTime {
    date_for_offset(reference, point.day_offset).and_time(NaiveTime::default()) + point.start.to_chrono()
}

/// Grid position of a wall-clock instant, truncated to the minute.
pub fn position_of(dt: NaiveDateTime, reference: NaiveDate) -> DayPoint {
    let day_offset = (dt.date() - reference).num_days() as i32;
    let minutes = dt.time().hour() as i32 * 60 + dt.time().minute() as i32;
    DayPoint::new(day_offset, Hours::from_minutes(minutes))
}

/// Earliest allowable slot start: `now` rounded up to the next quarter hour.
///
/// Rounding past midnight rolls over to the start of the next day.
pub fn floor_from(now: NaiveDateTime, reference: NaiveDate) -> DayPoint {
    let day_offset = (now.date() - reference).num_days() as i32;
    let secs = now.time().num_seconds_from_midnight() as i64;
    let ceil_secs = (secs + SECONDS_PER_QUARTER - 1) / SECONDS_PER_QUARTER * SECONDS_PER_QUARTER;
    let start = Hours::from_minutes((ceil_secs / 60) as i32);

    if start >= Hours::DAY {
        DayPoint::new(day_offset + 1, start - Hours::DAY)
    } else {
        DayPoint::new(day_offset, start)
    }
}

/// `YYYY-MM-DD HH:MM:SS`, the same shape the mock clock accepts
pub fn format_datetime_full(dt: &NaiveDateTime) -> String {
    dt.format(MOCK_TIME_FORMAT).to_string()
}
