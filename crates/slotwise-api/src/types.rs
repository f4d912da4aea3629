//! Shared types for the slotwise data model

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use slotwise_util::{BlockId, DayPoint, Hours, Result, SlotwiseError};

use crate::WireTimeRange;

/// A candidate start position returned by the slot search
pub type PossibleSlot = DayPoint;

/// Anything occupying a `[start, start + duration)` range within one day.
pub trait Interval {
    fn start(&self) -> Hours;

    fn duration(&self) -> Hours;

    fn end(&self) -> Hours {
        self.start() + self.duration()
    }

    /// True if `[start, end)` intersects this interval.
    ///
    /// Covers a range starting inside this one, ending inside it, and fully
    /// containing it. Touching endpoints (back-to-back) do not overlap.
    fn overlaps_range(&self, start: Hours, end: Hours) -> bool {
        let starts_inside = start >= self.start() && start < self.end();
        let ends_inside = end > self.start() && end <= self.end();
        let contains = start <= self.start() && end >= self.end();
        (starts_inside || ends_inside || contains) && start < end && self.duration() > Hours::ZERO
    }
}

/// An interval that can be offset when drawn next to overlapping ones
pub trait Stackable: Interval {
    fn set_stack_depth(&mut self, depth: u32);
}

/// A calendar-derived or explicitly blocked interval on one day.
///
/// The day is given by the absolute day index the block is stored under.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BusyBlock {
    pub id: BlockId,
    pub title: String,
    pub start: Hours,
    pub duration: Hours,
    /// Explicit "block my time" entry rather than an ordinary event
    #[serde(default)]
    pub is_blocked_time: bool,
    /// Derived by the overlap layout pass
    #[serde(default)]
    pub stack_depth: u32,
    #[serde(default)]
    pub colour: Option<String>,
}

impl BusyBlock {
    pub fn new(id: impl Into<BlockId>, title: impl Into<String>, start: Hours, duration: Hours) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            start,
            duration,
            is_blocked_time: false,
            stack_depth: 0,
            colour: None,
        }
    }

    pub fn blocked(mut self) -> Self {
        self.is_blocked_time = true;
        self
    }
}

impl Interval for BusyBlock {
    fn start(&self) -> Hours {
        self.start
    }

    fn duration(&self) -> Hours {
        self.duration
    }
}

impl Stackable for BusyBlock {
    fn set_stack_depth(&mut self, depth: u32) {
        self.stack_depth = depth;
    }
}

/// A candidate meeting time under construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProposedSlot {
    pub day_offset: i32,
    pub start: Hours,
    pub duration: Hours,
}

impl ProposedSlot {
    pub const fn new(day_offset: i32, start: Hours, duration: Hours) -> Self {
        Self {
            day_offset,
            start,
            duration,
        }
    }

    pub fn at(point: DayPoint, duration: Hours) -> Self {
        Self::new(point.day_offset, point.start, duration)
    }

    pub fn position(&self) -> DayPoint {
        DayPoint::new(self.day_offset, self.start)
    }

    pub fn with_position(self, point: DayPoint) -> Self {
        Self::at(point, self.duration)
    }

    pub fn with_duration(self, duration: Hours) -> Self {
        Self { duration, ..self }
    }

    /// Absolute wall-clock bounds relative to `reference`.
    pub fn bounds(&self, reference: NaiveDate) -> (NaiveDateTime, NaiveDateTime) {
        let start = slotwise_util::datetime_at(reference, self.position());
        (start, start + self.duration.to_chrono())
    }

    /// Encode for the wire.
    pub fn to_wire(&self, reference: NaiveDate) -> WireTimeRange {
        let (start, end) = self.bounds(reference);
        WireTimeRange::from_bounds(&start, &end)
    }

    /// Decode a server-provided range, snapping start and duration to the
    /// quarter-hour grid.
    pub fn from_wire(range: &WireTimeRange, reference: NaiveDate) -> Result<Self> {
        let (start, end) = range.parse()?;
        if end <= start {
            return Err(SlotwiseError::invalid_duration(format!(
                "range ends before it starts: {} .. {}",
                range.start_date_time, range.end_date_time
            )));
        }

        let point = slotwise_util::position_of(start, reference);
        let minutes = (end - start).num_minutes() as i32;
        let duration = Hours::from_minutes(minutes).round_to_quarter().max(Hours::QUARTER);

        // a start rounded up to midnight belongs to the next day
        let start = point.start.round_to_quarter();
        if start >= Hours::DAY {
            return Ok(Self::new(point.day_offset + 1, Hours::ZERO, duration));
        }
        Ok(Self::new(point.day_offset, start, duration))
    }
}

impl Interval for ProposedSlot {
    fn start(&self) -> Hours {
        self.start
    }

    fn duration(&self) -> Hours {
        self.duration
    }
}
