//! Fixed-point hour quantities
//!
//! Every start time and duration on the day grid is an `Hours` value. It is
//! stored as whole minutes so that quarter-hour arithmetic and the equality
//! checks used by overlap detection are exact.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Sub, SubAssign};

use crate::{Result, SlotwiseError};

const MINUTES_PER_HOUR: i32 = 60;
const MINUTES_PER_QUARTER: i32 = 15;

/// A time-of-day position or a duration, in whole minutes.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Hours(i32);

impl Hours {
    pub const ZERO: Hours = Hours(0);

    /// One grid step
    pub const QUARTER: Hours = Hours(MINUTES_PER_QUARTER);

    pub const HOUR: Hours = Hours(MINUTES_PER_HOUR);

    /// Length of one day column
    pub const DAY: Hours = Hours(24 * MINUTES_PER_HOUR);

    pub const fn from_minutes(minutes: i32) -> Self {
        Self(minutes)
    }

    pub const fn from_quarters(quarters: i32) -> Self {
        Self(quarters * MINUTES_PER_QUARTER)
    }

    /// Convert a decimal hour count, rounding to the nearest minute.
    pub fn from_hours(hours: f64) -> Self {
        Self((hours * MINUTES_PER_HOUR as f64).round() as i32)
    }

    /// Parse `HH:MM` (e.g. `"09:30"`, `"24:00"`).
    pub fn parse_clock(s: &str) -> Result<Self> {
        let (h, m) = s
            .split_once(':')
            .ok_or_else(|| SlotwiseError::parsing(format!("expected HH:MM, got '{}'", s)))?;
        let h: i32 = h
            .trim()
            .parse()
            .map_err(|_| SlotwiseError::parsing(format!("invalid hour in '{}'", s)))?;
        let m: i32 = m
            .trim()
            .parse()
            .map_err(|_| SlotwiseError::parsing(format!("invalid minute in '{}'", s)))?;

        if !(0..60).contains(&m) || !(0..=24).contains(&h) || (h == 24 && m != 0) {
            return Err(SlotwiseError::parsing(format!("'{}' is not a time of day", s)));
        }

        Ok(Self(h * MINUTES_PER_HOUR + m))
    }

    pub const fn as_minutes(self) -> i32 {
        self.0
    }

    pub fn as_hours(self) -> f64 {
        self.0 as f64 / MINUTES_PER_HOUR as f64
    }

    /// Round to the nearest quarter hour (halves round up).
    pub fn round_to_quarter(self) -> Self {
        Self((self.0 + MINUTES_PER_QUARTER / 2).div_euclid(MINUTES_PER_QUARTER) * MINUTES_PER_QUARTER)
    }

    /// Round up to the next quarter hour (aligned values are unchanged).
    pub fn ceil_to_quarter(self) -> Self {
        Self(
            (self.0 + MINUTES_PER_QUARTER - 1).div_euclid(MINUTES_PER_QUARTER)
                * MINUTES_PER_QUARTER,
        )
    }

    pub fn is_quarter_aligned(self) -> bool {
        self.0.rem_euclid(MINUTES_PER_QUARTER) == 0
    }

    /// Clamp into `[lo, hi]`. Unlike `Ord::clamp` this never panics:
    /// when the range is empty, `hi` wins.
    pub fn clamp_to(self, lo: Hours, hi: Hours) -> Self {
        self.max(lo).min(hi)
    }

    pub fn to_chrono(self) -> chrono::Duration {
        chrono::Duration::minutes(self.0 as i64)
    }
}

impl Add for Hours {
    type Output = Hours;

    fn add(self, rhs: Hours) -> Hours {
        Hours(self.0 + rhs.0)
    }
}

impl AddAssign for Hours {
    fn add_assign(&mut self, rhs: Hours) {
        self.0 += rhs.0;
    }
}

impl Sub for Hours {
    type Output = Hours;

    fn sub(self, rhs: Hours) -> Hours {
        Hours(self.0 - rhs.0)
    }
}

impl SubAssign for Hours {
    fn sub_assign(&mut self, rhs: Hours) {
        self.0 -= rhs.0;
    }
}

impl fmt::Display for Hours {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.abs();
        write!(
            f,
            "{}{:02}:{:02}",
            sign,
            abs / MINUTES_PER_HOUR,
            abs % MINUTES_PER_HOUR
        )
    }
}
