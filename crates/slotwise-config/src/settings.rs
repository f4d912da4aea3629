//! Validated settings structures

use crate::schema::RawConfig;
use crate::validation::parse_duration_mode;
use slotwise_util::{DayPoint, Hours};
use std::time::Duration;

/// Validated settings ready for use by the scheduling core
#[derive(Debug, Clone, Default)]
pub struct Settings {
    pub grid: GridGeometry,
    pub search: SearchPolicy,
    pub drag: DragPolicy,
    pub session: SessionPolicy,
}

impl Settings {
    /// Convert from raw config (after validation)
    pub fn from_raw(raw: RawConfig) -> Self {
        let grid_defaults = GridGeometry::default();
        let search_defaults = SearchPolicy::default();
        let drag_defaults = DragPolicy::default();
        let session_defaults = SessionPolicy::default();

        Self {
            grid: GridGeometry {
                day_width: raw.grid.day_width_px.unwrap_or(grid_defaults.day_width),
                hour_height: raw.grid.hour_height_px.unwrap_or(grid_defaults.hour_height),
            },
            search: SearchPolicy {
                horizon_days: raw.search.horizon_days.unwrap_or(search_defaults.horizon_days),
                window_before_days: raw
                    .search
                    .window_before_days
                    .unwrap_or(search_defaults.window_before_days),
                window_after_days: raw
                    .search
                    .window_after_days
                    .unwrap_or(search_defaults.window_after_days),
            },
            drag: DragPolicy {
                hot_edge: raw.drag.hot_edge_px.unwrap_or(drag_defaults.hot_edge),
                page_cooldown: raw
                    .drag
                    .page_cooldown_ms
                    .map(Duration::from_millis)
                    .unwrap_or(drag_defaults.page_cooldown),
                max_scroll_per_tick: raw
                    .drag
                    .max_scroll_px_per_tick
                    .unwrap_or(drag_defaults.max_scroll_per_tick),
                scroll_curve: raw.drag.scroll_curve.unwrap_or(drag_defaults.scroll_curve),
            },
            session: SessionPolicy {
                default_duration: raw
                    .session
                    .default_duration_minutes
                    .map(|m| Hours::from_minutes(m as i32))
                    .unwrap_or(session_defaults.default_duration),
                duration_mode: raw
                    .session
                    .duration_mode
                    .as_deref()
                    .and_then(parse_duration_mode)
                    .unwrap_or(session_defaults.duration_mode),
            },
        }
    }
}

/// Pixel geometry of the day grid
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridGeometry {
    pub day_width: f64,
    pub hour_height: f64,
}

impl Default for GridGeometry {
    fn default() -> Self {
        Self {
            day_width: 120.0,
            hour_height: 48.0,
        }
    }
}

impl GridGeometry {
    /// Squared pixel distance between two grid positions
    pub fn distance_sq(&self, a: DayPoint, b: DayPoint) -> f64 {
        let dx = (a.day_offset - b.day_offset) as f64 * self.day_width;
        let dy = (a.start - b.start).as_hours() * self.hour_height;
        dx * dx + dy * dy
    }

    /// Whole-day displacement for a horizontal pixel delta
    pub fn days_for(&self, dx: f64) -> i32 {
        (dx / self.day_width).round() as i32
    }

    /// Quarter-snapped time displacement for a vertical pixel delta
    pub fn hours_for(&self, dy: f64) -> Hours {
        Hours::from_hours(dy / self.hour_height).round_to_quarter()
    }
}

/// Slot search extent
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchPolicy {
    pub horizon_days: u32,
    pub window_before_days: u32,
    pub window_after_days: u32,
}

impl Default for SearchPolicy {
    fn default() -> Self {
        Self {
            horizon_days: 90,
            window_before_days: 1,
            window_after_days: 2,
        }
    }
}

/// Drag auto-scroll tuning
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragPolicy {
    pub hot_edge: f64,
    pub page_cooldown: Duration,
    pub max_scroll_per_tick: f64,
    pub scroll_curve: f64,
}

impl Default for DragPolicy {
    fn default() -> Self {
        Self {
            hot_edge: 40.0,
            page_cooldown: Duration::from_millis(600),
            max_scroll_per_tick: 24.0,
            scroll_curve: 8.0,
        }
    }
}

/// How slot durations relate to the session duration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DurationMode {
    /// Every slot has the session duration; resizing is disabled
    #[default]
    Shared,
    /// Slots may be resized individually (single-meeting flow)
    PerSlot,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionPolicy {
    pub default_duration: Hours,
    pub duration_mode: DurationMode,
}

impl Default for SessionPolicy {
    fn default() -> Self {
        Self {
            default_duration: Hours::from_minutes(30),
            duration_mode: DurationMode::Shared,
        }
    }
}
