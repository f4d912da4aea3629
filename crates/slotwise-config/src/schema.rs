//! Raw configuration schema (as parsed from TOML)

use serde::{Deserialize, Serialize};

/// Raw configuration as parsed from TOML
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RawConfig {
    /// Config schema version
    pub config_version: u32,

    /// Day grid geometry
    #[serde(default)]
    pub grid: RawGrid,

    /// Slot search settings
    #[serde(default)]
    pub search: RawSearch,

    /// Drag and auto-scroll tuning
    #[serde(default)]
    pub drag: RawDrag,

    /// Scheduling session defaults
    #[serde(default)]
    pub session: RawSession,
}

/// Pixel size of the day grid, used for nearest-slot distance
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct RawGrid {
    /// Width of one day column
    pub day_width_px: Option<f64>,

    /// Height of one hour row
    pub hour_height_px: Option<f64>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct RawSearch {
    /// Days scanned forward from the floor when the local window is full
    pub horizon_days: Option<u32>,

    /// Days before the target day included in the local window
    pub window_before_days: Option<u32>,

    /// Days after the target day included in the local window
    pub window_after_days: Option<u32>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct RawDrag {
    /// Width of the hot band along each viewport edge
    pub hot_edge_px: Option<f64>,

    /// Minimum delay between two horizontal day pages
    pub page_cooldown_ms: Option<u64>,

    /// Vertical auto-scroll speed at the very edge
    pub max_scroll_px_per_tick: Option<f64>,

    /// Steepness of the logarithmic acceleration curve
    pub scroll_curve: Option<f64>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct RawSession {
    /// Meeting duration used when the server does not provide one
    pub default_duration_minutes: Option<u32>,

    /// "shared" (one duration for every slot) or "per_slot"
    pub duration_mode: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_full_config() {
        let toml_str = r#"
            config_version = 1

            [grid]
            day_width_px = 140.0
            hour_height_px = 60.0

            [search]
            horizon_days = 30

            [drag]
            hot_edge_px = 32.0
            page_cooldown_ms = 450

            [session]
            default_duration_minutes = 45
            duration_mode = "per_slot"
        "#;

        let config: RawConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.grid.day_width_px, Some(140.0));
        assert_eq!(config.search.horizon_days, Some(30));
        assert_eq!(config.search.window_before_days, None);
        assert_eq!(config.drag.page_cooldown_ms, Some(450));
        assert_eq!(config.session.duration_mode.as_deref(), Some("per_slot"));
    }

    #[test]
    fn sections_are_optional() {
        let config: RawConfig = toml::from_str("config_version = 1").unwrap();
        assert!(config.grid.day_width_px.is_none());
        assert!(config.session.default_duration_minutes.is_none());
    }
}
