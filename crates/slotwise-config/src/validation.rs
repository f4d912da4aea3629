//! Configuration validation

use crate::schema::RawConfig;
use thiserror::Error;

/// Largest accepted search horizon
pub const MAX_HORIZON_DAYS: u32 = 366;

/// Largest accepted local-window extent on either side of the target day
pub const MAX_WINDOW_DAYS: u32 = 14;

/// Validation error
#[derive(Debug, Clone, Error)]
pub enum ValidationError {
    #[error("{field}: {message}")]
    InvalidValue { field: &'static str, message: String },

    #[error("Unknown duration mode '{0}' (expected \"shared\" or \"per_slot\")")]
    UnknownDurationMode(String),
}

/// Validate a raw configuration, collecting every problem found
pub fn validate_config(config: &RawConfig) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    check_positive(&mut errors, "grid.day_width_px", config.grid.day_width_px);
    check_positive(&mut errors, "grid.hour_height_px", config.grid.hour_height_px);

    if let Some(horizon) = config.search.horizon_days
        && !(1..=MAX_HORIZON_DAYS).contains(&horizon)
    {
        errors.push(ValidationError::InvalidValue {
            field: "search.horizon_days",
            message: format!("must be between 1 and {}, got {}", MAX_HORIZON_DAYS, horizon),
        });
    }

    for (field, value) in [
        ("search.window_before_days", config.search.window_before_days),
        ("search.window_after_days", config.search.window_after_days),
    ] {
        if let Some(days) = value
            && days > MAX_WINDOW_DAYS
        {
            errors.push(ValidationError::InvalidValue {
                field,
                message: format!("must be at most {}, got {}", MAX_WINDOW_DAYS, days),
            });
        }
    }

    if let Some(edge) = config.drag.hot_edge_px
        && (!edge.is_finite() || edge < 0.0)
    {
        errors.push(ValidationError::InvalidValue {
            field: "drag.hot_edge_px",
            message: format!("must be zero or positive, got {}", edge),
        });
    }
    check_positive(
        &mut errors,
        "drag.max_scroll_px_per_tick",
        config.drag.max_scroll_px_per_tick,
    );
    check_positive(&mut errors, "drag.scroll_curve", config.drag.scroll_curve);

    if let Some(minutes) = config.session.default_duration_minutes {
        if minutes == 0 || minutes > 24 * 60 {
            errors.push(ValidationError::InvalidValue {
                field: "session.default_duration_minutes",
                message: format!("must be between 15 and 1440, got {}", minutes),
            });
        } else if minutes % 15 != 0 {
            errors.push(ValidationError::InvalidValue {
                field: "session.default_duration_minutes",
                message: format!("must be a multiple of 15, got {}", minutes),
            });
        }
    }

    if let Some(mode) = &config.session.duration_mode
        && parse_duration_mode(mode).is_none()
    {
        errors.push(ValidationError::UnknownDurationMode(mode.clone()));
    }

    errors
}

fn check_positive(errors: &mut Vec<ValidationError>, field: &'static str, value: Option<f64>) {
    if let Some(v) = value
        && (!v.is_finite() || v <= 0.0)
    {
        errors.push(ValidationError::InvalidValue {
            field,
            message: format!("must be a positive number, got {}", v),
        });
    }
}

/// Parse a duration mode name
pub fn parse_duration_mode(s: &str) -> Option<crate::DurationMode> {
    match s.trim().to_lowercase().as_str() {
        "shared" => Some(crate::DurationMode::Shared),
        "per_slot" | "per-slot" => Some(crate::DurationMode::PerSlot),
        _ => None,
    }
}
