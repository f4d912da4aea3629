//! TOML settings for slotwise
//!
//! A config file is parsed into the raw schema, checked as a whole so that
//! every problem is reported at once, and only then turned into `Settings`.
//! Missing keys fall back to defaults.

mod schema;
mod settings;
mod validation;

pub use schema::*;
pub use settings::*;
pub use validation::*;

use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

/// Schema version this build understands
pub const CURRENT_CONFIG_VERSION: u32 = 1;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed TOML: {0}")]
    Syntax(#[from] toml::de::Error),

    #[error("{} invalid setting(s)", .0.len())]
    Invalid(Vec<ValidationError>),

    #[error("config_version {found} is not supported (expected {expected})")]
    Version { found: u32, expected: u32 },
}

pub type ConfigResult<T> = Result<T, ConfigError>;

/// Read, validate and convert a config file.
pub fn load_config(path: impl AsRef<Path>) -> ConfigResult<Settings> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let settings = parse_config(&text)?;
    info!(path = %path.display(), "Configuration loaded");
    Ok(settings)
}

/// Validate and convert config text.
pub fn parse_config(text: &str) -> ConfigResult<Settings> {
    let raw: RawConfig = toml::from_str(text)?;

    match raw.config_version {
        CURRENT_CONFIG_VERSION => {}
        found => {
            return Err(ConfigError::Version {
                found,
                expected: CURRENT_CONFIG_VERSION,
            });
        }
    }

    let problems = validate_config(&raw);
    if problems.is_empty() {
        Ok(Settings::from_raw(raw))
    } else {
        debug!(count = problems.len(), "Config rejected");
        Err(ConfigError::Invalid(problems))
    }
}

/// Load `path` if given; otherwise the default location if it exists, or
/// built-in defaults.
pub fn load_or_default(path: Option<&Path>) -> ConfigResult<Settings> {
    if let Some(path) = path {
        return load_config(path);
    }

    let fallback = slotwise_util::default_config_path();
    if fallback.exists() {
        load_config(&fallback)
    } else {
        debug!(path = %fallback.display(), "No config file, using defaults");
        Ok(Settings::default())
    }
}
