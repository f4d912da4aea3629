//! Default paths for slotwise
//!
//! - Config: `$SLOTWISE_CONFIG`, else `$XDG_CONFIG_HOME/slotwise/config.toml`,
//!   else `~/.config/slotwise/config.toml`

use std::path::PathBuf;

/// Environment variable for overriding the config file path
pub const SLOTWISE_CONFIG_ENV: &str = "SLOTWISE_CONFIG";

const CONFIG_FILENAME: &str = "config.toml";

const APP_DIR: &str = "slotwise";

/// Get the default config file path.
///
/// Order of precedence:
/// 1. `$SLOTWISE_CONFIG` environment variable (if set)
/// 2. `$XDG_CONFIG_HOME/slotwise/config.toml` (if XDG_CONFIG_HOME is set)
/// 3. `~/.config/slotwise/config.toml` (fallback)
pub fn default_config_path() -> PathBuf {
    if let Ok(path) = std::env::var(SLOTWISE_CONFIG_ENV) {
        return PathBuf::from(path);
    }

    config_dir().join(CONFIG_FILENAME)
}

/// Get the configuration directory without checking the file override.
pub fn config_dir() -> PathBuf {
    if let Ok(config_home) = std::env::var("XDG_CONFIG_HOME") {
        return PathBuf::from(config_home).join(APP_DIR);
    }

    let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
    PathBuf::from(home).join(".config").join(APP_DIR)
}
