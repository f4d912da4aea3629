//! Check a slotwise config file and print the effective settings.
//!
//! Exit status: 0 valid, 1 invalid or unreadable, 2 bad usage.

use slotwise_config::{ConfigError, DurationMode, Settings, load_config};
use slotwise_util::default_config_path;
use std::path::PathBuf;
use std::process::ExitCode;

fn print_settings(settings: &Settings) {
    let mode = match settings.session.duration_mode {
        DurationMode::Shared => "shared",
        DurationMode::PerSlot => "per_slot",
    };

    println!("[grid]    {}px/day, {}px/hour", settings.grid.day_width, settings.grid.hour_height);
    println!(
        "[search]  horizon {} days, window -{}/+{} days",
        settings.search.horizon_days,
        settings.search.window_before_days,
        settings.search.window_after_days
    );
    println!(
        "[drag]    hot edge {}px, page cooldown {}ms, max scroll {}px/tick",
        settings.drag.hot_edge,
        settings.drag.page_cooldown.as_millis(),
        settings.drag.max_scroll_per_tick
    );
    println!(
        "[session] {} per meeting, durations {}",
        settings.session.default_duration, mode
    );
}

fn explain(err: &ConfigError) {
    if let ConfigError::Invalid(problems) = err {
        for problem in problems {
            eprintln!("  - {}", problem);
        }
    }
}

fn main() -> ExitCode {
    let mut args = std::env::args().skip(1);
    let path = match (args.next(), args.next()) {
        (Some(path), None) if path != "-h" && path != "--help" => PathBuf::from(path),
        (None, None) => default_config_path(),
        _ => {
            eprintln!("usage: validate-config [config-file]");
            eprintln!("  default: {}", default_config_path().display());
            return ExitCode::from(2);
        }
    };

    match load_config(&path) {
        Ok(settings) => {
            println!("{}: ok (config_version {})", path.display(), slotwise_config::CURRENT_CONFIG_VERSION);
            print_settings(&settings);
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("{}: {}", path.display(), err);
            explain(&err);
            ExitCode::from(1)
        }
    }
}
