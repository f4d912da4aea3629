//! slotwise - propose meeting slots around busy calendars
//!
//! Wires together:
//! - Configuration loading
//! - A JSON fixture standing in for the scheduling service
//! - The scheduling core (layout, slot search, coordinator)

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use slotwise::{Fixture, FixtureBackend, SchedulingSession, SharedState};
use slotwise_api::InitiateRequest;
use slotwise_config::{Settings, load_or_default};
use slotwise_core::blocks_for_day;
use slotwise_util::{Hours, day_index};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

/// slotwise - meeting slot scheduling
#[derive(Parser, Debug)]
#[command(name = "slotwise")]
#[command(about = "Propose meeting slots around busy calendars", long_about = None)]
struct Args {
    /// Configuration file path (default: ~/.config/slotwise/config.toml)
    #[arg(short, long, env = "SLOTWISE_CONFIG")]
    config: Option<PathBuf>,

    /// Log level
    #[arg(short, long, default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Show one day's busy blocks with their stacking depth
    Layout {
        /// Fixture file
        fixture: PathBuf,

        /// Day offset from the fixture's reference date
        #[arg(short, long, default_value_t = 0, allow_negative_numbers = true)]
        day: i32,
    },

    /// List free starts near a day and time
    Suggest {
        fixture: PathBuf,

        #[arg(short, long, default_value_t = 0, allow_negative_numbers = true)]
        day: i32,

        /// Target time as HH:MM
        #[arg(short, long, default_value = "09:00")]
        at: String,
    },

    /// Build a proposal of several slots and submit it
    Propose {
        fixture: PathBuf,

        #[arg(short, long, default_value_t = 0, allow_negative_numbers = true)]
        day: i32,

        #[arg(short, long, default_value = "09:00")]
        at: String,

        /// Number of slots to add on top of the server's suggestions
        #[arg(short = 'n', long, default_value_t = 3)]
        count: usize,

        /// Meeting duration override in minutes
        #[arg(long)]
        minutes: Option<u32>,
    },
}

fn run_layout(fixture: &Fixture, day: i32) -> Result<()> {
    let today = day_index(fixture.reference);
    let raw = fixture
        .dated_blocks()
        .context("Fixture contains an unreadable block")?;

    let date = slotwise_util::date_for_offset(fixture.reference, day);
    println!("{} (day {:+})", date, day);
    for block in blocks_for_day(&raw, today + day as i64) {
        let end = block.start + block.duration;
        println!(
            "  {}{} - {}  {}",
            "  ".repeat(block.stack_depth as usize),
            block.start,
            end,
            block.title
        );
    }
    Ok(())
}

async fn run_suggest(settings: Settings, fixture: Fixture, day: i32, at: &str) -> Result<()> {
    let target = Hours::parse_clock(at).context("Invalid --at time")?;
    let now = fixture.now();
    let reference = fixture.reference;
    let backend = Arc::new(FixtureBackend::new(fixture));

    let mut session = SchedulingSession::new(backend, settings, reference, SharedState::new());
    session.start(InitiateRequest::default(), now).await?;
    session.load_search_range(day).await?;

    let coord = session.coordinator();
    let candidates = coord.candidates_near(day, target);
    if candidates.is_empty() {
        println!("No free slot within {} days", coord.settings().search.horizon_days);
        return Ok(());
    }
    for c in candidates {
        println!(
            "{}  {} - {}",
            slotwise_util::date_for_offset(reference, c.day_offset),
            c.start,
            c.start + coord.duration()
        );
    }
    Ok(())
}

async fn run_propose(
    settings: Settings,
    fixture: Fixture,
    day: i32,
    at: &str,
    count: usize,
    minutes: Option<u32>,
) -> Result<()> {
    let target = Hours::parse_clock(at).context("Invalid --at time")?;
    let now = fixture.now();
    let reference = fixture.reference;
    let backend = Arc::new(FixtureBackend::new(fixture));
    let state = SharedState::new();

    let mut session = SchedulingSession::new(backend, settings, reference, state.clone());
    let seeded = session
        .start(
            InitiateRequest {
                duration_minutes: minutes,
                ..Default::default()
            },
            now,
        )
        .await?;

    session.load_search_range(day).await?;

    let mut added = 0;
    for _ in 0..count {
        if !session.add_near(day, target) {
            break;
        }
        added += 1;
    }
    if seeded + added == 0 {
        bail!("No free slot found near day {} at {}", day, at);
    }
    info!(seeded, added, "Working set ready");

    let (proposal, message) = session.submit().await?;
    println!("{}", serde_json::to_string_pretty(&proposal)?);
    println!();
    println!("{}", message);

    let view = state.get();
    debug!(slot_count = view.slots.len(), locked = view.locked, "Final state");
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    let settings =
        load_or_default(args.config.as_deref()).context("Failed to load configuration")?;

    match args.command {
        Command::Layout { fixture, day } => {
            let fixture = Fixture::load(&fixture)?;
            run_layout(&fixture, day)
        }
        Command::Suggest { fixture, day, at } => {
            let fixture = Fixture::load(&fixture)?;
            run_suggest(settings, fixture, day, &at).await
        }
        Command::Propose {
            fixture,
            day,
            at,
            count,
            minutes,
        } => {
            let fixture = Fixture::load(&fixture)?;
            run_propose(settings, fixture, day, &at, count, minutes).await
        }
    }
}
