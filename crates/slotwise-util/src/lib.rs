//! Shared utilities for slotwise
//!
//! This crate provides:
//! - `Hours`, the fixed-point time-of-day / duration quantity used everywhere
//! - Day arithmetic (day offsets, absolute day indices, the scheduling floor)
//! - The wire timestamp codec
//! - ID types (BlockId, SessionId, IntentCode)
//! - Error types
//! - Default paths for the configuration file

mod error;
mod hours;
mod ids;
mod paths;
mod time;
mod wire;

pub use error::*;
pub use hours::*;
pub use ids::*;
pub use paths::*;
pub use time::*;
pub use wire::*;
