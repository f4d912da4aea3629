//! Data model for slotwise
//!
//! This crate defines the types shared between the scheduling core, the
//! backend interface and presentation clients:
//! - Intervals, busy blocks and proposed slots
//! - Wire DTOs exchanged with the remote scheduling service
//! - Events (core -> presentation)
//! - Versioning

mod events;
mod types;
mod wire;

pub use events::*;
pub use types::*;
pub use wire::*;

/// Current API version
pub const API_VERSION: u32 = 1;
