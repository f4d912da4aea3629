//! Scheduling engine for slotwise
//!
//! This crate is the heart of slotwise, containing:
//! - Overlap layout (stacking depth for a day's busy blocks)
//! - Slot search (bidirectional probe with a forward fallback scan)
//! - The working-set coordinator (add, remove, move, resize, finalize)
//! - The drag gesture state machine (Idle -> Dragging -> Committed/Cancelled)
//! - Auto-scroll decisions while dragging

mod autoscroll;
mod coordinator;
mod drag;
mod events;
mod finder;
mod layout;

pub use autoscroll::*;
pub use coordinator::*;
pub use drag::*;
pub use events::*;
pub use finder::*;
pub use layout::*;
