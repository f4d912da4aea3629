//! slotwise front end
//!
//! Wires the scheduling core to a backend:
//! - A JSON fixture backend standing in for the remote service
//! - The scheduling session flow (fetch, initiate, seed, add, submit, lock)
//! - Reactive slot state published over a watch channel

mod fixture;
mod session;
mod state;

pub use fixture::*;
pub use session::*;
pub use state::*;
