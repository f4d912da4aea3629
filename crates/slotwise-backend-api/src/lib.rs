//! Scheduling backend trait interfaces for slotwise
//!
//! The core never talks to the network itself. This crate defines:
//! - The `SchedulingBackend` trait a remote service client implements
//! - The `BackendError` taxonomy surfaced to callers
//! - A mock backend for tests

mod mock;
mod traits;

pub use mock::*;
pub use traits::*;
