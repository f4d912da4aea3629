//! Wire timestamp codec
//!
//! The remote side exchanges `YYYY-MM-DD'T'HH:mm:ss'Z'` strings. The digits
//! are wall-clock time in the viewer's calendar: any trailing offset or
//! fraction is dropped and the remainder is taken literally, without UTC
//! conversion. Outbound timestamps always carry a literal `Z`.

use chrono::NaiveDateTime;

use crate::{Result, SlotwiseError};

/// Outbound format
pub const WIRE_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

/// Format of the significant prefix of an inbound timestamp
const WIRE_PREFIX_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";
const WIRE_PREFIX_LEN: usize = 19;

/// Parse a wire timestamp into a naive wall-clock instant.
pub fn parse_wire_timestamp(s: &str) -> Result<NaiveDateTime> {
    let s = s.trim();
    if s.len() < WIRE_PREFIX_LEN || !s.is_char_boundary(WIRE_PREFIX_LEN) {
        return Err(SlotwiseError::parsing(format!("timestamp too short: '{}'", s)));
    }

    let (head, tail) = s.split_at(WIRE_PREFIX_LEN);
    if !tail.is_empty() && !tail.starts_with(['Z', 'z', '+', '-', '.']) {
        return Err(SlotwiseError::parsing(format!(
            "unexpected trailing data in timestamp '{}'",
            s
        )));
    }

    NaiveDateTime::parse_from_str(head, WIRE_PREFIX_FORMAT)
        .map_err(|e| SlotwiseError::parsing(format!("invalid timestamp '{}': {}", s, e)))
}

/// Format a wall-clock instant for the wire.
pub fn format_wire_timestamp(dt: &NaiveDateTime) -> String {
    dt.format(WIRE_FORMAT).to_string()
}
