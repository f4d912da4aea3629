//! Wire DTOs exchanged with the remote scheduling service

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use slotwise_util::{IntentCode, Result, format_wire_timestamp, parse_wire_timestamp};
use std::collections::BTreeMap;

use crate::BusyBlock;

/// One absolute time range in wire format
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WireTimeRange {
    pub start_date_time: String,
    pub end_date_time: String,
}

impl WireTimeRange {
    pub fn new(start: impl Into<String>, end: impl Into<String>) -> Self {
        Self {
            start_date_time: start.into(),
            end_date_time: end.into(),
        }
    }

    pub fn from_bounds(start: &NaiveDateTime, end: &NaiveDateTime) -> Self {
        Self::new(format_wire_timestamp(start), format_wire_timestamp(end))
    }

    /// Decode both endpoints.
    pub fn parse(&self) -> Result<(NaiveDateTime, NaiveDateTime)> {
        Ok((
            parse_wire_timestamp(&self.start_date_time)?,
            parse_wire_timestamp(&self.end_date_time)?,
        ))
    }
}

/// Finalized proposal ready for submission
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Proposal {
    pub intent_code: Option<IntentCode>,
    /// Proposed times in insertion order
    pub times: Vec<WireTimeRange>,
}

/// Inclusive range of absolute day indices
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayRange {
    pub first: i64,
    pub last: i64,
}

impl DayRange {
    pub fn new(first: i64, last: i64) -> Self {
        Self { first, last }
    }

    pub fn contains(&self, day: i64) -> bool {
        (self.first..=self.last).contains(&day)
    }

    pub fn days(&self) -> impl Iterator<Item = i64> {
        self.first..=self.last
    }

    pub fn len(&self) -> usize {
        if self.last < self.first {
            0
        } else {
            (self.last - self.first + 1) as usize
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Busy blocks keyed by absolute day index
pub type BlocksByDay = BTreeMap<i64, Vec<BusyBlock>>;

/// Request to start a meeting search
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InitiateRequest {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub duration_minutes: Option<u32>,
    #[serde(default)]
    pub participants: Vec<String>,
}

/// Result of starting a meeting search
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MeetingInitiation {
    pub duration_minutes: u32,
    pub default_title: String,
    pub intent_code: IntentCode,
    /// Server-suggested slots used to seed the working set
    #[serde(default)]
    pub suggested_slots: Vec<WireTimeRange>,
}

/// Recipient-side choice of one proposed time
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfirmationRequest {
    pub intent_code: IntentCode,
    pub time: WireTimeRange,
    #[serde(default)]
    pub recipient_email: Option<String>,
}

/// What the recipient sees after confirming
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfirmationReceipt {
    pub initiator_name: String,
    pub meeting_title: String,
}
