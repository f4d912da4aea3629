//! Event types for core -> presentation streaming

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use slotwise_util::{IntentCode, SessionId};

use crate::{API_VERSION, ProposedSlot};

/// Event envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Event {
    pub api_version: u32,
    pub timestamp: DateTime<Local>,
    pub payload: EventPayload,
}

impl Event {
    pub fn new(payload: EventPayload) -> Self {
        Self {
            api_version: API_VERSION,
            timestamp: slotwise_util::now(),
            payload,
        }
    }
}

/// All events a presentation client can observe
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EventPayload {
    /// Full list of proposed slots (sent after every mutation)
    SlotsChanged {
        session_id: SessionId,
        slots: Vec<ProposedSlot>,
    },

    /// One slot moved or resized, for animation
    SlotChanged {
        index: usize,
        old: ProposedSlot,
        new: ProposedSlot,
    },

    /// Focused slot changed
    SelectionChanged { index: Option<usize> },

    /// Busy blocks for one day were replaced
    BlocksRefreshed { day_index: i64, count: usize },

    /// Proposal was submitted and the working set is now read-only
    ProposalLocked {
        intent_code: Option<IntentCode>,
        slot_count: usize,
    },
}
