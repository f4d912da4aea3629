//! Core events emitted by the coordinator

use slotwise_api::ProposedSlot;
use slotwise_util::{IntentCode, SessionId};

/// Events emitted by the schedule coordinator
#[derive(Debug, Clone, PartialEq)]
pub enum CoreEvent {
    /// The working set changed; carries the full list in insertion order
    SlotsChanged {
        session_id: SessionId,
        slots: Vec<ProposedSlot>,
    },

    /// One slot moved or was resized
    SlotChanged {
        index: usize,
        old: ProposedSlot,
        new: ProposedSlot,
    },

    /// Focused slot changed
    SelectionChanged { index: Option<usize> },

    /// Busy blocks for one absolute day were replaced
    BlocksRefreshed { day_index: i64, count: usize },

    /// The proposal was submitted; the working set is now read-only
    ProposalLocked {
        intent_code: Option<IntentCode>,
        slot_count: usize,
    },
}
