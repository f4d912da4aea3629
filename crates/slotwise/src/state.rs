//! Reactive schedule state for presentation clients

use slotwise_api::{Event, EventPayload, ProposedSlot};
use slotwise_util::SessionId;
use tokio::sync::watch;

/// Last per-slot change, kept for animation
#[derive(Debug, Clone, PartialEq)]
pub struct SlotChange {
    pub index: usize,
    pub old: ProposedSlot,
    pub new: ProposedSlot,
}

/// What a presentation client renders
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScheduleView {
    pub session_id: Option<SessionId>,
    pub slots: Vec<ProposedSlot>,
    pub selected: Option<usize>,
    pub last_change: Option<SlotChange>,
    pub locked: bool,
}

/// Shared state container
#[derive(Clone)]
pub struct SharedState {
    sender: watch::Sender<ScheduleView>,
    receiver: watch::Receiver<ScheduleView>,
}

impl Default for SharedState {
    fn default() -> Self {
        Self::new()
    }
}

impl SharedState {
    pub fn new() -> Self {
        let (sender, receiver) = watch::channel(ScheduleView::default());
        Self { sender, receiver }
    }

    pub fn get(&self) -> ScheduleView {
        self.receiver.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<ScheduleView> {
        self.receiver.clone()
    }

    /// Update state from a core event
    pub fn handle_event(&self, event: Event) {
        tracing::trace!(event = ?event.payload, "Applying event");
        match event.payload {
            EventPayload::SlotsChanged { session_id, slots } => {
                self.sender.send_modify(|view| {
                    view.session_id = Some(session_id);
                    view.slots = slots;
                });
            }
            EventPayload::SlotChanged { index, old, new } => {
                self.sender.send_modify(|view| {
                    view.last_change = Some(SlotChange { index, old, new });
                });
            }
            EventPayload::SelectionChanged { index } => {
                self.sender.send_modify(|view| view.selected = index);
            }
            EventPayload::BlocksRefreshed { .. } => {
                // Blocks are read straight from the coordinator
            }
            EventPayload::ProposalLocked { .. } => {
                self.sender.send_modify(|view| view.locked = true);
            }
        }
    }

    /// Drop everything, e.g. after the session is reset
    pub fn clear(&self) {
        let _ = self.sender.send(ScheduleView::default());
    }
}
