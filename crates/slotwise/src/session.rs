//! Scheduling session flow
//!
//! Drives one coordinator against a backend: fetch busy blocks, initiate a
//! meeting, seed the working set, add slots, finalize and submit. A failed
//! backend call leaves the working set as it was.

use chrono::{NaiveDate, NaiveDateTime};
use slotwise_api::{DayRange, Event, EventPayload, InitiateRequest, Proposal};
use slotwise_backend_api::{BackendResult, SchedulingBackend};
use slotwise_config::Settings;
use slotwise_core::{CoreEvent, ScheduleCoordinator, seeds_from_wire};
use slotwise_util::{Hours, format_datetime_full};
use std::sync::Arc;
use tracing::{info, warn};

use crate::SharedState;

/// Map a core event onto the presentation event stream
pub fn to_payload(event: CoreEvent) -> EventPayload {
    match event {
        CoreEvent::SlotsChanged { session_id, slots } => {
            EventPayload::SlotsChanged { session_id, slots }
        }
        CoreEvent::SlotChanged { index, old, new } => EventPayload::SlotChanged { index, old, new },
        CoreEvent::SelectionChanged { index } => EventPayload::SelectionChanged { index },
        CoreEvent::BlocksRefreshed { day_index, count } => {
            EventPayload::BlocksRefreshed { day_index, count }
        }
        CoreEvent::ProposalLocked {
            intent_code,
            slot_count,
        } => EventPayload::ProposalLocked {
            intent_code,
            slot_count,
        },
    }
}

/// One scheduling session against a backend
pub struct SchedulingSession<B: SchedulingBackend> {
    backend: Arc<B>,
    coordinator: ScheduleCoordinator,
    state: SharedState,
}

impl<B: SchedulingBackend> SchedulingSession<B> {
    pub fn new(backend: Arc<B>, settings: Settings, reference: NaiveDate, state: SharedState) -> Self {
        Self {
            backend,
            coordinator: ScheduleCoordinator::new(settings, reference),
            state,
        }
    }

    pub fn coordinator(&self) -> &ScheduleCoordinator {
        &self.coordinator
    }

    /// Drag gestures need mutable access to commit
    pub fn coordinator_mut(&mut self) -> &mut ScheduleCoordinator {
        &mut self.coordinator
    }

    pub fn state(&self) -> &SharedState {
        &self.state
    }

    pub fn publish(&self, events: impl IntoIterator<Item = CoreEvent>) {
        for event in events {
            self.state.handle_event(Event::new(to_payload(event)));
        }
    }

    /// Absolute day range covering the search window around `target_day`
    pub fn window_around(&self, target_day: i32) -> DayRange {
        let search = self.coordinator.settings().search;
        let today = self.coordinator.today_index();
        DayRange::new(
            today + (target_day - search.window_before_days as i32) as i64,
            today + (target_day + search.window_after_days as i32) as i64,
        )
    }

    /// Absolute day range a search around `target_day` can visit: the local
    /// window plus the forward scan from the floor.
    pub fn search_range(&self, target_day: i32) -> DayRange {
        let window = self.window_around(target_day);
        let horizon = self.coordinator.settings().search.horizon_days as i64;
        let floor = self.coordinator.today_index() + self.coordinator.floor().day_offset as i64;
        DayRange::new(
            window.first.min(floor),
            window.last.max(floor + horizon - 1),
        )
    }

    /// Load busy blocks for every day a search around `target_day` can
    /// return, so unfetched days are never mistaken for free ones.
    pub async fn load_search_range(&mut self, target_day: i32) -> BackendResult<usize> {
        self.load_blocks(self.search_range(target_day)).await
    }

    /// Fetch and install busy blocks for every day in `range`.
    ///
    /// Days the backend returns nothing for are cleared.
    pub async fn load_blocks(&mut self, range: DayRange) -> BackendResult<usize> {
        let mut blocks = self.backend.get_blocks(range).await?;

        let mut total = 0;
        for day in range.days() {
            let day_blocks = blocks.remove(&day).unwrap_or_default();
            total += day_blocks.len();
            let event = self.coordinator.replace_blocks(day, day_blocks);
            self.publish([event]);
        }

        info!(first = range.first, last = range.last, block_count = total, "Busy blocks loaded");
        Ok(total)
    }

    /// Initiate a meeting and seed the working set from the server's
    /// suggestions. Returns the number of seeded slots.
    pub async fn start(&mut self, request: InitiateRequest, now: NaiveDateTime) -> BackendResult<usize> {
        if self.coordinator.is_locked() {
            warn!("Proposal is locked, not initiating a new meeting");
            return Ok(0);
        }

        let initiation = self.backend.initiate_meeting(request).await?;

        let (seeds, errors) = seeds_from_wire(&initiation.suggested_slots, self.coordinator.reference());
        for err in &errors {
            warn!(error = %err, "Skipping unreadable suggested slot");
        }

        let duration = Hours::from_minutes(initiation.duration_minutes as i32)
            .round_to_quarter()
            .clamp_to(Hours::QUARTER, Hours::DAY);

        let events = self.coordinator.initialize(duration, seeds, now);
        self.coordinator.set_intent_code(initiation.intent_code.clone());
        self.publish(events);

        info!(
            intent_code = %initiation.intent_code,
            title = %initiation.default_title,
            duration = %duration,
            now = %format_datetime_full(&now),
            seeded = self.coordinator.slots().len(),
            "Meeting initiated"
        );
        Ok(self.coordinator.slots().len())
    }

    /// Add a slot near a grid point. Returns false when nothing fits.
    ///
    /// Only loaded days are searched; see `load_search_range`.
    pub fn add_near(&mut self, target_day: i32, target_start: Hours) -> bool {
        let events = self.coordinator.add_nearest_to_point(target_day, target_start);
        let added = !events.is_empty();
        self.publish(events);
        added
    }

    /// Finalize, submit, and lock on success.
    ///
    /// Returns the proposal that was sent and the server's shareable message.
    pub async fn submit(&mut self) -> BackendResult<(Proposal, String)> {
        let proposal = self.coordinator.finalize();
        let message = match self.backend.submit_proposal(&proposal).await {
            Ok(message) => message,
            Err(e) => {
                warn!(error = %e, slot_count = proposal.times.len(), "Proposal submission failed");
                return Err(e);
            }
        };

        if let Some(event) = self.coordinator.lock() {
            self.publish([event]);
        }
        Ok((proposal, message))
    }

    /// Start over with an empty, unlocked working set
    pub fn reset(&mut self) {
        let events = self.coordinator.reset();
        self.state.clear();
        self.publish(events);
    }
}
