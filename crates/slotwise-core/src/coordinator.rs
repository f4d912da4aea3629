//! Working-set coordinator
//!
//! The coordinator is the only owner of the proposed slots for one
//! scheduling session. Every mutation returns the events a presentation
//! layer needs to stay in sync.

use chrono::{NaiveDate, NaiveDateTime};
use slotwise_api::{
    BlocksByDay, BusyBlock, Interval, PossibleSlot, Proposal, ProposedSlot, WireTimeRange,
};
use slotwise_config::{DurationMode, Settings};
use slotwise_util::{DayPoint, Hours, IntentCode, SessionId, SlotwiseError, day_index, floor_from};
use tracing::{debug, info, warn};

use crate::{CoreEvent, SearchContext, find_candidates, layout_day};

/// Owns the mutable set of proposed slots for one session
pub struct ScheduleCoordinator {
    settings: Settings,
    reference: NaiveDate,
    session_id: SessionId,
    duration: Hours,
    floor: DayPoint,
    slots: Vec<ProposedSlot>,
    blocks: BlocksByDay,
    selected: Option<usize>,
    intent_code: Option<IntentCode>,
    locked: bool,
}

impl ScheduleCoordinator {
    /// Create an empty coordinator anchored at `reference` (day offset 0).
    pub fn new(settings: Settings, reference: NaiveDate) -> Self {
        let session_id = SessionId::new();
        let duration = settings.session.default_duration;

        info!(
            session_id = %session_id,
            reference = %reference,
            duration = %duration,
            "Schedule coordinator created"
        );

        Self {
            settings,
            reference,
            session_id,
            duration,
            floor: DayPoint::new(0, Hours::ZERO),
            slots: Vec::new(),
            blocks: BlocksByDay::new(),
            selected: None,
            intent_code: None,
            locked: false,
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn reference(&self) -> NaiveDate {
        self.reference
    }

    /// Absolute day index of day offset 0
    pub fn today_index(&self) -> i64 {
        day_index(self.reference)
    }

    pub fn session_id(&self) -> &SessionId {
        &self.session_id
    }

    /// Session-wide meeting duration
    pub fn duration(&self) -> Hours {
        self.duration
    }

    pub fn floor(&self) -> DayPoint {
        self.floor
    }

    pub fn slots(&self) -> &[ProposedSlot] {
        &self.slots
    }

    pub fn slot(&self, index: usize) -> Option<&ProposedSlot> {
        self.slots.get(index)
    }

    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    pub fn is_locked(&self) -> bool {
        self.locked
    }

    pub fn intent_code(&self) -> Option<&IntentCode> {
        self.intent_code.as_ref()
    }

    /// Ignored while the proposal is locked.
    pub fn set_intent_code(&mut self, code: IntentCode) {
        if self.refuse_if_locked("set_intent_code") {
            return;
        }
        self.intent_code = Some(code);
    }

    /// Whether individual slots may be resized
    pub fn can_resize(&self) -> bool {
        self.settings.session.duration_mode == DurationMode::PerSlot
    }

    fn refuse_if_locked(&self, operation: &'static str) -> bool {
        if self.locked {
            warn!(
                session_id = %self.session_id,
                operation,
                "Proposal is locked, ignoring mutation"
            );
        }
        self.locked
    }

    fn slots_changed(&self) -> CoreEvent {
        CoreEvent::SlotsChanged {
            session_id: self.session_id.clone(),
            slots: self.slots.clone(),
        }
    }

    /// Replace the working set and fix the session duration.
    ///
    /// The floor is recomputed from `now`.
    pub fn initialize(
        &mut self,
        duration: Hours,
        seeds: Vec<ProposedSlot>,
        now: NaiveDateTime,
    ) -> Vec<CoreEvent> {
        if self.refuse_if_locked("initialize") {
            return Vec::new();
        }

        self.duration = duration;
        self.floor = floor_from(now, self.reference);

        // seeds keep their own durations only when slots are sized individually
        self.slots = if self.can_resize() {
            seeds
        } else {
            seeds.into_iter().map(|s| s.with_duration(duration)).collect()
        };
        self.selected = None;

        info!(
            session_id = %self.session_id,
            duration = %self.duration,
            floor = %self.floor,
            slot_count = self.slots.len(),
            "Working set initialized"
        );

        vec![
            self.slots_changed(),
            CoreEvent::SelectionChanged { index: None },
        ]
    }

    /// Replace one absolute day's busy blocks; they are laid out on insert.
    pub fn replace_blocks(&mut self, day_index: i64, blocks: Vec<BusyBlock>) -> CoreEvent {
        let laid = layout_day(blocks);
        let count = laid.len();
        if laid.is_empty() {
            self.blocks.remove(&day_index);
        } else {
            self.blocks.insert(day_index, laid);
        }

        debug!(day_index, count, "Busy blocks replaced");
        CoreEvent::BlocksRefreshed { day_index, count }
    }

    /// Busy blocks for a day offset relative to the reference date
    pub fn busy_blocks_for(&self, day_offset: i32) -> &[BusyBlock] {
        self.blocks
            .get(&(self.today_index() + day_offset as i64))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    fn search_context(&self, target_day: i32, base_start: Hours) -> SearchContext<'_> {
        SearchContext {
            slots: &self.slots,
            blocks: &self.blocks,
            today_index: self.today_index(),
            target_day,
            floor: self.floor,
            base_start,
            duration: self.duration,
            policy: self.settings.search,
        }
    }

    /// Quantize and clamp a requested start so a session-length slot fits.
    fn base_start_for(&self, target_start: Hours) -> Hours {
        target_start
            .round_to_quarter()
            .clamp_to(Hours::ZERO, Hours::DAY - self.duration)
    }

    /// Free starts near a grid point, in search order
    pub fn candidates_near(&self, target_day: i32, target_start: Hours) -> Vec<PossibleSlot> {
        let base = self.base_start_for(target_start);
        find_candidates(&self.search_context(target_day, base))
    }

    /// Add a slot at the free start closest to the given grid point.
    ///
    /// Distance is measured in pixels using the grid geometry. Ties go to
    /// the earlier candidate. Nothing happens when no candidate exists.
    pub fn add_nearest_to_point(&mut self, target_day: i32, target_start: Hours) -> Vec<CoreEvent> {
        if self.refuse_if_locked("add") {
            return Vec::new();
        }

        let target = DayPoint::new(target_day, self.base_start_for(target_start));
        let grid = self.settings.grid;

        let mut best: Option<(PossibleSlot, f64)> = None;
        for candidate in self.candidates_near(target_day, target_start) {
            let distance = grid.distance_sq(candidate, target);
            if best.is_none_or(|(_, d)| distance < d) {
                best = Some((candidate, distance));
            }
        }

        let Some((point, _)) = best else {
            debug!(target = %target, "No free slot near target");
            return Vec::new();
        };

        self.slots.push(ProposedSlot::at(point, self.duration));
        let index = self.slots.len() - 1;
        self.selected = Some(index);

        info!(
            session_id = %self.session_id,
            index,
            slot = %point,
            "Slot added"
        );

        vec![
            self.slots_changed(),
            CoreEvent::SelectionChanged { index: Some(index) },
        ]
    }

    /// Remove the first slot equal to `slot`.
    pub fn remove(&mut self, slot: &ProposedSlot) -> Vec<CoreEvent> {
        if self.refuse_if_locked("remove") {
            return Vec::new();
        }

        let Some(index) = self.slots.iter().position(|s| s == slot) else {
            return Vec::new();
        };
        self.slots.remove(index);

        let mut events = vec![self.slots_changed()];

        let selected = match self.selected {
            Some(sel) if sel > index => Some(sel - 1),
            Some(sel) if sel == index => {
                if self.slots.is_empty() {
                    None
                } else {
                    Some(index.min(self.slots.len() - 1))
                }
            }
            other => other,
        };
        if selected != self.selected {
            self.selected = selected;
            events.push(CoreEvent::SelectionChanged { index: selected });
        }

        info!(session_id = %self.session_id, index, "Slot removed");
        events
    }

    /// Whether the slot at `index` may occupy `target`.
    ///
    /// Checks the day bounds, the floor and every other slot on that day.
    pub fn is_valid_position(&self, index: usize, target: DayPoint) -> bool {
        let Some(slot) = self.slots.get(index) else {
            return false;
        };

        let end = target.start + slot.duration;
        if target.start < Hours::ZERO || end > Hours::DAY || target.is_before(&self.floor) {
            return false;
        }

        !self
            .slots
            .iter()
            .enumerate()
            .filter(|(i, s)| *i != index && s.day_offset == target.day_offset)
            .any(|(_, s)| s.overlaps_range(target.start, end))
    }

    /// Validate a drag target; an invalid target keeps the previous one.
    pub fn propose_move(&self, index: usize, raw: DayPoint, previous: DayPoint) -> DayPoint {
        if self.is_valid_position(index, raw) {
            raw
        } else {
            previous
        }
    }

    /// Move the slot at `index` to `target`.
    pub fn commit_move(&mut self, index: usize, target: DayPoint) -> Vec<CoreEvent> {
        if self.refuse_if_locked("move") {
            return Vec::new();
        }

        let Some(old) = self.slots.get(index).copied() else {
            warn!(index, "Move of unknown slot");
            return Vec::new();
        };
        if old.position() == target {
            return Vec::new();
        }
        if !self.is_valid_position(index, target) {
            warn!(index, target = %target, "Refusing move to invalid position");
            return Vec::new();
        }

        let new = old.with_position(target);
        self.slots[index] = new;

        debug!(index, from = %old.position(), to = %target, "Slot moved");
        vec![
            CoreEvent::SlotChanged { index, old, new },
            self.slots_changed(),
        ]
    }

    /// Longest duration the slot at `index` can grow to: up to the next
    /// slot starting later on the same day, or to the end of the day.
    /// A slot sharing the same start is an overlap and sets no limit.
    pub fn max_duration_for(&self, index: usize) -> Hours {
        let Some(slot) = self.slots.get(index) else {
            return self.duration;
        };

        let limit = self
            .slots
            .iter()
            .enumerate()
            .filter(|(i, s)| {
                *i != index && s.day_offset == slot.day_offset && s.start > slot.start
            })
            .map(|(_, s)| s.start)
            .min()
            .unwrap_or(Hours::DAY);

        limit - slot.start
    }

    /// Clamp a requested duration to `[session duration, max_duration_for]`.
    /// The upper bound wins when the range is empty, but a slot never drops
    /// below one quarter hour.
    pub fn clamp_duration(&self, index: usize, requested: Hours) -> Hours {
        requested
            .round_to_quarter()
            .clamp_to(self.duration, self.max_duration_for(index))
            .max(Hours::QUARTER)
    }

    /// Resize the slot at `index`. Ignored unless durations are per slot.
    pub fn resize(&mut self, index: usize, new_duration: Hours) -> Vec<CoreEvent> {
        if self.refuse_if_locked("resize") {
            return Vec::new();
        }
        if !self.can_resize() {
            debug!(index, "Resize ignored, durations are shared");
            return Vec::new();
        }

        let Some(old) = self.slots.get(index).copied() else {
            warn!(index, "Resize of unknown slot");
            return Vec::new();
        };

        let duration = self.clamp_duration(index, new_duration);
        if duration == old.duration {
            return Vec::new();
        }

        let new = old.with_duration(duration);
        self.slots[index] = new;

        debug!(index, from = %old.duration, to = %duration, "Slot resized");
        vec![
            CoreEvent::SlotChanged { index, old, new },
            self.slots_changed(),
        ]
    }

    /// Build the outbound proposal in insertion order.
    pub fn finalize(&self) -> Proposal {
        let times: Vec<WireTimeRange> = self
            .slots
            .iter()
            .map(|slot| slot.to_wire(self.reference))
            .collect();

        debug!(
            session_id = %self.session_id,
            slot_count = times.len(),
            "Proposal finalized"
        );

        Proposal {
            intent_code: self.intent_code.clone(),
            times,
        }
    }

    /// Focus a slot, or clear focus with `None`.
    pub fn select(&mut self, index: Option<usize>) -> Option<CoreEvent> {
        let index = index.filter(|i| *i < self.slots.len());
        if index == self.selected {
            return None;
        }
        self.selected = index;
        Some(CoreEvent::SelectionChanged { index })
    }

    /// Make the working set read-only after a successful submission.
    pub fn lock(&mut self) -> Option<CoreEvent> {
        if self.locked {
            return None;
        }
        self.locked = true;

        info!(
            session_id = %self.session_id,
            slot_count = self.slots.len(),
            "Proposal locked"
        );

        Some(CoreEvent::ProposalLocked {
            intent_code: self.intent_code.clone(),
            slot_count: self.slots.len(),
        })
    }

    /// Clear slots, selection, intent and lock.
    pub fn reset(&mut self) -> Vec<CoreEvent> {
        self.slots.clear();
        self.selected = None;
        self.intent_code = None;
        self.locked = false;

        info!(session_id = %self.session_id, "Working set reset");
        vec![
            self.slots_changed(),
            CoreEvent::SelectionChanged { index: None },
        ]
    }
}

/// Convert server-suggested ranges into seeds.
///
/// Ranges that fail to decode are returned separately so the caller can
/// report them; the rest are kept in order.
pub fn seeds_from_wire(
    ranges: &[WireTimeRange],
    reference: NaiveDate,
) -> (Vec<ProposedSlot>, Vec<SlotwiseError>) {
    let mut seeds = Vec::with_capacity(ranges.len());
    let mut errors = Vec::new();

    for range in ranges {
        match ProposedSlot::from_wire(range, reference) {
            Ok(slot) => seeds.push(slot),
            Err(e) => errors.push(e),
        }
    }

    (seeds, errors)
}

#[cfg(test)]
mod tests {
    use super::*;
    use slotwise_config::SessionPolicy;

    fn h(v: f64) -> Hours {
        Hours::from_hours(v)
    }

    fn reference() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 2).unwrap()
    }

    fn midnight() -> NaiveDateTime {
        reference().and_hms_opt(0, 0, 0).unwrap()
    }

    fn settings(mode: DurationMode) -> Settings {
        Settings {
            session: SessionPolicy {
                default_duration: h(0.5),
                duration_mode: mode,
            },
            ..Settings::default()
        }
    }

    fn coordinator(mode: DurationMode, duration: f64, seeds: Vec<ProposedSlot>) -> ScheduleCoordinator {
        let mut coord = ScheduleCoordinator::new(settings(mode), reference());
        coord.initialize(h(duration), seeds, midnight());
        coord
    }

    #[test]
    fn initialize_sets_floor_and_duration() {
        let mut coord = ScheduleCoordinator::new(settings(DurationMode::Shared), reference());
        let now = reference().and_hms_opt(9, 7, 0).unwrap();
        let events = coord.initialize(
            h(1.0),
            vec![ProposedSlot::new(1, h(10.0), h(0.25))],
            now,
        );

        assert_eq!(coord.floor(), DayPoint::new(0, h(9.25)));
        assert_eq!(coord.duration(), h(1.0));
        // shared mode forces the session duration onto seeds
        assert_eq!(coord.slots()[0].duration, h(1.0));
        assert!(matches!(events[0], CoreEvent::SlotsChanged { .. }));
    }

    #[test]
    fn add_picks_nearest_candidate() {
        let mut coord = coordinator(
            DurationMode::PerSlot,
            3.0,
            vec![
                ProposedSlot::new(2, h(12.25), h(0.25)),
                ProposedSlot::new(2, h(12.5), h(0.25)),
            ],
        );

        // candidates around day 2 at 11.75: (1,11.75) (2,12.75) (2,9.25) ...
        // (2,12.75) is one hour away vertically, closer than a day column
        let events = coord.add_nearest_to_point(2, h(11.75));
        assert_eq!(coord.slots().len(), 3);
        assert_eq!(coord.slots()[2], ProposedSlot::new(2, h(12.75), h(3.0)));
        assert_eq!(coord.selected(), Some(2));
        assert!(events.contains(&CoreEvent::SelectionChanged { index: Some(2) }));
    }

    #[test]
    fn add_quantizes_target() {
        let mut coord = coordinator(DurationMode::Shared, 1.0, vec![]);
        coord.add_nearest_to_point(0, Hours::from_minutes(9 * 60 + 8));
        assert_eq!(coord.slots()[0].position(), DayPoint::new(0, h(9.25)));

        coord.add_nearest_to_point(3, h(23.5));
        assert_eq!(coord.slots()[1].position(), DayPoint::new(3, h(23.0)));
    }

    #[test]
    fn add_is_noop_without_candidates() {
        let mut settings = settings(DurationMode::Shared);
        settings.search.horizon_days = 3;
        let mut coord = ScheduleCoordinator::new(settings, reference());
        coord.initialize(h(1.0), vec![], midnight());

        let today = coord.today_index();
        for day in today..today + 4 {
            coord.replace_blocks(day, vec![BusyBlock::new("a:b", "Off", Hours::ZERO, Hours::DAY)]);
        }

        assert!(coord.add_nearest_to_point(1, h(9.0)).is_empty());
        assert!(coord.slots().is_empty());
    }

    #[test]
    fn remove_by_value_clamps_selection() {
        let a = ProposedSlot::new(0, h(9.0), h(1.0));
        let b = ProposedSlot::new(0, h(11.0), h(1.0));
        let mut coord = coordinator(DurationMode::Shared, 1.0, vec![a, b]);
        coord.select(Some(1));

        let events = coord.remove(&b);
        assert_eq!(coord.slots(), &[a]);
        assert_eq!(coord.selected(), Some(0));
        assert!(events.contains(&CoreEvent::SelectionChanged { index: Some(0) }));

        // absent slot is a no-op
        assert!(coord.remove(&b).is_empty());

        coord.remove(&a);
        assert_eq!(coord.selected(), None);
    }

    #[test]
    fn move_validation_is_sticky() {
        let a = ProposedSlot::new(1, h(9.0), h(1.0));
        let b = ProposedSlot::new(1, h(11.0), h(1.0));
        let coord = coordinator(DurationMode::Shared, 1.0, vec![a, b]);
        let previous = DayPoint::new(1, h(9.0));

        // overlapping the other slot keeps the previous target
        assert_eq!(coord.propose_move(0, DayPoint::new(1, h(10.5)), previous), previous);
        // back-to-back is fine
        let ok = DayPoint::new(1, h(10.0));
        assert_eq!(coord.propose_move(0, ok, previous), ok);
        // the slot never collides with itself
        let nudge = DayPoint::new(1, h(9.25));
        assert_eq!(coord.propose_move(0, nudge, previous), nudge);
        // past the end of the day
        assert_eq!(coord.propose_move(0, DayPoint::new(1, h(23.5)), previous), previous);
    }

    #[test]
    fn move_respects_floor() {
        let mut coord = ScheduleCoordinator::new(settings(DurationMode::Shared), reference());
        coord.initialize(
            h(1.0),
            vec![ProposedSlot::new(1, h(9.0), h(1.0))],
            reference().and_hms_opt(14, 0, 0).unwrap(),
        );
        let previous = DayPoint::new(1, h(9.0));

        assert_eq!(coord.propose_move(0, DayPoint::new(0, h(13.0)), previous), previous);
        let at_floor = DayPoint::new(0, h(14.0));
        assert_eq!(coord.propose_move(0, at_floor, previous), at_floor);
    }

    #[test]
    fn commit_move_emits_change() {
        let a = ProposedSlot::new(1, h(9.0), h(1.0));
        let mut coord = coordinator(DurationMode::Shared, 1.0, vec![a]);

        assert!(coord.commit_move(0, a.position()).is_empty());

        let target = DayPoint::new(2, h(15.0));
        let events = coord.commit_move(0, target);
        assert_eq!(
            events[0],
            CoreEvent::SlotChanged {
                index: 0,
                old: a,
                new: a.with_position(target),
            }
        );
        assert_eq!(coord.slots()[0].position(), target);
    }

    #[test]
    fn commit_move_refuses_invalid_target() {
        let a = ProposedSlot::new(1, h(9.0), h(1.0));
        let b = ProposedSlot::new(1, h(11.0), h(1.0));
        let mut coord = coordinator(DurationMode::Shared, 1.0, vec![a, b]);

        assert!(coord.commit_move(0, b.position()).is_empty());
        assert_eq!(coord.slots()[0], a);
    }

    #[test]
    fn resize_clamps_to_gap() {
        let a = ProposedSlot::new(1, h(9.0), h(0.5));
        let b = ProposedSlot::new(1, h(11.0), h(0.5));
        let mut coord = coordinator(DurationMode::PerSlot, 0.5, vec![a, b]);

        assert_eq!(coord.max_duration_for(0), h(2.0));
        assert_eq!(coord.max_duration_for(1), h(13.0));

        coord.resize(0, h(5.0));
        assert_eq!(coord.slots()[0].duration, h(2.0));

        coord.resize(0, h(0.25));
        assert_eq!(coord.slots()[0].duration, h(0.5));

        coord.resize(1, h(1.5));
        assert_eq!(coord.slots()[1].duration, h(1.5));
    }

    #[test]
    fn same_start_neighbour_is_not_a_limit() {
        let a = ProposedSlot::new(1, h(9.0), h(1.0));
        let b = ProposedSlot::new(1, h(9.0), h(0.5));
        let mut coord = coordinator(DurationMode::PerSlot, 0.5, vec![a, b]);

        assert_eq!(coord.max_duration_for(0), h(15.0));
        coord.resize(0, h(2.0));
        assert_eq!(coord.slots()[0].duration, h(2.0));
    }

    #[test]
    fn resize_never_reaches_zero() {
        let a = ProposedSlot::new(1, h(9.0), h(0.25));
        let b = ProposedSlot::new(1, Hours::from_minutes(9 * 60 + 5), h(0.25));
        let mut coord = coordinator(DurationMode::PerSlot, 0.25, vec![a, b]);

        assert_eq!(coord.max_duration_for(0), Hours::from_minutes(5));
        assert_eq!(coord.clamp_duration(0, h(1.0)), Hours::QUARTER);
        assert!(coord.resize(0, h(1.0)).is_empty());
        assert_eq!(coord.slots()[0].duration, Hours::QUARTER);
    }

    #[test]
    fn resize_disabled_when_shared() {
        let a = ProposedSlot::new(1, h(9.0), h(0.5));
        let mut coord = coordinator(DurationMode::Shared, 0.5, vec![a]);

        assert!(coord.resize(0, h(1.0)).is_empty());
        assert_eq!(coord.slots()[0].duration, h(0.5));
    }

    #[test]
    fn finalize_is_idempotent_and_ordered() {
        let a = ProposedSlot::new(2, h(9.0), h(0.5));
        let b = ProposedSlot::new(0, h(15.0), h(0.5));
        let mut coord = coordinator(DurationMode::Shared, 0.5, vec![a, b]);
        coord.set_intent_code(IntentCode::new("abc123"));

        let first = coord.finalize();
        let second = coord.finalize();
        assert_eq!(first, second);
        assert_eq!(first.intent_code, Some(IntentCode::new("abc123")));
        assert_eq!(first.times[0].start_date_time, "2025-06-04T09:00:00Z");
        assert_eq!(first.times[0].end_date_time, "2025-06-04T09:30:00Z");
        assert_eq!(first.times[1].start_date_time, "2025-06-02T15:00:00Z");
    }

    #[test]
    fn lock_refuses_mutations_until_reset() {
        let a = ProposedSlot::new(1, h(9.0), h(1.0));
        let mut coord = coordinator(DurationMode::PerSlot, 1.0, vec![a]);

        assert!(matches!(
            coord.lock(),
            Some(CoreEvent::ProposalLocked { slot_count: 1, .. })
        ));
        assert!(coord.lock().is_none());

        assert!(coord.add_nearest_to_point(0, h(9.0)).is_empty());
        assert!(coord.remove(&a).is_empty());
        assert!(coord.commit_move(0, DayPoint::new(2, h(9.0))).is_empty());
        assert!(coord.resize(0, h(2.0)).is_empty());
        assert_eq!(coord.slots(), &[a]);

        coord.set_intent_code(IntentCode::new("late"));
        assert!(coord.intent_code().is_none());

        coord.reset();
        assert!(!coord.is_locked());
        assert!(coord.slots().is_empty());
    }

    #[test]
    fn blocks_are_laid_out_on_insert() {
        let mut coord = coordinator(DurationMode::Shared, 1.0, vec![]);
        let today = coord.today_index();

        let event = coord.replace_blocks(
            today + 1,
            vec![
                BusyBlock::new("a:b", "B", h(12.5), h(1.0)),
                BusyBlock::new("a:b", "A", h(12.0), h(1.0)),
            ],
        );
        assert_eq!(
            event,
            CoreEvent::BlocksRefreshed {
                day_index: today + 1,
                count: 2
            }
        );

        let blocks = coord.busy_blocks_for(1);
        assert_eq!(blocks[0].title, "A");
        assert_eq!(blocks[1].stack_depth, 1);
        assert!(coord.busy_blocks_for(0).is_empty());
    }

    #[test]
    fn seeds_from_wire_reports_bad_ranges() {
        let ranges = vec![
            WireTimeRange::new("2025-06-03T09:05:00Z", "2025-06-03T09:35:00Z"),
            WireTimeRange::new("not a date", "2025-06-03T10:00:00Z"),
        ];

        let (seeds, errors) = seeds_from_wire(&ranges, reference());
        assert_eq!(seeds, vec![ProposedSlot::new(1, h(9.0), h(0.5))]);
        assert_eq!(errors.len(), 1);
    }
}
