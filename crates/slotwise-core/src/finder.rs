//! Nearest free slot search
//!
//! The search probes a small window of days around the target day. Each
//! day is probed bidirectionally from a base start time. When the window
//! yields nothing, days are scanned forward from the floor day until one
//! has a hit or the horizon runs out.

use slotwise_api::{BlocksByDay, BusyBlock, Interval, PossibleSlot, ProposedSlot};
use slotwise_config::SearchPolicy;
use slotwise_util::{DayPoint, Hours};
use std::collections::HashSet;
use tracing::debug;

/// Everything a single search needs. Borrowed from the coordinator.
#[derive(Debug, Clone, Copy)]
pub struct SearchContext<'a> {
    /// Proposed slots on all days
    pub slots: &'a [ProposedSlot],
    /// Busy blocks keyed by absolute day index
    pub blocks: &'a BlocksByDay,
    /// Absolute day index of day offset 0
    pub today_index: i64,
    pub target_day: i32,
    /// Earliest allowed start
    pub floor: DayPoint,
    pub base_start: Hours,
    pub duration: Hours,
    pub policy: SearchPolicy,
}

impl<'a> SearchContext<'a> {
    fn blocks_on(&self, day_offset: i32) -> &'a [BusyBlock] {
        self.blocks
            .get(&(self.today_index + day_offset as i64))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// True if a slot of the search duration may start at `start` on `day`.
    pub fn is_free(&self, day_offset: i32, start: Hours) -> bool {
        let candidate = DayPoint::new(day_offset, start);
        if candidate.is_before(&self.floor) {
            return false;
        }

        let end = start + self.duration;
        let slot_hit = self
            .slots
            .iter()
            .filter(|s| s.day_offset == day_offset)
            .any(|s| s.overlaps_range(start, end));
        if slot_hit {
            return false;
        }

        !self
            .blocks_on(day_offset)
            .iter()
            .any(|b| b.overlaps_range(start, end))
    }

    fn latest_start(&self) -> Hours {
        Hours::DAY - self.duration
    }

    /// Probe one day outward from the base start.
    ///
    /// A free base start is the only hit. Otherwise the first free start
    /// walking forward and the first walking backward are reported, in
    /// that order.
    pub fn probe_day(&self, day_offset: i32, base: Hours) -> Vec<PossibleSlot> {
        if self.is_free(day_offset, base) {
            return vec![DayPoint::new(day_offset, base)];
        }

        let mut hits = Vec::with_capacity(2);
        let latest = self.latest_start();

        let mut start = base + Hours::QUARTER;
        while start <= latest {
            if self.is_free(day_offset, start) {
                hits.push(DayPoint::new(day_offset, start));
                break;
            }
            start += Hours::QUARTER;
        }

        let mut start = base - Hours::QUARTER;
        while start >= Hours::ZERO {
            if self.is_free(day_offset, start) {
                hits.push(DayPoint::new(day_offset, start));
                break;
            }
            start -= Hours::QUARTER;
        }

        hits
    }
}

/// Find candidate starts near the target day.
///
/// Returns an empty vector when nothing fits within the horizon.
pub fn find_candidates(ctx: &SearchContext<'_>) -> Vec<PossibleSlot> {
    if ctx.duration <= Hours::ZERO || ctx.duration > Hours::DAY {
        return Vec::new();
    }

    let base = ctx.base_start.clamp_to(Hours::ZERO, ctx.latest_start());
    let first = ctx.target_day - ctx.policy.window_before_days as i32;
    let last = ctx.target_day + ctx.policy.window_after_days as i32;

    let mut found: Vec<PossibleSlot> = (first..=last)
        .flat_map(|day| ctx.probe_day(day, base))
        .collect();

    if found.is_empty() {
        debug!(
            target_day = ctx.target_day,
            floor = %ctx.floor,
            horizon_days = ctx.policy.horizon_days,
            "Local window full, scanning forward from floor"
        );

        for day in ctx.floor.day_offset..ctx.floor.day_offset + ctx.policy.horizon_days as i32 {
            let hits = ctx.probe_day(day, base);
            if !hits.is_empty() {
                found = hits;
                break;
            }
        }
    }

    dedup_preserving_order(found)
}

fn dedup_preserving_order(candidates: Vec<PossibleSlot>) -> Vec<PossibleSlot> {
    let mut seen = HashSet::with_capacity(candidates.len());
    candidates.into_iter().filter(|c| seen.insert(*c)).collect()
}
