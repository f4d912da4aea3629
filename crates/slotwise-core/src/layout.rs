//! Overlap layout for a day's busy blocks
//!
//! Each interval gets a stacking depth equal to the number of previously
//! processed intervals whose `[start, end)` range contains its start. This
//! is a greedy pass, not a minimal colouring: two intervals can end up at
//! the same depth while overlapping each other.

use slotwise_api::{BusyBlock, Interval, Stackable};

/// Assign stacking depths in the given order.
pub fn layout<T: Stackable>(intervals: &mut [T]) {
    let ranges: Vec<_> = intervals.iter().map(|i| (i.start(), i.end())).collect();

    for (i, interval) in intervals.iter_mut().enumerate() {
        let start = ranges[i].0;
        let depth = ranges[..i]
            .iter()
            .filter(|(s, e)| *s <= start && start < *e)
            .count();
        interval.set_stack_depth(depth as u32);
    }
}

/// Stable sort by start ascending, then duration descending.
pub fn sort_for_layout<T: Interval>(intervals: &mut [T]) {
    intervals.sort_by(|a, b| {
        a.start()
            .cmp(&b.start())
            .then_with(|| b.duration().cmp(&a.duration()))
    });
}

/// Sort and lay out one day's intervals.
pub fn layout_day<T: Stackable>(mut intervals: Vec<T>) -> Vec<T> {
    sort_for_layout(&mut intervals);
    layout(&mut intervals);
    intervals
}

/// Pick one day's blocks out of a raw `(day_index, block)` list and lay
/// them out.
pub fn blocks_for_day(raw: &[(i64, BusyBlock)], day_index: i64) -> Vec<BusyBlock> {
    let day: Vec<BusyBlock> = raw
        .iter()
        .filter(|(day, _)| *day == day_index)
        .map(|(_, block)| block.clone())
        .collect();
    layout_day(day)
}
