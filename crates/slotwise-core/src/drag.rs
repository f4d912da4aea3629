//! Drag gesture state machine
//!
//! A gesture moves through `Idle -> Dragging -> {Committed, Cancelled} ->
//! Idle`. While dragging, `sample` turns the pointer position into a render
//! target without touching the coordinator; `end` commits the last valid
//! target through the coordinator.
//!
//! The machine is generic over the property being dragged. `MoveAxis`
//! drags a slot's position and validates through `propose_move`;
//! `ResizeAxis` drags its duration and validates through the resize clamp.

use slotwise_util::{DayPoint, Hours};
use std::fmt::Debug;
use std::marker::PhantomData;
use tracing::debug;

use crate::{CoreEvent, ScheduleCoordinator};

/// Pointer position in grid pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pointer {
    pub x: f64,
    pub y: f64,
}

impl Pointer {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// A slot property that can be dragged
pub trait DragAxis {
    type Value: Copy + PartialEq + Debug;

    /// Whether a gesture may start on the slot at `index`
    fn enabled(coord: &ScheduleCoordinator, index: usize) -> bool {
        index < coord.slots().len() && !coord.is_locked()
    }

    /// Current authoritative value
    fn current(coord: &ScheduleCoordinator, index: usize) -> Option<Self::Value>;

    /// Raw (quantized but unvalidated) value for a pointer displacement
    fn project(
        coord: &ScheduleCoordinator,
        index: usize,
        origin: Self::Value,
        dx: f64,
        dy: f64,
    ) -> Self::Value;

    /// Validate a raw value; invalid values fall back to `previous`
    fn validate(
        coord: &ScheduleCoordinator,
        index: usize,
        raw: Self::Value,
        previous: Self::Value,
    ) -> Self::Value;

    /// Write the value back through the coordinator
    fn apply(coord: &mut ScheduleCoordinator, index: usize, value: Self::Value) -> Vec<CoreEvent>;
}

/// Drags a slot to another day and start time
#[derive(Debug)]
pub struct MoveAxis;

impl DragAxis for MoveAxis {
    type Value = DayPoint;

    fn current(coord: &ScheduleCoordinator, index: usize) -> Option<DayPoint> {
        coord.slot(index).map(|s| s.position())
    }

    fn project(
        coord: &ScheduleCoordinator,
        index: usize,
        origin: DayPoint,
        dx: f64,
        dy: f64,
    ) -> DayPoint {
        let grid = coord.settings().grid;
        let duration = coord.slot(index).map(|s| s.duration).unwrap_or(coord.duration());
        let start = (origin.start + grid.hours_for(dy)).clamp_to(Hours::ZERO, Hours::DAY - duration);
        DayPoint::new(origin.day_offset + grid.days_for(dx), start)
    }

    fn validate(
        coord: &ScheduleCoordinator,
        index: usize,
        raw: DayPoint,
        previous: DayPoint,
    ) -> DayPoint {
        coord.propose_move(index, raw, previous)
    }

    fn apply(coord: &mut ScheduleCoordinator, index: usize, value: DayPoint) -> Vec<CoreEvent> {
        coord.commit_move(index, value)
    }
}

/// Drags the bottom edge of a slot
#[derive(Debug)]
pub struct ResizeAxis;

impl DragAxis for ResizeAxis {
    type Value = Hours;

    fn enabled(coord: &ScheduleCoordinator, index: usize) -> bool {
        index < coord.slots().len() && !coord.is_locked() && coord.can_resize()
    }

    fn current(coord: &ScheduleCoordinator, index: usize) -> Option<Hours> {
        coord.slot(index).map(|s| s.duration)
    }

    fn project(
        coord: &ScheduleCoordinator,
        _index: usize,
        origin: Hours,
        _dx: f64,
        dy: f64,
    ) -> Hours {
        origin + coord.settings().grid.hours_for(dy)
    }

    fn validate(coord: &ScheduleCoordinator, index: usize, raw: Hours, _previous: Hours) -> Hours {
        coord.clamp_duration(index, raw)
    }

    fn apply(coord: &mut ScheduleCoordinator, index: usize, value: Hours) -> Vec<CoreEvent> {
        coord.resize(index, value)
    }
}

/// Gesture phase
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DragPhase<V> {
    Idle,
    Dragging {
        index: usize,
        grab: Pointer,
        origin: V,
        /// Last target that passed validation
        target: V,
    },
}

/// How a gesture ended
#[derive(Debug, Clone, PartialEq)]
pub enum DragOutcome<V> {
    Committed {
        index: usize,
        value: V,
        events: Vec<CoreEvent>,
    },
    Cancelled {
        index: usize,
    },
}

/// State of one in-progress drag gesture
#[derive(Debug)]
pub struct DragInteraction<A: DragAxis> {
    phase: DragPhase<A::Value>,
    _axis: PhantomData<A>,
}

pub type MoveDrag = DragInteraction<MoveAxis>;
pub type ResizeDrag = DragInteraction<ResizeAxis>;

impl<A: DragAxis> Default for DragInteraction<A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A: DragAxis> DragInteraction<A> {
    pub fn new() -> Self {
        Self {
            phase: DragPhase::Idle,
            _axis: PhantomData,
        }
    }

    pub fn phase(&self) -> DragPhase<A::Value> {
        self.phase
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.phase, DragPhase::Dragging { .. })
    }

    /// Index of the slot being dragged
    pub fn index(&self) -> Option<usize> {
        match self.phase {
            DragPhase::Dragging { index, .. } => Some(index),
            DragPhase::Idle => None,
        }
    }

    /// Start a gesture on the slot at `index`. Returns false if a gesture
    /// is already running or the slot cannot be dragged.
    pub fn begin(&mut self, coord: &ScheduleCoordinator, index: usize, pointer: Pointer) -> bool {
        if self.is_dragging() || !A::enabled(coord, index) {
            return false;
        }
        let Some(origin) = A::current(coord, index) else {
            return false;
        };

        debug!(index, origin = ?origin, "Drag started");
        self.phase = DragPhase::Dragging {
            index,
            grab: pointer,
            origin,
            target: origin,
        };
        true
    }

    /// Render target for the current pointer. Only the gesture state is
    /// updated; the coordinator is never mutated.
    pub fn sample(&mut self, coord: &ScheduleCoordinator, pointer: Pointer) -> Option<A::Value> {
        let DragPhase::Dragging {
            index,
            grab,
            origin,
            target,
        } = self.phase
        else {
            return None;
        };

        let raw = A::project(coord, index, origin, pointer.x - grab.x, pointer.y - grab.y);
        let next = A::validate(coord, index, raw, target);
        self.phase = DragPhase::Dragging {
            index,
            grab,
            origin,
            target: next,
        };
        Some(next)
    }

    /// Finish the gesture and commit the last valid target.
    pub fn end(
        &mut self,
        coord: &mut ScheduleCoordinator,
        pointer: Pointer,
    ) -> Option<DragOutcome<A::Value>> {
        let value = self.sample(coord, pointer)?;
        let index = self.index()?;
        self.phase = DragPhase::Idle;

        if coord.is_locked() {
            debug!(index, "Drag ended on a locked proposal");
            return Some(DragOutcome::Cancelled { index });
        }
        if A::current(coord, index).is_none() {
            debug!(index, "Dragged slot is gone");
            return Some(DragOutcome::Cancelled { index });
        }

        let events = A::apply(coord, index, value);
        debug!(index, value = ?value, "Drag committed");
        Some(DragOutcome::Committed {
            index,
            value,
            events,
        })
    }

    /// Abandon the gesture; the coordinator is untouched.
    pub fn cancel(&mut self) -> Option<DragOutcome<A::Value>> {
        let index = self.index()?;
        self.phase = DragPhase::Idle;
        debug!(index, "Drag cancelled");
        Some(DragOutcome::Cancelled { index })
    }
}
