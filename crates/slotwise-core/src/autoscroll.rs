//! Auto-scroll decisions while a drag is in progress
//!
//! Near the left or right viewport edge the grid pages by one day, at most
//! once per cooldown. Near the top or bottom edge it scrolls vertically
//! with a speed that grows logarithmically with how deep the pointer is in
//! the hot band. The scroller only decides; the host performs the scroll.

use slotwise_config::DragPolicy;
use std::time::Instant;
use tracing::trace;

use crate::Pointer;

/// Visible area of the grid, in pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

/// A scroll the host should perform
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ScrollAction {
    /// Page the visible days; negative is backwards
    PageDays(i32),
    /// Scroll vertically by this many pixels; negative is up
    ScrollBy(f64),
}

/// Vertical scroll speed for a pointer `depth` into the hot band (0..=1).
pub fn scroll_velocity(depth: f64, policy: &DragPolicy) -> f64 {
    let depth = depth.clamp(0.0, 1.0);
    let k = policy.scroll_curve;
    policy.max_scroll_per_tick * (1.0 + k * depth).ln() / (1.0 + k).ln()
}

#[derive(Debug)]
pub struct AutoScroller {
    policy: DragPolicy,
    is_allowed: bool,
    last_page: Option<Instant>,
}

impl AutoScroller {
    pub fn new(policy: DragPolicy) -> Self {
        Self {
            policy,
            is_allowed: true,
            last_page: None,
        }
    }

    /// Whether a horizontal page may fire right now
    pub fn is_allowed(&self) -> bool {
        self.is_allowed
    }

    /// Forget any cooldown, e.g. when a new gesture starts
    pub fn reset(&mut self) {
        self.is_allowed = true;
        self.last_page = None;
    }

    /// Scroll actions for the current pointer position
    pub fn tick(&mut self, pointer: Pointer, viewport: Viewport, now: Instant) -> Vec<ScrollAction> {
        self.horizontal(pointer, viewport, now)
            .into_iter()
            .chain(self.vertical(pointer, viewport))
            .collect()
    }

    /// Day paging near the left and right edges, debounced by the cooldown
    pub fn horizontal(&mut self, pointer: Pointer, viewport: Viewport, now: Instant) -> Option<ScrollAction> {
        if !self.is_allowed
            && self
                .last_page
                .is_none_or(|last| now.duration_since(last) >= self.policy.page_cooldown)
        {
            self.is_allowed = true;
        }

        let hot = self.policy.hot_edge;
        let direction = if pointer.x < hot {
            -1
        } else if pointer.x > viewport.width - hot {
            1
        } else {
            return None;
        };

        if !self.is_allowed {
            return None;
        }

        self.is_allowed = false;
        self.last_page = Some(now);
        trace!(direction, "Auto-scroll page");
        Some(ScrollAction::PageDays(direction))
    }

    /// Vertical scroll near the top and bottom edges
    pub fn vertical(&self, pointer: Pointer, viewport: Viewport) -> Option<ScrollAction> {
        let hot = self.policy.hot_edge;
        if hot <= 0.0 {
            return None;
        }

        let to_bottom = viewport.height - pointer.y;
        let (distance, sign) = if pointer.y < hot {
            (pointer.y, -1.0)
        } else if to_bottom < hot {
            (to_bottom, 1.0)
        } else {
            return None;
        };

        let depth = (hot - distance) / hot;
        let speed = scroll_velocity(depth, &self.policy);
        if speed <= 0.0 {
            return None;
        }
        Some(ScrollAction::ScrollBy(sign * speed))
    }
}
