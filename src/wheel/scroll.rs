//! Fling-and-snap scrolling for a single wheel.
//!
//! Free movement only happens while a drag is active. Releasing a drag (or
//! stepping with the keyboard) always ends in `Settling`, which animates the
//! viewport until one row is exactly aligned again.

use std::time::Duration;

use super::position::ScrollPosition;

/// How far ahead a fling velocity is projected before snapping, in seconds.
const FLING_PROJECTION_SECS: f32 = 0.25;
/// Exponential approach rate of the settle animation, per second.
const SETTLE_RATE: f64 = 18.0;
/// Slowest settle speed so the tail of the animation still finishes quickly.
const MIN_ROWS_PER_SECOND: f64 = 3.0;
/// Remaining distance below which the settle snaps into place.
const SNAP_EPSILON: f64 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollPhase {
    Idle,
    Dragging,
    Settling { target: i64 },
}

#[derive(Debug, Clone)]
pub struct ScrollController {
    position: ScrollPosition,
    phase: ScrollPhase,
    row_height: f32,
}

impl ScrollController {
    pub fn new(logical_index: i64, row_height: f32) -> Self {
        Self {
            position: ScrollPosition::at_item(logical_index),
            phase: ScrollPhase::Idle,
            row_height,
        }
    }

    pub fn position(&self) -> ScrollPosition {
        self.position
    }

    pub fn phase(&self) -> ScrollPhase {
        self.phase
    }

    pub fn is_scrolling(&self) -> bool {
        self.phase != ScrollPhase::Idle
    }

    /// Jumps straight to `logical_index`, cancelling any drag or settle.
    pub fn scroll_to_item(&mut self, logical_index: i64) {
        self.position = ScrollPosition::at_item(logical_index);
        self.phase = ScrollPhase::Idle;
    }

    /// Starts an animated settle towards `logical_index`.
    pub fn animate_to_item(&mut self, logical_index: i64) {
        if self.position == ScrollPosition::at_item(logical_index) {
            self.phase = ScrollPhase::Idle;
        } else {
            self.phase = ScrollPhase::Settling {
                target: logical_index,
            };
        }
    }

    /// Moves `items` rows from the current snap target.
    pub fn step(&mut self, items: i64) {
        let base = match self.phase {
            ScrollPhase::Settling { target } => target,
            _ => self.position.nearest_item(self.row_height),
        };
        self.animate_to_item(base + items);
    }

    pub fn begin_drag(&mut self) {
        self.phase = ScrollPhase::Dragging;
    }

    /// Moves the viewport freely by `delta` layout units.
    pub fn drag_by(&mut self, delta: f32) {
        self.phase = ScrollPhase::Dragging;
        self.position = self.position.offset_by(delta, self.row_height);
    }

    /// Ends a drag; `velocity` is in layout units per second and decides
    /// which row the fling settles on.
    pub fn release(&mut self, velocity: f32) {
        let projected = self.position.scroll_offset + velocity * FLING_PROJECTION_SECS;
        let rows = (projected / self.row_height).round() as i64;
        self.animate_to_item(self.position.logical_index + rows);
    }

    /// Advances the settle animation. Returns `true` on the tick the wheel
    /// comes to rest.
    pub fn tick(&mut self, elapsed: Duration) -> bool {
        let ScrollPhase::Settling { target } = self.phase else {
            return false;
        };
        let goal = ScrollPosition::at_item(target);
        let remaining = goal.distance_from(&self.position, self.row_height);
        let dt = elapsed.as_secs_f64();

        let mut delta = remaining * (1.0 - (-SETTLE_RATE * dt).exp());
        let min_delta = MIN_ROWS_PER_SECOND * self.row_height as f64 * dt;
        if delta.abs() < min_delta {
            delta = remaining.signum() * min_delta.min(remaining.abs());
        }

        if (remaining - delta).abs() < SNAP_EPSILON {
            self.position = goal;
            self.phase = ScrollPhase::Idle;
            return true;
        }
        self.position = self.position.offset_by(delta as f32, self.row_height);
        false
    }
}
