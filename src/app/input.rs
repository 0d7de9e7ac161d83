use std::{
    sync::Arc,
    time::{Duration, Instant},
};

use crossterm::event::KeyEvent;

use super::keymap::KeymapStore;
use crate::picker::WheelSlot;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    Confirm,
    Quit,
    Recenter,
    /// Move the focused wheel by this many rows.
    WheelStep(i64),
    /// Move the focused wheel by this many full viewports.
    WheelPage(i64),
    FocusStep(i32),
}

pub struct InputRouter {
    keymap: Arc<KeymapStore>,
}

impl InputRouter {
    pub fn new(keymap: Arc<KeymapStore>) -> Self {
        Self { keymap }
    }

    pub fn classify(&self, key: &KeyEvent) -> Option<KeyAction> {
        self.keymap.classify(key)
    }

    pub fn help_text(&self) -> Option<String> {
        self.keymap.help_text()
    }
}

/// Weight of the newest sample in the smoothed drag velocity.
const VELOCITY_SMOOTHING: f32 = 0.6;
/// A release this long after the last pointer move is a hold, not a fling.
const FLING_WINDOW: Duration = Duration::from_millis(80);
/// Fastest fling, in layout units per second.
pub const MAX_FLING_VELOCITY: f32 = 8_000.0;

/// Mouse drag on one wheel, converted from terminal lines into layout units.
#[derive(Debug, Clone)]
pub struct DragGesture {
    pub slot: WheelSlot,
    last_line: u16,
    last_at: Instant,
    velocity: f32,
}

impl DragGesture {
    pub fn start(slot: WheelSlot, line: u16, at: Instant) -> Self {
        Self {
            slot,
            last_line: line,
            last_at: at,
            velocity: 0.0,
        }
    }

    /// Records a pointer move and returns the scroll delta to apply.
    ///
    /// Dragging the pointer down pulls lower values into view, so the scroll
    /// delta has the opposite sign of the pointer movement.
    pub fn move_to(&mut self, line: u16, at: Instant, row_height: f32) -> f32 {
        let lines = line as f32 - self.last_line as f32;
        let delta = -lines * row_height;
        let elapsed = at.saturating_duration_since(self.last_at).as_secs_f32();
        if elapsed > 0.0 {
            let sample = delta / elapsed;
            self.velocity = VELOCITY_SMOOTHING * sample + (1.0 - VELOCITY_SMOOTHING) * self.velocity;
        }
        self.last_line = line;
        self.last_at = at;
        delta
    }

    pub fn velocity(&self) -> f32 {
        self.velocity
    }

    /// Velocity to fling with when the pointer is released at `at`.
    ///
    /// Terminals report no events while the pointer is held still, so a
    /// release after a pause carries no velocity and the wheel just snaps.
    pub fn release_velocity(&self, at: Instant) -> f32 {
        if at.saturating_duration_since(self.last_at) > FLING_WINDOW {
            return 0.0;
        }
        self.velocity
            .clamp(-MAX_FLING_VELOCITY, MAX_FLING_VELOCITY)
    }
}
