//! Hour/minute composition of two [`Wheel`]s.
//!
//! The picker owns the shared selection state and the live minute minimum.
//! Wheels only ever see the minimum through [`Wheel::set_min_value`]; every
//! commit from either wheel is forwarded to the subscribers registered with
//! [`TimePicker::with_on_selected`] and [`TimePicker::with_on_selected_strings`].

use std::time::Duration;

use tracing::debug;

use crate::{
    domain::{ClockTime, Selection, ValueRange},
    wheel::{Wheel, WheelConfig, WheelGeometry, WheelSelection},
};

pub type SelectedCallback = Box<dyn FnMut(u32, u32)>;
pub type SelectedStringsCallback = Box<dyn FnMut(&str, &str)>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WheelSlot {
    #[default]
    Hour,
    Minute,
}

impl WheelSlot {
    pub fn other(self) -> Self {
        match self {
            WheelSlot::Hour => WheelSlot::Minute,
            WheelSlot::Minute => WheelSlot::Hour,
        }
    }
}

pub struct TimePicker {
    hour_wheel: Wheel,
    minute_wheel: Wheel,
    min_time: ClockTime,
    minute_min: u32,
    hour: u32,
    minute: u32,
    focus: WheelSlot,
    on_selected: Vec<SelectedCallback>,
    on_selected_strings: Vec<SelectedStringsCallback>,
}

impl TimePicker {
    pub fn new(start_time: ClockTime, min_time: ClockTime) -> Self {
        Self::with_geometry(start_time, min_time, WheelGeometry::default())
    }

    pub fn with_geometry(
        start_time: ClockTime,
        min_time: ClockTime,
        geometry: WheelGeometry,
    ) -> Self {
        let (hour, minute) = initial_values(start_time, min_time);
        let hour_wheel = Wheel::new(
            WheelConfig::new("hour", ValueRange::HOURS)
                .with_initial_value(hour)
                .with_min_value(min_time.hour)
                .with_geometry(geometry),
        );
        let minute_wheel = Wheel::new(
            WheelConfig::new("minute", ValueRange::MINUTES)
                .with_initial_value(minute)
                .with_min_value(min_time.minute)
                .with_geometry(geometry),
        );
        Self {
            hour_wheel,
            minute_wheel,
            min_time,
            minute_min: min_time.minute,
            hour,
            minute,
            focus: WheelSlot::Hour,
            on_selected: Vec::new(),
            on_selected_strings: Vec::new(),
        }
    }

    pub fn with_on_selected(mut self, callback: impl FnMut(u32, u32) + 'static) -> Self {
        self.on_selected.push(Box::new(callback));
        self
    }

    pub fn with_on_selected_strings(
        mut self,
        callback: impl FnMut(&str, &str) + 'static,
    ) -> Self {
        self.on_selected_strings.push(Box::new(callback));
        self
    }

    /// Centers both wheels on their initial values and emits one combined
    /// selection.
    pub fn mount(&mut self) -> Selection {
        let hour = self.hour_wheel.mount();
        self.apply_hour(&hour);
        let minute = self.minute_wheel.mount();
        self.minute = minute.value;
        self.emit()
    }

    /// Re-centers both wheels on a new start time. The move happens on the
    /// next [`TimePicker::run_deferred`].
    pub fn set_start_time(&mut self, start_time: ClockTime) {
        let (hour, minute) = initial_values(start_time, self.min_time);
        self.hour_wheel.set_initial_value(hour);
        self.minute_wheel.set_initial_value(minute);
    }

    /// Sends both wheels back to their start values on the next deferred run.
    pub fn recenter(&mut self) {
        self.hour_wheel.recenter();
        self.minute_wheel.recenter();
    }

    /// Advances both wheels by one frame: animation, layout pass, deferred
    /// re-scrolls and a second layout pass so bounce targets commit in the
    /// same frame. Returns the last selection emitted during the frame.
    pub fn frame(&mut self, elapsed: Duration) -> Option<Selection> {
        self.tick(elapsed);
        let mut emitted = self.layout_pass();
        if let Some(selection) = self.run_deferred() {
            emitted = Some(selection);
        }
        if let Some(selection) = self.layout_pass() {
            emitted = Some(selection);
        }
        emitted
    }

    /// Returns `true` when either wheel just came to rest.
    pub fn tick(&mut self, elapsed: Duration) -> bool {
        let hour_settled = self.hour_wheel.tick(elapsed);
        let minute_settled = self.minute_wheel.tick(elapsed);
        hour_settled || minute_settled
    }

    pub fn layout_pass(&mut self) -> Option<Selection> {
        let mut emitted = None;
        if let Some(hour) = self.hour_wheel.layout_pass() {
            self.apply_hour(&hour);
            emitted = Some(self.emit());
        }
        if let Some(minute) = self.minute_wheel.layout_pass() {
            self.minute = minute.value;
            emitted = Some(self.emit());
        }
        emitted
    }

    pub fn run_deferred(&mut self) -> Option<Selection> {
        let mut emitted = None;
        if let Some(hour) = self.hour_wheel.run_deferred() {
            self.apply_hour(&hour);
            emitted = Some(self.emit());
        }
        if let Some(minute) = self.minute_wheel.run_deferred() {
            self.minute = minute.value;
            emitted = Some(self.emit());
        }
        emitted
    }

    pub fn is_animating(&self) -> bool {
        self.hour_wheel.is_scrolling()
            || self.minute_wheel.is_scrolling()
            || self.hour_wheel.pending_task().is_some()
            || self.minute_wheel.pending_task().is_some()
    }

    pub fn selection(&self) -> Selection {
        Selection::new(self.hour, self.minute)
    }

    pub fn hour(&self) -> u32 {
        self.hour
    }

    pub fn minute(&self) -> u32 {
        self.minute
    }

    pub fn min_time(&self) -> ClockTime {
        self.min_time
    }

    /// Minimum currently enforced by the minute wheel.
    pub fn minute_min(&self) -> u32 {
        self.minute_min
    }

    pub fn focus(&self) -> WheelSlot {
        self.focus
    }

    pub fn set_focus(&mut self, slot: WheelSlot) {
        self.focus = slot;
    }

    pub fn focus_next(&mut self) {
        self.focus = self.focus.other();
    }

    pub fn wheel(&self, slot: WheelSlot) -> &Wheel {
        match slot {
            WheelSlot::Hour => &self.hour_wheel,
            WheelSlot::Minute => &self.minute_wheel,
        }
    }

    pub fn wheel_mut(&mut self, slot: WheelSlot) -> &mut Wheel {
        match slot {
            WheelSlot::Hour => &mut self.hour_wheel,
            WheelSlot::Minute => &mut self.minute_wheel,
        }
    }

    pub fn focused_wheel_mut(&mut self) -> &mut Wheel {
        self.wheel_mut(self.focus)
    }

    fn apply_hour(&mut self, selection: &WheelSelection) {
        self.hour = selection.value;
        if selection.value > self.min_time.hour && self.minute_min != 0 {
            debug!(
                hour = selection.value,
                min_hour = self.min_time.hour,
                "hour passed the minimum, releasing minute minimum"
            );
            self.minute_min = 0;
            self.minute_wheel.set_min_value(0);
        }
    }

    fn emit(&mut self) -> Selection {
        let selection = Selection::new(self.hour, self.minute);
        for callback in &mut self.on_selected {
            callback(selection.hour, selection.minute);
        }
        for callback in &mut self.on_selected_strings {
            callback(&selection.hour_label, &selection.minute_label);
        }
        selection
    }
}

/// Start values shown by each wheel. The minute minimum only pulls the start
/// minute up while the start hour is not past the minimum hour.
fn initial_values(start_time: ClockTime, min_time: ClockTime) -> (u32, u32) {
    let hour = start_time.hour.max(min_time.hour);
    let minute = if hour > min_time.hour {
        start_time.minute
    } else {
        start_time.minute.max(min_time.minute)
    };
    (hour, minute)
}

#[cfg(test)]
mod tests {
    use std::{cell::RefCell, rc::Rc};

    use super::*;

    const FRAME: Duration = Duration::from_millis(16);

    fn run_until_idle(picker: &mut TimePicker) -> Vec<Selection> {
        let mut emitted = Vec::new();
        for _ in 0..600 {
            emitted.extend(picker.frame(FRAME));
            if !picker.is_animating() {
                emitted.extend(picker.frame(FRAME));
                return emitted;
            }
        }
        panic!("picker never settled");
    }

    #[test]
    fn mount_emits_one_event_to_both_callbacks() {
        let ints = Rc::new(RefCell::new(Vec::new()));
        let strings = Rc::new(RefCell::new(Vec::new()));
        let ints_sink = Rc::clone(&ints);
        let strings_sink = Rc::clone(&strings);
        let mut picker = TimePicker::new(ClockTime::MIDNIGHT, ClockTime::MIDNIGHT)
            .with_on_selected(move |h, m| ints_sink.borrow_mut().push((h, m)))
            .with_on_selected_strings(move |h, m| {
                strings_sink.borrow_mut().push(format!("{h}:{m}"))
            });

        picker.mount();
        assert_eq!(*ints.borrow(), vec![(0, 0)]);
        assert_eq!(*strings.borrow(), vec!["00:00".to_string()]);

        picker.frame(FRAME);
        assert_eq!(ints.borrow().len(), 1, "idle frames emit nothing");
    }

    #[test]
    fn start_below_minimum_opens_on_minimum() {
        let mut picker = TimePicker::new(ClockTime::new(7, 0), ClockTime::new(8, 29));
        let selection = picker.mount();
        assert_eq!(selection.formatted, "08:29");
        assert_eq!(picker.minute_min(), 29);
        assert_eq!(picker.wheel(WheelSlot::Minute).min_value(), 29);
    }

    #[test]
    fn hour_past_minimum_releases_minutes_once() {
        let mut picker = TimePicker::new(ClockTime::new(7, 0), ClockTime::new(8, 29));
        picker.mount();

        picker.wheel_mut(WheelSlot::Hour).step(1);
        run_until_idle(&mut picker);
        assert_eq!(picker.hour(), 9);
        assert_eq!(picker.minute_min(), 0);

        picker.wheel_mut(WheelSlot::Hour).step(-1);
        run_until_idle(&mut picker);
        assert_eq!(picker.hour(), 8);
        assert_eq!(picker.minute_min(), 0, "minimum stays released");

        picker.wheel_mut(WheelSlot::Minute).step(-10);
        let emitted = run_until_idle(&mut picker);
        assert_eq!(picker.minute(), 19);
        assert!(emitted.iter().any(|s| s.minute == 19));
    }

    #[test]
    fn minutes_below_minimum_bounce_without_events() {
        let minutes = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&minutes);
        let mut picker = TimePicker::new(ClockTime::new(7, 0), ClockTime::new(8, 29))
            .with_on_selected(move |_, m| sink.borrow_mut().push(m));
        picker.mount();

        picker.wheel_mut(WheelSlot::Minute).step(-4);
        run_until_idle(&mut picker);
        assert!(minutes.borrow().iter().all(|m| *m >= 29));
        assert_eq!(picker.minute(), 29);
        let centered = picker.wheel(WheelSlot::Minute).centered_item().unwrap();
        assert_eq!(centered.value, 29);
    }

    #[test]
    fn start_after_minimum_hour_keeps_start_minute() {
        let mut picker = TimePicker::new(ClockTime::new(10, 5), ClockTime::new(8, 29));
        let selection = picker.mount();
        assert_eq!(selection.formatted, "10:05");
        assert_eq!(picker.minute_min(), 0);
    }

    #[test]
    fn set_start_time_recenters_through_deferred_tasks() {
        let mut picker = TimePicker::new(ClockTime::new(6, 15), ClockTime::MIDNIGHT);
        picker.mount();
        picker.set_start_time(ClockTime::new(18, 45));
        assert_eq!(picker.hour(), 6);
        picker.frame(FRAME);
        assert_eq!(picker.selection().formatted, "18:45");
    }

    #[test]
    fn focus_toggles_between_wheels() {
        let mut picker = TimePicker::new(ClockTime::MIDNIGHT, ClockTime::MIDNIGHT);
        assert_eq!(picker.focus(), WheelSlot::Hour);
        picker.focus_next();
        assert_eq!(picker.focus(), WheelSlot::Minute);
        assert_eq!(picker.focused_wheel_mut().name(), "minute");
    }
}
