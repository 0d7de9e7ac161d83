//! Infinite, snapping value wheel.
//!
//! A [`Wheel`] shows `format_value(v)` for every `v` of a [`ValueRange`] as a
//! circular list. Virtual indices are unbounded `i64`s and wrap onto the range
//! with [`real_index`], so the wheel can be scrolled in either direction for
//! as long as the user likes.
//!
//! The owner drives a wheel in three steps per frame:
//!
//! 1. feed input (`step`, `drag_by`, `release`) and advance animation (`tick`),
//! 2. run [`Wheel::layout_pass`] to detect the centered row and commit it,
//! 3. drain the deferred re-scroll slot with [`Wheel::run_deferred`].

mod geometry;
mod position;
mod scroll;
mod tasks;
pub mod transform;

use std::time::Duration;

use tracing::{debug, trace};

use crate::domain::{ValueRange, format_value};

pub use geometry::{DEFAULT_ROW_HEIGHT, DEFAULT_VISIBLE_ITEMS, WheelGeometry};
pub use position::{ScrollPosition, real_index};
pub use scroll::{ScrollController, ScrollPhase};
pub use tasks::{DeferredScroll, ScrollReason, ScrollTask};
pub use transform::ItemVisual;

#[derive(Debug, Clone)]
pub struct WheelConfig {
    /// Short name used in log records.
    pub name: &'static str,
    pub range: ValueRange,
    pub initial_value: u32,
    /// Values below this are rendered muted and can never be committed.
    pub min_value: u32,
    pub geometry: WheelGeometry,
}

impl WheelConfig {
    pub fn new(name: &'static str, range: ValueRange) -> Self {
        Self {
            name,
            range,
            initial_value: range.lo(),
            min_value: 0,
            geometry: WheelGeometry::default(),
        }
    }

    pub fn with_initial_value(mut self, value: u32) -> Self {
        self.initial_value = value;
        self
    }

    pub fn with_min_value(mut self, value: u32) -> Self {
        self.min_value = value;
        self
    }

    pub fn with_geometry(mut self, geometry: WheelGeometry) -> Self {
        self.geometry = geometry;
        self
    }
}

/// One visible row as produced by a layout pass.
#[derive(Debug, Clone, PartialEq)]
pub struct ItemLayout {
    pub virtual_index: i64,
    pub value: u32,
    pub label: String,
    /// Top edge relative to the viewport top, in layout units.
    pub top: f32,
    /// Signed offset of the row center from the viewport center.
    pub distance: f32,
    pub visual: ItemVisual,
    pub centered: bool,
    pub muted: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WheelSelection {
    pub value: u32,
    pub label: String,
}

#[derive(Debug, Clone)]
pub struct Wheel {
    name: &'static str,
    range: ValueRange,
    geometry: WheelGeometry,
    labels: Vec<String>,
    initial_value: u32,
    min_value: u32,
    scroll: ScrollController,
    deferred: DeferredScroll,
    last_selected: Option<u32>,
    settled_center: i64,
}

impl Wheel {
    pub fn new(config: WheelConfig) -> Self {
        let WheelConfig {
            name,
            range,
            initial_value,
            min_value,
            geometry,
        } = config;
        let labels = (range.lo()..=range.hi()).map(format_value).collect();
        let initial_value = range.clamp(initial_value);
        let start_center = range.index_of(initial_value) as i64;
        let scroll = ScrollController::new(
            start_center - geometry.center_slot(),
            geometry.row_height,
        );
        Self {
            name,
            range,
            geometry,
            labels,
            initial_value,
            min_value,
            scroll,
            deferred: DeferredScroll::default(),
            last_selected: None,
            settled_center: start_center,
        }
    }

    /// Centers the initial value and commits it without user interaction.
    pub fn mount(&mut self) -> WheelSelection {
        let center = self.start_center();
        self.scroll
            .scroll_to_item(center - self.geometry.center_slot());
        self.settled_center = center;
        self.commit(self.initial_value)
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn range(&self) -> ValueRange {
        self.range
    }

    pub fn geometry(&self) -> WheelGeometry {
        self.geometry
    }

    pub fn initial_value(&self) -> u32 {
        self.initial_value
    }

    pub fn min_value(&self) -> u32 {
        self.min_value
    }

    /// Last committed value.
    pub fn selected_value(&self) -> Option<u32> {
        self.last_selected
    }

    pub fn position(&self) -> ScrollPosition {
        self.scroll.position()
    }

    pub fn phase(&self) -> ScrollPhase {
        self.scroll.phase()
    }

    pub fn is_scrolling(&self) -> bool {
        self.scroll.is_scrolling()
    }

    pub fn pending_task(&self) -> Option<&ScrollTask> {
        self.deferred.pending()
    }

    /// Whether `value` satisfies the current minimum. A minimum above the
    /// range maximum leaves nothing selectable.
    pub fn accepts(&self, value: u32) -> bool {
        self.min_value == 0 || value >= self.min_value
    }

    pub fn set_min_value(&mut self, min_value: u32) {
        if self.min_value != min_value {
            debug!(
                wheel = self.name,
                from = self.min_value,
                to = min_value,
                "minimum changed"
            );
            self.min_value = min_value;
        }
    }

    /// Replaces the initial value. The wheel re-centers on it through the
    /// deferred slot and commits it once the task runs.
    pub fn set_initial_value(&mut self, value: u32) {
        let value = self.range.clamp(value);
        if value == self.initial_value {
            return;
        }
        self.initial_value = value;
        self.deferred.schedule(ScrollTask {
            center_index: self.start_center(),
            reason: ScrollReason::Reinitialize,
        });
    }

    /// Schedules a re-center on the initial value even when it is unchanged.
    pub fn recenter(&mut self) {
        self.deferred.schedule(ScrollTask {
            center_index: self.start_center(),
            reason: ScrollReason::Reinitialize,
        });
    }

    pub fn step(&mut self, items: i64) {
        self.scroll.step(items);
    }

    pub fn begin_drag(&mut self) {
        self.scroll.begin_drag();
    }

    /// Free scroll by `delta` layout units; positive moves towards higher
    /// values.
    pub fn drag_by(&mut self, delta: f32) {
        self.scroll.drag_by(delta);
    }

    pub fn release(&mut self, velocity: f32) {
        self.scroll.release(velocity);
    }

    /// Advances the settle animation; `true` when the wheel just came to rest.
    pub fn tick(&mut self, elapsed: Duration) -> bool {
        let settled = self.scroll.tick(elapsed);
        if settled {
            trace!(wheel = self.name, position = ?self.scroll.position(), "settled");
        }
        settled
    }

    /// Rows currently intersecting the viewport, top to bottom.
    pub fn visible_items(&self) -> Vec<ItemLayout> {
        let position = self.scroll.position();
        let row = self.geometry.row_height;
        let half_row = self.geometry.half_row();
        let center = self.geometry.viewport_center();
        let count = if position.is_aligned() {
            self.geometry.visible_items
        } else {
            self.geometry.visible_items + 1
        };

        (0..count)
            .map(|slot| {
                let virtual_index = position.logical_index + slot as i64;
                let real = real_index(virtual_index, self.range.len());
                let value = self.range.value_at(real);
                let top = slot as f32 * row - position.scroll_offset;
                let distance = top + half_row - center;
                ItemLayout {
                    virtual_index,
                    value,
                    label: self.labels[real].clone(),
                    top,
                    distance,
                    visual: ItemVisual::at(distance, center),
                    centered: (-half_row..half_row).contains(&distance),
                    muted: value < self.min_value,
                }
            })
            .collect()
    }

    pub fn centered_item(&self) -> Option<ItemLayout> {
        self.visible_items().into_iter().find(|item| item.centered)
    }

    /// Detects the centered row and commits it when it changed.
    ///
    /// Rows passing the center mid-scroll are committed too. A centered value
    /// below the minimum is never committed; once the wheel is at rest a
    /// bounce back to the last settled row is scheduled.
    pub fn layout_pass(&mut self) -> Option<WheelSelection> {
        let centered = self.centered_item()?;
        let at_rest = !self.scroll.is_scrolling();
        if self.accepts(centered.value) {
            if at_rest {
                self.settled_center = centered.virtual_index;
            }
            if self.last_selected == Some(centered.value) {
                return None;
            }
            return Some(self.commit(centered.value));
        }
        if self.last_selected == Some(centered.value) {
            return None;
        }
        if at_rest {
            debug!(
                wheel = self.name,
                value = centered.value,
                min = self.min_value,
                "rejecting value below minimum"
            );
            self.deferred.schedule(ScrollTask {
                center_index: self.settled_center,
                reason: ScrollReason::BounceBack,
            });
        }
        None
    }

    /// Runs the pending deferred re-scroll, if any.
    pub fn run_deferred(&mut self) -> Option<WheelSelection> {
        let task = self.deferred.take()?;
        debug!(wheel = self.name, ?task, "running deferred scroll");
        self.scroll
            .scroll_to_item(task.center_index - self.geometry.center_slot());
        match task.reason {
            ScrollReason::BounceBack => None,
            ScrollReason::Reinitialize => {
                self.settled_center = task.center_index;
                Some(self.commit(self.initial_value))
            }
        }
    }

    fn start_center(&self) -> i64 {
        self.range.index_of(self.initial_value) as i64
    }

    fn commit(&mut self, value: u32) -> WheelSelection {
        debug!(wheel = self.name, value, "selection committed");
        self.last_selected = Some(value);
        WheelSelection {
            value,
            label: format_value(value),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FRAME: Duration = Duration::from_millis(16);

    fn minutes(initial: u32, min: u32) -> Wheel {
        Wheel::new(
            WheelConfig::new("minute", ValueRange::MINUTES)
                .with_initial_value(initial)
                .with_min_value(min),
        )
    }

    fn settle(wheel: &mut Wheel) -> Vec<WheelSelection> {
        let mut commits = Vec::new();
        for _ in 0..600 {
            let settled = wheel.tick(FRAME);
            commits.extend(wheel.layout_pass());
            commits.extend(wheel.run_deferred());
            if settled || !wheel.is_scrolling() {
                commits.extend(wheel.layout_pass());
                commits.extend(wheel.run_deferred());
                return commits;
            }
        }
        panic!("wheel never settled");
    }

    #[test]
    fn mount_centers_and_commits_initial_value() {
        let mut wheel = minutes(0, 0);
        let selection = wheel.mount();
        assert_eq!(
            selection,
            WheelSelection {
                value: 0,
                label: "00".into()
            }
        );
        let centered = wheel.centered_item().expect("centered row");
        assert_eq!(centered.value, 0);
        assert_eq!(centered.distance, 0.0);
        assert_eq!(wheel.layout_pass(), None, "no duplicate after mount");
    }

    #[test]
    fn visible_rows_wrap_around_the_range() {
        let mut wheel = minutes(0, 0);
        wheel.mount();
        let values: Vec<u32> = wheel.visible_items().iter().map(|item| item.value).collect();
        assert_eq!(values, vec![58, 59, 0, 1, 2]);
    }

    #[test]
    fn exactly_one_row_is_centered_mid_scroll() {
        let mut wheel = minutes(10, 0);
        wheel.mount();
        for delta in [5.0, 20.0, 12.5, 30.0, 40.0] {
            wheel.drag_by(delta);
            let centered = wheel.visible_items().iter().filter(|i| i.centered).count();
            assert_eq!(centered, 1);
        }
    }

    #[test]
    fn rows_fade_away_from_center() {
        let mut wheel = minutes(30, 0);
        wheel.mount();
        let items = wheel.visible_items();
        assert_eq!(items[2].visual, ItemVisual::NEUTRAL);
        assert!(items[0].visual.opacity < items[1].visual.opacity);
        assert!(items[0].visual.rotation_x < 0.0);
        assert!(items[4].visual.rotation_x > 0.0);
    }

    #[test]
    fn stepping_commits_the_new_value_once() {
        let mut wheel = minutes(10, 0);
        wheel.mount();
        wheel.step(2);
        let commits = settle(&mut wheel);
        assert_eq!(commits.last().map(|s| s.value), Some(12));
        assert_eq!(
            commits.iter().filter(|s| s.value == 12).count(),
            1,
            "settled value committed once"
        );
        assert_eq!(wheel.selected_value(), Some(12));
    }

    #[test]
    fn settling_below_minimum_bounces_back() {
        let mut wheel = minutes(29, 29);
        wheel.mount();
        wheel.step(-3);
        let commits = settle(&mut wheel);
        assert!(
            commits.iter().all(|s| s.value >= 29),
            "below-minimum values never commit: {commits:?}"
        );
        // The bounce is scheduled on the pass after the settle and has already run.
        assert_eq!(wheel.centered_item().map(|i| i.value), Some(29));
        assert!(wheel.pending_task().is_none());
        assert_eq!(wheel.layout_pass(), None);
    }

    #[test]
    fn bounce_returns_to_prior_settled_value() {
        let mut wheel = minutes(29, 29);
        wheel.mount();
        wheel.step(5);
        settle(&mut wheel);
        assert_eq!(wheel.selected_value(), Some(34));
        wheel.step(-10);
        settle(&mut wheel);
        assert_eq!(wheel.centered_item().map(|i| i.value), Some(34));
    }

    #[test]
    fn below_minimum_while_scrolling_is_ignored() {
        let mut wheel = minutes(29, 29);
        wheel.mount();
        wheel.begin_drag();
        wheel.drag_by(-65.0);
        assert_eq!(wheel.centered_item().map(|i| i.value), Some(28));
        assert_eq!(wheel.layout_pass(), None);
        assert!(wheel.pending_task().is_none(), "no bounce mid-drag");
    }

    #[test]
    fn muted_rows_track_the_minimum() {
        let mut wheel = minutes(29, 29);
        wheel.mount();
        let muted: Vec<bool> = wheel.visible_items().iter().map(|i| i.muted).collect();
        assert_eq!(muted, vec![true, true, false, false, false]);
        wheel.set_min_value(0);
        assert!(wheel.visible_items().iter().all(|i| !i.muted));
    }

    #[test]
    fn minimum_above_range_selects_nothing_new() {
        let mut wheel = Wheel::new(
            WheelConfig::new("hour", ValueRange::HOURS)
                .with_initial_value(30)
                .with_min_value(40),
        );
        assert_eq!(wheel.mount().value, 23);
        wheel.step(2);
        let commits = settle(&mut wheel);
        assert!(commits.is_empty());
        assert_eq!(wheel.centered_item().map(|i| i.value), Some(23));
    }

    #[test]
    fn reinitialize_runs_deferred() {
        let mut wheel = minutes(5, 0);
        wheel.mount();
        wheel.set_initial_value(45);
        assert_eq!(wheel.centered_item().map(|i| i.value), Some(5));
        let selection = wheel.run_deferred().expect("reinitialize commits");
        assert_eq!(selection.value, 45);
        assert_eq!(wheel.centered_item().map(|i| i.value), Some(45));
    }

    #[test]
    fn long_sessions_never_run_out_of_indices() {
        let mut wheel = minutes(0, 0);
        wheel.mount();
        wheel.drag_by(-65.0 * 1_000_000.0);
        wheel.release(0.0);
        settle(&mut wheel);
        assert_eq!(wheel.centered_item().map(|i| i.value), Some(20));
    }
}
