use std::{sync::Arc, time::Duration};

use ratatui::style::Color;

use super::keymap::{self, KeymapStore};
use crate::{presentation::WheelPalette, wheel::WheelGeometry};

#[derive(Clone)]
pub struct UiOptions {
    /// Poll timeout while both wheels are at rest.
    pub tick_rate: Duration,
    /// Poll timeout while a wheel is animating.
    pub frame_interval: Duration,
    pub show_help: bool,
    pub palette: WheelPalette,
    pub geometry: WheelGeometry,
    pub(crate) keymap_store: Arc<KeymapStore>,
}

impl Default for UiOptions {
    fn default() -> Self {
        Self {
            tick_rate: Duration::from_millis(250),
            frame_interval: Duration::from_millis(16),
            show_help: true,
            palette: WheelPalette::default(),
            geometry: WheelGeometry::default(),
            keymap_store: keymap::default_store(),
        }
    }
}

impl std::fmt::Debug for UiOptions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UiOptions")
            .field("tick_rate", &self.tick_rate)
            .field("frame_interval", &self.frame_interval)
            .field("show_help", &self.show_help)
            .field("palette", &self.palette)
            .field("geometry", &self.geometry)
            .finish_non_exhaustive()
    }
}

impl UiOptions {
    pub fn with_help(mut self, show: bool) -> Self {
        self.show_help = show;
        self
    }

    pub fn with_tick_rate(mut self, tick_rate: Duration) -> Self {
        self.tick_rate = tick_rate;
        self
    }

    pub fn with_frame_interval(mut self, frame_interval: Duration) -> Self {
        self.frame_interval = frame_interval.max(Duration::from_millis(1));
        self
    }

    pub fn with_palette(mut self, palette: WheelPalette) -> Self {
        self.palette = palette;
        self
    }

    pub fn with_line_color(mut self, color: Color) -> Self {
        self.palette = self.palette.with_line_color(color);
        self
    }

    pub fn with_geometry(mut self, geometry: WheelGeometry) -> Self {
        self.geometry = geometry;
        self
    }

    /// Replaces the built-in key bindings with a JSON keymap in the same
    /// format as `keymap/default.keymap.json`.
    pub fn with_keymap_json(mut self, source: &str) -> anyhow::Result<Self> {
        self.keymap_store = Arc::new(KeymapStore::from_json(source)?);
        Ok(self)
    }
}
