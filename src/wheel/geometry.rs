/// Row height used when no geometry is supplied, in layout units.
pub const DEFAULT_ROW_HEIGHT: f32 = 65.0;
/// Number of fully visible rows in a wheel viewport.
pub const DEFAULT_VISIBLE_ITEMS: usize = 5;

/// Fixed-row layout of a wheel viewport.
///
/// All distances are expressed in abstract layout units; the renderer maps
/// one row to one terminal line.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WheelGeometry {
    pub row_height: f32,
    pub visible_items: usize,
}

impl Default for WheelGeometry {
    fn default() -> Self {
        Self {
            row_height: DEFAULT_ROW_HEIGHT,
            visible_items: DEFAULT_VISIBLE_ITEMS,
        }
    }
}

impl WheelGeometry {
    /// Builds a geometry, forcing an odd, non-zero row count so a single row
    /// sits on the viewport center.
    pub fn new(row_height: f32, visible_items: usize) -> Self {
        let row_height = if row_height.is_finite() && row_height > 0.0 {
            row_height
        } else {
            DEFAULT_ROW_HEIGHT
        };
        let visible_items = visible_items.max(1) | 1;
        Self {
            row_height,
            visible_items,
        }
    }

    pub fn viewport_height(&self) -> f32 {
        self.row_height * self.visible_items as f32
    }

    pub fn viewport_center(&self) -> f32 {
        self.viewport_height() / 2.0
    }

    pub fn half_row(&self) -> f32 {
        self.row_height / 2.0
    }

    /// Rows between the top of the viewport and the centered row.
    pub fn center_slot(&self) -> i64 {
        (self.visible_items / 2) as i64
    }
}
