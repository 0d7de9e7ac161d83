/// Maps an unbounded virtual index onto `0..len`.
pub fn real_index(virtual_index: i64, len: usize) -> usize {
    virtual_index.rem_euclid(len.max(1) as i64) as usize
}

/// Scroll position of a wheel: the virtual index of the row at the top of
/// the viewport plus how far the viewport has moved past that row's top edge.
///
/// `scroll_offset` always stays in `0.0..row_height`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollPosition {
    pub logical_index: i64,
    pub scroll_offset: f32,
}

impl ScrollPosition {
    pub fn at_item(logical_index: i64) -> Self {
        Self {
            logical_index,
            scroll_offset: 0.0,
        }
    }

    /// Moves the position by `delta` layout units; positive scrolls towards
    /// higher indices.
    pub fn offset_by(self, delta: f32, row_height: f32) -> Self {
        let raw = self.scroll_offset + delta;
        let rows = (raw / row_height).floor();
        let mut scroll_offset = raw - rows * row_height;
        let mut logical_index = self.logical_index + rows as i64;
        // Guards float residue such as `row_height - f32::EPSILON` rounding up.
        if scroll_offset >= row_height {
            scroll_offset -= row_height;
            logical_index += 1;
        }
        Self {
            logical_index,
            scroll_offset: scroll_offset.max(0.0),
        }
    }

    /// Signed distance from `origin` to `self` in layout units.
    pub fn distance_from(&self, origin: &ScrollPosition, row_height: f32) -> f64 {
        let rows = (self.logical_index - origin.logical_index) as f64;
        rows * row_height as f64 + (self.scroll_offset - origin.scroll_offset) as f64
    }

    /// Nearest row-aligned position.
    pub fn nearest_item(&self, row_height: f32) -> i64 {
        if self.scroll_offset >= row_height / 2.0 {
            self.logical_index + 1
        } else {
            self.logical_index
        }
    }

    pub fn is_aligned(&self) -> bool {
        self.scroll_offset == 0.0
    }
}
