//! Distance-driven visual transform for wheel rows.
//!
//! Every visible row is scaled, faded and tilted according to how far its
//! center sits from the viewport center. Rows outside the visible window get
//! [`ItemVisual::NEUTRAL`].

const SCALE_FALLOFF: f32 = 0.5;
const OPACITY_FALLOFF: f32 = 0.7;
const ROTATION_DIVISOR: f32 = 3.0;

/// Lower bound for scale and opacity so extreme viewport ratios never
/// produce inverted or negative transforms.
pub const MIN_VISUAL: f32 = 0.05;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ItemVisual {
    pub scale: f32,
    pub opacity: f32,
    /// Tilt around the horizontal axis, in degrees. Rows above center are
    /// negative, rows below are positive.
    pub rotation_x: f32,
}

impl ItemVisual {
    pub const NEUTRAL: ItemVisual = ItemVisual {
        scale: 1.0,
        opacity: 1.0,
        rotation_x: 0.0,
    };

    pub fn at(distance: f32, max_distance: f32) -> Self {
        Self {
            scale: scale(distance, max_distance),
            opacity: opacity(distance, max_distance),
            rotation_x: rotation_x(distance),
        }
    }
}

pub fn scale(distance: f32, max_distance: f32) -> f32 {
    falloff(distance, max_distance, SCALE_FALLOFF)
}

pub fn opacity(distance: f32, max_distance: f32) -> f32 {
    falloff(distance, max_distance, OPACITY_FALLOFF)
}

pub fn rotation_x(distance: f32) -> f32 {
    distance / ROTATION_DIVISOR
}

fn falloff(distance: f32, max_distance: f32, coefficient: f32) -> f32 {
    if max_distance <= 0.0 || !max_distance.is_finite() {
        return 1.0;
    }
    (1.0 - (distance.abs() / max_distance) * coefficient).max(MIN_VISUAL)
}
