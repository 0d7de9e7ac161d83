mod components;
mod theme;
mod view;

pub use components::{
    WheelView, centered_rect, item_style, picker_size, render_picker, screen_line, wheel_height,
};
pub use theme::{WheelPalette, blend, parse_color};
pub use view::{UiContext, draw};
