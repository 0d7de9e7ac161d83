mod footer;
mod header;
mod layout;
mod picker;
mod wheel;

pub use footer::render_footer;
pub use header::render_header;
pub use layout::centered_rect;
pub use picker::{picker_size, render_picker};
pub use wheel::{WheelView, item_style, screen_line, wheel_height};
