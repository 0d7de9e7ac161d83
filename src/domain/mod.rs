mod format;
mod range;
mod time;

pub use format::format_value;
pub use range::ValueRange;
pub use time::{ClockTime, Selection};
