#![deny(rust_2018_idioms)]

mod app;
mod domain;
mod io;
pub mod picker;
pub mod presentation;
pub mod wheel;

pub use app::{KeyAction, TimePickerUI, UiOptions};
pub use domain::{ClockTime, Selection, ValueRange, format_value};
pub use io::{
    DocumentFormat, OutputDestination, OutputOptions, PickerSettings, Theme, emit, emit_selection,
    parse_document_str, settings_from_str,
};
pub use picker::{TimePicker, WheelSlot};
pub use presentation::{WheelPalette, parse_color};
pub use wheel::{ItemLayout, ItemVisual, Wheel, WheelConfig, WheelGeometry};

pub mod prelude {
    pub use super::{
        ClockTime, DocumentFormat, OutputOptions, Selection, TimePicker, TimePickerUI, UiOptions,
        WheelPalette,
    };
}
