mod format;
mod input;
mod output;

pub use format::DocumentFormat;
pub use input::{PickerSettings, Theme, parse_document_str, settings_from_str};
pub use output::{OutputDestination, OutputOptions, emit, emit_selection};
