pub(crate) mod input;
pub(crate) mod keymap;
mod options;
mod runtime;
mod status;
mod terminal;
mod time_picker_ui;

pub use input::KeyAction;
pub use options::UiOptions;
pub use time_picker_ui::TimePickerUI;
