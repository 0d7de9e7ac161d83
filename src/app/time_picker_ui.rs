use anyhow::Result;
use ratatui::style::Color;

use crate::{
    domain::{ClockTime, Selection},
    picker::TimePicker,
};

use super::{options::UiOptions, runtime::App};

/// Interactive terminal time picker.
///
/// ```no_run
/// use timewheel::{ClockTime, TimePickerUI};
///
/// let selection = TimePickerUI::new(ClockTime::new(7, 0))
///     .with_min_time(ClockTime::new(8, 29))
///     .on_selected_strings(|hour, minute| eprintln!("{hour}:{minute}"))
///     .run()?;
/// println!("{}", selection.formatted);
/// # Ok::<(), anyhow::Error>(())
/// ```
pub struct TimePickerUI {
    start_time: ClockTime,
    min_time: ClockTime,
    title: Option<String>,
    options: UiOptions,
    on_selected: Vec<Box<dyn FnMut(u32, u32)>>,
    on_selected_strings: Vec<Box<dyn FnMut(&str, &str)>>,
}

impl TimePickerUI {
    pub fn new(start_time: ClockTime) -> Self {
        Self {
            start_time,
            min_time: ClockTime::MIDNIGHT,
            title: None,
            options: UiOptions::default(),
            on_selected: Vec::new(),
            on_selected_strings: Vec::new(),
        }
    }

    pub fn with_min_time(mut self, min_time: ClockTime) -> Self {
        self.min_time = min_time;
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_line_color(mut self, color: Color) -> Self {
        self.options = self.options.with_line_color(color);
        self
    }

    pub fn with_options(mut self, options: UiOptions) -> Self {
        self.options = options;
        self
    }

    pub fn on_selected(mut self, callback: impl FnMut(u32, u32) + 'static) -> Self {
        self.on_selected.push(Box::new(callback));
        self
    }

    pub fn on_selected_strings(mut self, callback: impl FnMut(&str, &str) + 'static) -> Self {
        self.on_selected_strings.push(Box::new(callback));
        self
    }

    /// Runs the picker until the user confirms (returning the selection) or
    /// quits (returning an error).
    pub fn run(self) -> Result<Selection> {
        let TimePickerUI {
            start_time,
            min_time,
            title,
            options,
            on_selected,
            on_selected_strings,
        } = self;

        let mut picker = TimePicker::with_geometry(start_time, min_time, options.geometry);
        for callback in on_selected {
            picker = picker.with_on_selected(callback);
        }
        for callback in on_selected_strings {
            picker = picker.with_on_selected_strings(callback);
        }

        let mut app = App::new(picker, options, title);
        app.run()
    }
}
