use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::Line,
    widgets::Paragraph,
};

use crate::{
    picker::{TimePicker, WheelSlot},
    presentation::theme::WheelPalette,
};

use super::{
    layout::centered_rect,
    wheel::{WheelView, wheel_height},
};

const WHEEL_WIDTH: u16 = 8;
const SEPARATOR_WIDTH: u16 = 3;

/// Size of the hour/minute block, excluding surrounding padding.
pub fn picker_size(picker: &TimePicker) -> (u16, u16) {
    let geometry = picker.wheel(WheelSlot::Hour).geometry();
    (WHEEL_WIDTH * 2 + SEPARATOR_WIDTH, wheel_height(&geometry))
}

/// Lays out both wheels side by side with a ":" between them and returns the
/// screen area of each wheel for mouse hit-testing.
pub fn render_picker(
    frame: &mut Frame<'_>,
    area: Rect,
    picker: &TimePicker,
    palette: &WheelPalette,
) -> [Rect; 2] {
    let (width, height) = picker_size(picker);
    let block = centered_rect(area, width, height);
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(WHEEL_WIDTH),
            Constraint::Length(SEPARATOR_WIDTH),
            Constraint::Length(WHEEL_WIDTH),
        ])
        .split(block);

    for (slot, column) in [(WheelSlot::Hour, columns[0]), (WheelSlot::Minute, columns[2])] {
        let wheel = picker.wheel(slot);
        let items = wheel.visible_items();
        frame.render_widget(
            WheelView::new(&items, wheel.geometry(), palette).focused(picker.focus() == slot),
            column,
        );
    }

    let center = picker.wheel(WheelSlot::Hour).geometry().center_slot() as u16 + 1;
    let separator_area = Rect {
        y: columns[1].y + center.min(columns[1].height.saturating_sub(1)),
        height: 1.min(columns[1].height),
        ..columns[1]
    };
    let separator = Paragraph::new(Line::from(":").centered()).style(
        Style::default()
            .fg(palette.foreground)
            .bg(palette.background)
            .add_modifier(Modifier::BOLD),
    );
    frame.render_widget(separator, separator_area);

    [columns[0], columns[2]]
}
