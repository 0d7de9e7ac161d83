use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    widgets::Block,
};

use crate::picker::TimePicker;

use super::{
    components::{render_footer, render_header, render_picker},
    theme::WheelPalette,
};

pub struct UiContext<'a> {
    pub picker: &'a TimePicker,
    pub palette: &'a WheelPalette,
    pub title: Option<&'a str>,
    pub status_message: &'a str,
    pub help: Option<&'a str>,
}

/// Draws the whole screen and returns the hour and minute wheel areas.
pub fn draw(frame: &mut Frame<'_>, ctx: UiContext<'_>) -> [Rect; 2] {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),
            Constraint::Min(7),
            Constraint::Length(4),
        ])
        .split(frame.area());

    render_header(frame, chunks[0], &ctx);
    let body = chunks[1];
    frame.render_widget(
        Block::default().style(Style::default().bg(ctx.palette.background)),
        body,
    );
    let wheels = render_picker(frame, body, ctx.picker, ctx.palette);
    render_footer(frame, chunks[2], &ctx);
    wheels
}
