use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::{domain::ClockTime, presentation::view::UiContext};

const DEFAULT_TITLE: &str = "Select time";

/// Title on the first line, live selection preview on the second.
pub fn render_header(frame: &mut Frame<'_>, area: Rect, ctx: &UiContext<'_>) {
    let title = Line::from(Span::styled(
        ctx.title.unwrap_or(DEFAULT_TITLE),
        Style::default()
            .fg(ctx.palette.foreground)
            .add_modifier(Modifier::BOLD),
    ))
    .centered();

    let selection = ctx.picker.selection();
    let mut spans = vec![Span::styled(
        selection.formatted,
        Style::default()
            .fg(ctx.palette.accent)
            .add_modifier(Modifier::BOLD),
    )];
    let min_time = ctx.picker.min_time();
    if min_time != ClockTime::MIDNIGHT {
        spans.push(Span::styled(
            format!("  (earliest {min_time})"),
            Style::default().fg(ctx.palette.muted),
        ));
    }

    let header = Paragraph::new(vec![title, Line::from(spans).centered()])
        .style(Style::default().bg(ctx.palette.background));
    frame.render_widget(header, area);
}
