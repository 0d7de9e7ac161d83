use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    widgets::Widget,
};
use unicode_width::UnicodeWidthStr;

use crate::{
    presentation::theme::{WheelPalette, blend},
    wheel::{ItemLayout, WheelGeometry},
};

const BOLD_SCALE: f32 = 0.9;
const TILTED_DEGREES: f32 = 15.0;
const DIM_OPACITY: f32 = 0.6;

/// Terminal lines taken by a wheel: one per visible row plus the two guides.
pub fn wheel_height(geometry: &WheelGeometry) -> u16 {
    geometry.visible_items as u16 + 2
}

/// Renders one wheel. Each row is drawn into its own scratch buffer before
/// being copied onto the frame, so a row's style never bleeds into the row
/// or guide line next to it.
pub struct WheelView<'a> {
    items: &'a [ItemLayout],
    geometry: WheelGeometry,
    palette: &'a WheelPalette,
    focused: bool,
}

impl<'a> WheelView<'a> {
    pub fn new(
        items: &'a [ItemLayout],
        geometry: WheelGeometry,
        palette: &'a WheelPalette,
    ) -> Self {
        Self {
            items,
            geometry,
            palette,
            focused: false,
        }
    }

    pub fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }
}

impl Widget for WheelView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width == 0 || area.height == 0 {
            return;
        }
        buf.set_style(area, Style::default().bg(self.palette.background));

        let center = self.geometry.center_slot() as u16;
        let guide = if self.focused { "━" } else { "─" };
        let guide_style = Style::default()
            .fg(self.palette.line)
            .bg(self.palette.background);
        for offset in [center, center + 2] {
            if offset < area.height {
                buf.set_stringn(
                    area.x,
                    area.y + offset,
                    guide.repeat(area.width as usize),
                    area.width as usize,
                    guide_style,
                );
            }
        }

        for item in self.items {
            let Some(line) = screen_line(item, &self.geometry) else {
                continue;
            };
            if line >= area.height {
                continue;
            }
            let layer = composite_item(item, area.width, item_style(item, self.palette));
            blit(&layer, buf, area.x, area.y + line);
        }
    }
}

/// Line inside the wheel area for an item, or `None` when it is scrolled out.
pub fn screen_line(item: &ItemLayout, geometry: &WheelGeometry) -> Option<u16> {
    let row = (item.top / geometry.row_height + 0.5).floor() as i64;
    if row < 0 || row >= geometry.visible_items as i64 {
        return None;
    }
    let center = geometry.center_slot();
    let line = match row.cmp(&center) {
        std::cmp::Ordering::Less => row,
        std::cmp::Ordering::Equal => row + 1,
        std::cmp::Ordering::Greater => row + 2,
    };
    Some(line as u16)
}

/// Maps the row transform onto terminal attributes: opacity fades the text
/// into the background, scale decides boldness and a strong tilt italicizes.
pub fn item_style(item: &ItemLayout, palette: &WheelPalette) -> Style {
    let base = if item.muted {
        palette.muted
    } else {
        palette.foreground
    };
    let mut style = Style::default().bg(palette.background);
    style = match blend(base, palette.background, item.visual.opacity) {
        Some(color) => style.fg(color),
        None if item.visual.opacity < DIM_OPACITY => style.fg(base).add_modifier(Modifier::DIM),
        None => style.fg(base),
    };
    if item.visual.scale >= BOLD_SCALE && !item.muted {
        style = style.add_modifier(Modifier::BOLD);
    }
    if item.visual.rotation_x.abs() >= TILTED_DEGREES {
        style = style.add_modifier(Modifier::ITALIC);
    }
    style
}

fn composite_item(item: &ItemLayout, width: u16, style: Style) -> Buffer {
    let mut layer = Buffer::empty(Rect::new(0, 0, width, 1));
    let label_width = item.label.width() as u16;
    let x = width.saturating_sub(label_width) / 2;
    layer.set_stringn(x, 0, &item.label, width as usize, style);
    layer
}

fn blit(layer: &Buffer, target: &mut Buffer, x: u16, y: u16) {
    for column in 0..layer.area.width {
        let Some(source) = layer.cell((column, 0)) else {
            continue;
        };
        if source.symbol() == " " {
            continue;
        }
        if let Some(cell) = target.cell_mut((x + column, y)) {
            cell.set_symbol(source.symbol());
            cell.fg = source.fg;
            cell.bg = source.bg;
            cell.modifier = source.modifier;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        domain::ValueRange,
        wheel::{ItemVisual, Wheel, WheelConfig},
    };
    use ratatui::style::Color;

    fn mounted(initial: u32, min: u32) -> Wheel {
        let mut wheel = Wheel::new(
            WheelConfig::new("minute", ValueRange::MINUTES)
                .with_initial_value(initial)
                .with_min_value(min),
        );
        wheel.mount();
        wheel
    }

    fn line_text(buf: &Buffer, y: u16) -> String {
        (0..buf.area.width)
            .map(|x| buf.cell((x, y)).map(|c| c.symbol()).unwrap_or(" "))
            .collect::<String>()
    }

    #[test]
    fn guides_surround_the_centered_row() {
        let wheel = mounted(30, 0);
        let items = wheel.visible_items();
        let palette = WheelPalette::dark();
        let geometry = wheel.geometry();
        let area = Rect::new(0, 0, 6, wheel_height(&geometry));
        let mut buf = Buffer::empty(area);
        WheelView::new(&items, geometry, &palette).render(area, &mut buf);

        let lines: Vec<String> = (0..area.height).map(|y| line_text(&buf, y)).collect();
        assert_eq!(lines[0].trim(), "28");
        assert_eq!(lines[1].trim(), "29");
        assert_eq!(lines[2], "──────");
        assert_eq!(lines[3].trim(), "30");
        assert_eq!(lines[4], "──────");
        assert_eq!(lines[5].trim(), "31");
        assert_eq!(lines[6].trim(), "32");
    }

    #[test]
    fn centered_row_is_bold_and_opaque() {
        let wheel = mounted(30, 0);
        let palette = WheelPalette::dark();
        let centered = wheel.centered_item().unwrap();
        let style = item_style(&centered, &palette);
        assert_eq!(style.fg, Some(palette.foreground));
        assert!(style.add_modifier.contains(Modifier::BOLD));
        assert!(!style.add_modifier.contains(Modifier::ITALIC));
    }

    #[test]
    fn outer_rows_fade_and_tilt() {
        let wheel = mounted(30, 0);
        let palette = WheelPalette::dark();
        let items = wheel.visible_items();
        let style = item_style(&items[0], &palette);
        assert_ne!(style.fg, Some(palette.foreground));
        assert!(style.add_modifier.contains(Modifier::ITALIC));
        assert!(!style.add_modifier.contains(Modifier::BOLD));
    }

    #[test]
    fn rows_below_minimum_use_muted_color() {
        let wheel = mounted(29, 29);
        let palette = WheelPalette::light();
        let items = wheel.visible_items();
        let muted = item_style(&items[1], &palette);
        let active = item_style(&items[3], &palette);
        assert_ne!(muted.fg, active.fg);
        assert!(items[1].muted && !items[3].muted);
    }

    #[test]
    fn named_colors_fall_back_to_dim() {
        let palette = WheelPalette {
            foreground: Color::White,
            ..WheelPalette::dark()
        };
        let item = ItemLayout {
            virtual_index: 0,
            value: 0,
            label: "00".into(),
            top: 0.0,
            distance: -130.0,
            visual: ItemVisual::at(-130.0, 162.5),
            centered: false,
            muted: false,
        };
        let style = item_style(&item, &palette);
        assert_eq!(style.fg, Some(Color::White));
        assert!(style.add_modifier.contains(Modifier::DIM));
    }

    #[test]
    fn partially_scrolled_rows_round_to_lines() {
        let mut wheel = mounted(30, 0);
        wheel.drag_by(20.0);
        let geometry = wheel.geometry();
        let lines: Vec<Option<u16>> = wheel
            .visible_items()
            .iter()
            .map(|item| screen_line(item, &geometry))
            .collect();
        assert_eq!(lines, vec![Some(0), Some(1), Some(3), Some(5), Some(6), None]);
    }
}
