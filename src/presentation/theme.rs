use std::str::FromStr;

use anyhow::{Result, anyhow};
use ratatui::style::Color;

/// Colors used by the wheels and the surrounding chrome.
///
/// Opacity blending only works between RGB colors; named colors fall back to
/// the `DIM` modifier for faded rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WheelPalette {
    pub foreground: Color,
    pub muted: Color,
    pub background: Color,
    pub line: Color,
    pub accent: Color,
}

impl Default for WheelPalette {
    fn default() -> Self {
        Self::dark()
    }
}

impl WheelPalette {
    pub fn dark() -> Self {
        Self {
            foreground: Color::Rgb(236, 236, 236),
            muted: Color::Rgb(118, 118, 118),
            background: Color::Rgb(22, 22, 26),
            line: Color::Red,
            accent: Color::Yellow,
        }
    }

    /// Black on white with gray muted rows.
    pub fn light() -> Self {
        Self {
            foreground: Color::Rgb(0, 0, 0),
            muted: Color::Rgb(136, 136, 136),
            background: Color::Rgb(255, 255, 255),
            line: Color::Red,
            accent: Color::Blue,
        }
    }

    pub fn with_line_color(mut self, line: Color) -> Self {
        self.line = line;
        self
    }
}

/// Mixes `color` over `background` with the given opacity.
pub fn blend(color: Color, background: Color, opacity: f32) -> Option<Color> {
    let (Color::Rgb(r, g, b), Color::Rgb(br, bg, bb)) = (color, background) else {
        return None;
    };
    let alpha = opacity.clamp(0.0, 1.0);
    let mix = |front: u8, back: u8| -> u8 {
        (front as f32 * alpha + back as f32 * (1.0 - alpha)).round() as u8
    };
    Some(Color::Rgb(mix(r, br), mix(g, bg), mix(b, bb)))
}

/// Parses a color name (`red`, `lightblue`), an indexed color (`42`) or a
/// `#rrggbb` hex triple.
pub fn parse_color(raw: &str) -> Result<Color> {
    Color::from_str(raw.trim()).map_err(|_| anyhow!("unknown color '{raw}'"))
}
