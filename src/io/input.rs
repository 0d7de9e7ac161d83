use anyhow::{Context, Result};
use ratatui::style::Color;
use serde::Deserialize;
use serde_json::Value;

use super::DocumentFormat;
use crate::{
    domain::ClockTime,
    presentation::{WheelPalette, parse_color},
};

/// Parse structured data in any supported format into a `serde_json::Value`.
pub fn parse_document_str(contents: &str, format: DocumentFormat) -> Result<Value> {
    match format {
        DocumentFormat::Json => {
            serde_json::from_str::<Value>(contents).with_context(|| "failed to parse JSON document")
        }
        #[cfg(feature = "yaml")]
        DocumentFormat::Yaml => {
            serde_yaml::from_str::<Value>(contents).with_context(|| "failed to parse YAML document")
        }
        #[cfg(feature = "toml")]
        DocumentFormat::Toml => toml::from_str::<toml::Table>(contents)
            .with_context(|| "failed to parse TOML document")
            .and_then(|value| {
                serde_json::to_value(value).context("failed to convert TOML to JSON")
            }),
    }
}

/// Picker settings loaded from a config document.
///
/// Times are written as `"HH:MM"` strings and colors use ratatui's color
/// names or `#rrggbb`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct PickerSettings {
    pub start: Option<String>,
    pub min: Option<String>,
    pub title: Option<String>,
    pub line_color: Option<String>,
    pub theme: Option<Theme>,
    pub help: Option<bool>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Dark,
    Light,
}

impl PickerSettings {
    pub fn start_time(&self) -> Result<Option<ClockTime>> {
        parse_time(self.start.as_deref(), "start")
    }

    pub fn min_time(&self) -> Result<Option<ClockTime>> {
        parse_time(self.min.as_deref(), "min")
    }

    pub fn line_color(&self) -> Result<Option<Color>> {
        self.line_color
            .as_deref()
            .map(|raw| parse_color(raw).context("invalid lineColor"))
            .transpose()
    }

    pub fn palette(&self) -> WheelPalette {
        match self.theme {
            Some(Theme::Light) => WheelPalette::light(),
            Some(Theme::Dark) | None => WheelPalette::dark(),
        }
    }
}

/// Parses a settings document. Unknown keys are rejected.
pub fn settings_from_str(contents: &str, format: DocumentFormat) -> Result<PickerSettings> {
    let value = parse_document_str(contents, format)?;
    serde_json::from_value(value).context("invalid picker settings")
}

fn parse_time(raw: Option<&str>, field: &str) -> Result<Option<ClockTime>> {
    raw.map(|raw| {
        raw.parse::<ClockTime>()
            .with_context(|| format!("invalid {field} time"))
    })
    .transpose()
}
