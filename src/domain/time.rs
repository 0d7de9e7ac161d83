use std::{fmt, str::FromStr, sync::LazyLock};

use anyhow::{Context, Result, anyhow};
use regex::Regex;
use serde::Serialize;

use super::{format_value, range::ValueRange};

static CLOCK_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*(\d{1,2})\s*:\s*(\d{2})\s*$").expect("valid clock regex"));

/// Hour/minute pair used for the start and minimum time of a picker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize)]
pub struct ClockTime {
    pub hour: u32,
    pub minute: u32,
}

impl ClockTime {
    pub const MIDNIGHT: ClockTime = ClockTime { hour: 0, minute: 0 };

    /// Creates a clock time, clamping both components into their ranges.
    pub fn new(hour: u32, minute: u32) -> Self {
        Self {
            hour: ValueRange::HOURS.clamp(hour),
            minute: ValueRange::MINUTES.clamp(minute),
        }
    }

    /// Strict constructor: rejects components outside `0..=23` / `0..=59`.
    pub fn try_new(hour: u32, minute: u32) -> Result<Self> {
        if !ValueRange::HOURS.contains(hour) {
            return Err(anyhow!("hour {hour} is outside 0..=23"));
        }
        if !ValueRange::MINUTES.contains(minute) {
            return Err(anyhow!("minute {minute} is outside 0..=59"));
        }
        Ok(Self { hour, minute })
    }
}

impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", format_value(self.hour), format_value(self.minute))
    }
}

impl FromStr for ClockTime {
    type Err = anyhow::Error;

    fn from_str(raw: &str) -> Result<Self> {
        let captures = CLOCK_PATTERN
            .captures(raw)
            .ok_or_else(|| anyhow!("expected HH:MM, got '{raw}'"))?;
        let hour = captures[1]
            .parse::<u32>()
            .with_context(|| format!("invalid hour in '{raw}'"))?;
        let minute = captures[2]
            .parse::<u32>()
            .with_context(|| format!("invalid minute in '{raw}'"))?;
        Self::try_new(hour, minute).with_context(|| format!("invalid time '{raw}'"))
    }
}

/// Combined hour/minute commit delivered to picker subscribers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Selection {
    pub hour: u32,
    pub minute: u32,
    pub hour_label: String,
    pub minute_label: String,
    pub formatted: String,
}

impl Selection {
    pub fn new(hour: u32, minute: u32) -> Self {
        let hour_label = format_value(hour);
        let minute_label = format_value(minute);
        let formatted = format!("{hour_label}:{minute_label}");
        Self {
            hour,
            minute,
            hour_label,
            minute_label,
            formatted,
        }
    }

    pub fn time(&self) -> ClockTime {
        ClockTime {
            hour: self.hour,
            minute: self.minute,
        }
    }
}
