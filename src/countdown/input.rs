//! Raw hours/minutes/seconds input fields

use serde::{Deserialize, Serialize};

/// One of the three input fields of the countdown widget
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Field {
    Hours,
    Minutes,
    Seconds,
}

/// Raw text typed into the HH/MM/SS inputs.
///
/// Nothing is validated here; the values are only read when the timer is
/// started for the first time.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeInput {
    pub hours: String,
    pub minutes: String,
    pub seconds: String,
}

impl TimeInput {
    /// Create an input with all fields empty
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an input pre-filled with the given raw values
    pub fn with_values(
        hours: impl Into<String>,
        minutes: impl Into<String>,
        seconds: impl Into<String>,
    ) -> Self {
        Self {
            hours: hours.into(),
            minutes: minutes.into(),
            seconds: seconds.into(),
        }
    }

    /// Replace the raw text of a single field
    pub fn set(&mut self, field: Field, value: impl Into<String>) {
        let value = value.into();
        match field {
            Field::Hours => self.hours = value,
            Field::Minutes => self.minutes = value,
            Field::Seconds => self.seconds = value,
        }
    }

    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::Hours => &self.hours,
            Field::Minutes => &self.minutes,
            Field::Seconds => &self.seconds,
        }
    }

    /// Clear every field back to empty
    pub fn clear(&mut self) {
        self.hours.clear();
        self.minutes.clear();
        self.seconds.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.hours.is_empty() && self.minutes.is_empty() && self.seconds.is_empty()
    }

    /// Total number of seconds described by the fields.
    ///
    /// Blank or malformed fields count as zero and the sum saturates instead of
    /// overflowing.
    pub fn total_seconds(&self) -> u64 {
        parse_field(&self.hours)
            .saturating_mul(3600)
            .saturating_add(parse_field(&self.minutes).saturating_mul(60))
            .saturating_add(parse_field(&self.seconds))
    }
}

/// Leniently parse a non-negative integer out of raw field text.
///
/// Leading whitespace and an optional `+` are skipped, then the leading run of
/// ASCII digits is read and anything after it ignored. Anything else (empty,
/// negative, no leading digit) yields 0. Values past `u64::MAX` saturate.
pub fn parse_field(raw: &str) -> u64 {
    let trimmed = raw.trim_start();
    let digits = trimmed.strip_prefix('+').unwrap_or(trimmed);

    digits
        .bytes()
        .take_while(u8::is_ascii_digit)
        .fold(0u64, |acc, b| {
            acc.saturating_mul(10).saturating_add(u64::from(b - b'0'))
        })
}
