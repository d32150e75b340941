//! Display formatting for workout fields
//!
//! Dates are rendered with chrono's localized formatting in a fixed locale.
//! Timestamps are shifted into a fixed UTC offset before rendering.

use chrono::{DateTime, FixedOffset, Locale, NaiveDate, NaiveTime, Offset, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::{Result, WorkoutLogError};
use crate::models::Intensity;
use crate::stats::{AverageIntensity, NO_DATA_LABEL};

/// Locale conventions available for display
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum DisplayLocale {
    #[default]
    #[serde(rename = "id-ID")]
    Indonesian,
    #[serde(rename = "en-US")]
    English,
}

impl DisplayLocale {
    fn chrono_locale(&self) -> Locale {
        match self {
            DisplayLocale::Indonesian => Locale::id_ID,
            DisplayLocale::English => Locale::en_US,
        }
    }

    fn long_date_pattern(&self) -> &'static str {
        match self {
            DisplayLocale::Indonesian => "%A, %-d %B %Y",
            DisplayLocale::English => "%A, %B %-d, %Y",
        }
    }

    fn short_date_time_pattern(&self) -> &'static str {
        match self {
            DisplayLocale::Indonesian => "%-d %b %Y, %H.%M",
            DisplayLocale::English => "%b %-d, %Y, %I:%M %p",
        }
    }

    fn minutes_unit(&self) -> &'static str {
        match self {
            DisplayLocale::Indonesian => "menit",
            DisplayLocale::English => "min",
        }
    }

    pub fn tag(&self) -> &'static str {
        match self {
            DisplayLocale::Indonesian => "id-ID",
            DisplayLocale::English => "en-US",
        }
    }
}

impl FromStr for DisplayLocale {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().replace('_', "-").as_str() {
            "id" | "id-id" => Ok(DisplayLocale::Indonesian),
            "en" | "en-us" => Ok(DisplayLocale::English),
            _ => Err(format!("Unsupported locale: {}", s)),
        }
    }
}

/// Visual token for an intensity
pub fn color_of(intensity: Intensity) -> &'static str {
    match intensity {
        Intensity::Low => "#48bb78",
        Intensity::Medium => "#ed8936",
        Intensity::High => "#e53e3e",
    }
}

/// Red, green and blue components of a `#rrggbb` token
pub fn color_rgb(token: &str) -> Option<(u8, u8, u8)> {
    let hex = token.strip_prefix('#')?;
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }

    let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
    Some((channel(0)?, channel(2)?, channel(4)?))
}

/// Visual token for a raw intensity code; unknown codes are an error
pub fn intensity_color(code: &str) -> Result<&'static str> {
    Ok(color_of(parse_code(code)?))
}

/// Display label for a raw intensity code in `locale`; unknown codes are an error
pub fn intensity_label(code: &str, locale: DisplayLocale) -> Result<&'static str> {
    Ok(label_of(parse_code(code)?, locale))
}

fn label_of(intensity: Intensity, locale: DisplayLocale) -> &'static str {
    match (locale, intensity) {
        (DisplayLocale::Indonesian, Intensity::Low) => "Rendah",
        (DisplayLocale::Indonesian, Intensity::Medium) => "Sedang",
        (DisplayLocale::Indonesian, Intensity::High) => "Tinggi",
        (DisplayLocale::English, Intensity::Low) => "Low",
        (DisplayLocale::English, Intensity::Medium) => "Medium",
        (DisplayLocale::English, Intensity::High) => "High",
    }
}

// Codes are matched exactly as stored; display code is never guessed
fn parse_code(code: &str) -> Result<Intensity> {
    Intensity::ALL
        .into_iter()
        .find(|intensity| intensity.code() == code)
        .ok_or_else(|| WorkoutLogError::InvalidEnum {
            value: code.to_string(),
        })
}

/// Renders workout fields for one locale and time zone
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayFormatter {
    locale: DisplayLocale,
    offset: FixedOffset,
}

impl DisplayFormatter {
    pub fn new(locale: DisplayLocale, offset: FixedOffset) -> Self {
        Self { locale, offset }
    }

    /// Build from a whole-hour UTC offset
    pub fn with_offset_hours(locale: DisplayLocale, hours: i32) -> Result<Self> {
        let offset = FixedOffset::east_opt(hours * 3600).ok_or_else(|| {
            WorkoutLogError::Configuration(format!("UTC offset out of range: {} hours", hours))
        })?;
        Ok(Self::new(locale, offset))
    }

    pub fn locale(&self) -> DisplayLocale {
        self.locale
    }

    pub fn offset(&self) -> FixedOffset {
        self.offset
    }

    /// Long calendar date with weekday, e.g. "Senin, 15 Januari 2024"
    pub fn format_date(&self, date: &NaiveDate) -> String {
        let midnight = Utc.from_utc_datetime(&date.and_time(NaiveTime::MIN));
        midnight
            .format_localized(self.locale.long_date_pattern(), self.locale.chrono_locale())
            .to_string()
    }

    /// Short date with hour and minute in the formatter's offset
    pub fn format_date_time(&self, timestamp: &DateTime<Utc>) -> String {
        timestamp
            .with_timezone(&self.offset)
            .format_localized(
                self.locale.short_date_time_pattern(),
                self.locale.chrono_locale(),
            )
            .to_string()
    }

    pub fn format_duration(&self, minutes: u32) -> String {
        format!("{} {}", minutes, self.locale.minutes_unit())
    }

    pub fn intensity_label(&self, intensity: Intensity) -> &'static str {
        label_of(intensity, self.locale)
    }

    /// Label for a raw intensity code
    pub fn intensity_label_for_code(&self, code: &str) -> Result<&'static str> {
        intensity_label(code, self.locale)
    }

    /// Label for a summary average, with a placeholder when there is no data
    pub fn average_label(&self, average: AverageIntensity) -> &'static str {
        match average {
            AverageIntensity::NoData => NO_DATA_LABEL,
            AverageIntensity::Level(level) => self.intensity_label(level),
        }
    }
}

impl Default for DisplayFormatter {
    /// Indonesian locale at UTC+7
    fn default() -> Self {
        Self {
            locale: DisplayLocale::Indonesian,
            offset: FixedOffset::east_opt(7 * 3600).unwrap_or_else(|| Utc.fix()),
        }
    }
}
