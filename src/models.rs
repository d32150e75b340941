use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::WorkoutLogError;

/// Perceived effort of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Intensity {
    Low,
    Medium,
    High,
}

impl Intensity {
    pub const ALL: [Intensity; 3] = [Intensity::Low, Intensity::Medium, Intensity::High];

    /// Numeric weight used when averaging intensities (Low=1, Medium=2, High=3)
    pub fn score(&self) -> u8 {
        match self {
            Intensity::Low => 1,
            Intensity::Medium => 2,
            Intensity::High => 3,
        }
    }

    /// Storage code, as written in snapshots
    pub fn code(&self) -> &'static str {
        match self {
            Intensity::Low => "Low",
            Intensity::Medium => "Medium",
            Intensity::High => "High",
        }
    }
}

impl fmt::Display for Intensity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Intensity {
    type Err = WorkoutLogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "low" => Ok(Intensity::Low),
            "medium" => Ok(Intensity::Medium),
            "high" => Ok(Intensity::High),
            _ => Err(WorkoutLogError::InvalidEnum {
                value: s.to_string(),
            }),
        }
    }
}

/// One logged exercise session
///
/// Field names on the wire match the snapshot layout written by earlier
/// versions of the log, so existing data loads unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Workout {
    /// Unique identifier, assigned at creation
    pub id: String,

    /// Free-form exercise name, e.g. "Running"
    pub exercise_type: String,

    /// Duration in minutes
    pub duration: u32,

    /// Calendar date of the session
    pub date: NaiveDate,

    pub intensity: Intensity,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,

    /// Set once at creation
    #[serde(with = "timestamp_serde")]
    pub created_at: DateTime<Utc>,

    /// Set on every update, absent until the first one
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "timestamp_serde::option"
    )]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Workout {
    /// Notes as a string slice, empty when absent
    pub fn notes_or_empty(&self) -> &str {
        self.notes.as_deref().unwrap_or("")
    }
}

/// Raw form input for creating or updating a workout
///
/// Every field is the unparsed string a form would submit. `None` means the
/// field was not supplied; the store owns all parsing and validation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutInput {
    pub exercise_type: Option<String>,
    pub duration: Option<String>,
    pub date: Option<String>,
    pub intensity: Option<String>,
    pub notes: Option<String>,
}

impl WorkoutInput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn exercise_type(mut self, value: impl Into<String>) -> Self {
        self.exercise_type = Some(value.into());
        self
    }

    pub fn duration(mut self, value: impl Into<String>) -> Self {
        self.duration = Some(value.into());
        self
    }

    pub fn date(mut self, value: impl Into<String>) -> Self {
        self.date = Some(value.into());
        self
    }

    pub fn intensity(mut self, value: impl Into<String>) -> Self {
        self.intensity = Some(value.into());
        self
    }

    pub fn notes(mut self, value: impl Into<String>) -> Self {
        self.notes = Some(value.into());
        self
    }

    /// True when no field is supplied
    pub fn is_empty(&self) -> bool {
        self.exercise_type.is_none()
            && self.duration.is_none()
            && self.date.is_none()
            && self.intensity.is_none()
            && self.notes.is_none()
    }
}

// Timestamps are stored as RFC 3339 UTC. Whole milliseconds keep the
// three-digit layout older snapshots use; finer values are written in full.
mod timestamp_serde {
    use chrono::{DateTime, SecondsFormat, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(timestamp: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let precision = if timestamp.timestamp_subsec_nanos() % 1_000_000 == 0 {
            SecondsFormat::Millis
        } else {
            SecondsFormat::AutoSi
        };
        serializer.serialize_str(&timestamp.to_rfc3339_opts(precision, true))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        parse(&raw).map_err(serde::de::Error::custom)
    }

    fn parse(raw: &str) -> Result<DateTime<Utc>, chrono::ParseError> {
        DateTime::parse_from_rfc3339(raw).map(|ts| ts.with_timezone(&Utc))
    }

    pub mod option {
        use chrono::{DateTime, Utc};
        use serde::{Deserialize, Deserializer, Serializer};

        pub fn serialize<S>(
            timestamp: &Option<DateTime<Utc>>,
            serializer: S,
        ) -> Result<S::Ok, S::Error>
        where
            S: Serializer,
        {
            match timestamp {
                Some(ts) => super::serialize(ts, serializer),
                None => serializer.serialize_none(),
            }
        }

        pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
        where
            D: Deserializer<'de>,
        {
            Option::<String>::deserialize(deserializer)?
                .map(|raw| super::parse(&raw).map_err(serde::de::Error::custom))
                .transpose()
        }
    }
}
