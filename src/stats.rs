use serde::{Deserialize, Serialize};

use crate::models::{Intensity, Workout};

/// Label shown for the average intensity of an empty collection
pub const NO_DATA_LABEL: &str = "-";

/// Categorical average of the intensities in a collection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AverageIntensity {
    /// The collection was empty
    NoData,
    Level(Intensity),
}

impl AverageIntensity {
    /// Classify a mean intensity score: up to 1.5 is Low, up to 2.5 Medium, above High
    pub fn from_mean(mean: f64) -> Self {
        let level = if mean <= 1.5 {
            Intensity::Low
        } else if mean <= 2.5 {
            Intensity::Medium
        } else {
            Intensity::High
        };
        AverageIntensity::Level(level)
    }

    pub fn intensity(&self) -> Option<Intensity> {
        match self {
            AverageIntensity::NoData => None,
            AverageIntensity::Level(level) => Some(*level),
        }
    }
}

/// Summary figures over a workout collection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutStats {
    pub count: usize,
    pub total_minutes: u64,
    /// Arithmetic mean of intensity scores, `None` when empty
    pub mean_intensity: Option<f64>,
    pub average_intensity: AverageIntensity,
}

/// Count, total duration and average intensity of `workouts`
pub fn summarize<'a, I>(workouts: I) -> WorkoutStats
where
    I: IntoIterator<Item = &'a Workout>,
{
    let mut count = 0usize;
    let mut total_minutes = 0u64;
    let mut score_sum = 0u64;

    for workout in workouts {
        count += 1;
        total_minutes += u64::from(workout.duration);
        score_sum += u64::from(workout.intensity.score());
    }

    if count == 0 {
        return WorkoutStats {
            count,
            total_minutes,
            mean_intensity: None,
            average_intensity: AverageIntensity::NoData,
        };
    }

    let mean = score_sum as f64 / count as f64;
    WorkoutStats {
        count,
        total_minutes,
        mean_intensity: Some(mean),
        average_intensity: AverageIntensity::from_mean(mean),
    }
}
