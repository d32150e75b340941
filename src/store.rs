use chrono::{DateTime, NaiveDate, SubsecRound, Utc};
use tracing::info;
use uuid::Uuid;

use crate::error::{Result, WorkoutLogError};
use crate::models::{Intensity, Workout, WorkoutInput};
use crate::storage::WorkoutRepository;

/// Owns the workout collection and keeps it in sync with durable storage
///
/// The collection is ordered most-recent-first. Every mutation persists the
/// full collection before returning; if the write fails the in-memory
/// collection is left as it was.
#[derive(Debug)]
pub struct WorkoutStore {
    workouts: Vec<Workout>,
    repository: WorkoutRepository,
}

impl WorkoutStore {
    /// Open a store, loading whatever the repository already holds
    pub fn open(repository: WorkoutRepository) -> Result<Self> {
        let workouts = repository.load()?;
        info!(count = workouts.len(), "Workout store opened");

        Ok(Self {
            workouts,
            repository,
        })
    }

    /// Validate `input`, assign an id and creation time, and prepend the record
    pub fn create(&mut self, input: WorkoutInput) -> Result<Workout> {
        let fields = ParsedFields::parse(&input)?;

        let workout = Workout {
            id: Uuid::new_v4().to_string(),
            exercise_type: fields
                .exercise_type
                .ok_or_else(|| WorkoutLogError::validation("exerciseType", "is required"))?,
            duration: fields
                .duration
                .ok_or_else(|| WorkoutLogError::validation("duration", "is required"))?,
            date: fields
                .date
                .ok_or_else(|| WorkoutLogError::validation("date", "is required"))?,
            intensity: fields
                .intensity
                .ok_or_else(|| WorkoutLogError::validation("intensity", "is required"))?,
            notes: fields.notes,
            created_at: now(),
            updated_at: None,
        };

        let mut next = Vec::with_capacity(self.workouts.len() + 1);
        next.push(workout.clone());
        next.extend(self.workouts.iter().cloned());
        self.commit(next)?;

        info!(id = %workout.id, exercise_type = %workout.exercise_type, "Workout created");
        Ok(workout)
    }

    /// Merge the supplied fields over an existing record and stamp `updated_at`
    pub fn update(&mut self, id: &str, input: WorkoutInput) -> Result<Workout> {
        let index = self.position(id).ok_or_else(|| WorkoutLogError::NotFound {
            id: id.to_string(),
        })?;
        let fields = ParsedFields::parse(&input)?;

        let mut updated = self.workouts[index].clone();
        if let Some(exercise_type) = fields.exercise_type {
            updated.exercise_type = exercise_type;
        }
        if let Some(duration) = fields.duration {
            updated.duration = duration;
        }
        if let Some(date) = fields.date {
            updated.date = date;
        }
        if let Some(intensity) = fields.intensity {
            updated.intensity = intensity;
        }
        if input.notes.is_some() {
            updated.notes = fields.notes;
        }
        updated.updated_at = Some(now());

        let mut next = self.workouts.clone();
        next[index] = updated.clone();
        self.commit(next)?;

        info!(id = %updated.id, "Workout updated");
        Ok(updated)
    }

    /// Remove the record with `id`; removing an unknown id is not an error
    pub fn delete(&mut self, id: &str) -> Result<()> {
        let next: Vec<Workout> = self.workouts.iter().filter(|w| w.id != id).cloned().collect();
        let removed = next.len() != self.workouts.len();
        self.commit(next)?;

        if removed {
            info!(id = %id, "Workout deleted");
        }
        Ok(())
    }

    /// The full collection, most recent first
    pub fn list(&self) -> &[Workout] {
        &self.workouts
    }

    pub fn find_by_id(&self, id: &str) -> Option<&Workout> {
        self.workouts.iter().find(|w| w.id == id)
    }

    pub fn len(&self) -> usize {
        self.workouts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.workouts.is_empty()
    }

    fn position(&self, id: &str) -> Option<usize> {
        self.workouts.iter().position(|w| w.id == id)
    }

    fn commit(&mut self, next: Vec<Workout>) -> Result<()> {
        self.repository.save(&next)?;
        self.workouts = next;
        Ok(())
    }
}

// Millisecond precision so a record survives a save/load cycle unchanged
fn now() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(3)
}

/// Input fields after parsing; `None` means the field was not supplied
#[derive(Debug, Default)]
struct ParsedFields {
    exercise_type: Option<String>,
    duration: Option<u32>,
    date: Option<NaiveDate>,
    intensity: Option<Intensity>,
    notes: Option<String>,
}

impl ParsedFields {
    fn parse(input: &WorkoutInput) -> Result<Self> {
        Ok(Self {
            exercise_type: input
                .exercise_type
                .as_deref()
                .map(parse_exercise_type)
                .transpose()?,
            duration: input.duration.as_deref().map(parse_duration).transpose()?,
            date: input.date.as_deref().map(parse_date).transpose()?,
            intensity: input.intensity.as_deref().map(parse_intensity).transpose()?,
            notes: input.notes.clone().filter(|notes| !notes.is_empty()),
        })
    }
}

fn parse_exercise_type(raw: &str) -> Result<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(WorkoutLogError::validation("exerciseType", "is required"));
    }
    Ok(trimmed.to_string())
}

fn parse_duration(raw: &str) -> Result<u32> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(WorkoutLogError::validation("duration", "is required"));
    }

    let minutes: i64 = trimmed.parse().map_err(|_| {
        WorkoutLogError::validation("duration", format!("{:?} is not a whole number of minutes", raw))
    })?;
    if minutes <= 0 {
        return Err(WorkoutLogError::validation("duration", "must be greater than 0"));
    }

    u32::try_from(minutes)
        .map_err(|_| WorkoutLogError::validation("duration", format!("{} minutes is too long", minutes)))
}

fn parse_date(raw: &str) -> Result<NaiveDate> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(WorkoutLogError::validation("date", "is required"));
    }

    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d").map_err(|_| {
        WorkoutLogError::validation("date", format!("{:?} is not a YYYY-MM-DD date", raw))
    })
}

fn parse_intensity(raw: &str) -> Result<Intensity> {
    if raw.trim().is_empty() {
        return Err(WorkoutLogError::validation("intensity", "is required"));
    }

    raw.parse().map_err(|_| {
        WorkoutLogError::validation("intensity", format!("{:?} is not one of Low, Medium, High", raw))
    })
}
