use serde::{Deserialize, Serialize};

use crate::models::Workout;

/// Criteria for narrowing a workout collection
///
/// Both criteria are optional and combine with AND. An empty string counts
/// as not supplied.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutFilter {
    /// Exact, case-sensitive exercise type
    #[serde(rename = "type")]
    pub exercise_type: Option<String>,

    /// Case-insensitive substring matched against exercise type or notes
    pub search_term: Option<String>,
}

impl WorkoutFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_type(mut self, exercise_type: impl Into<String>) -> Self {
        self.exercise_type = Some(exercise_type.into());
        self
    }

    pub fn with_search(mut self, term: impl Into<String>) -> Self {
        self.search_term = Some(term.into());
        self
    }

    /// Whether the filter lets every workout through
    pub fn is_empty(&self) -> bool {
        active(&self.exercise_type).is_none() && active(&self.search_term).is_none()
    }

    /// Check a single workout against the filter
    pub fn matches(&self, workout: &Workout) -> bool {
        if let Some(exercise_type) = active(&self.exercise_type) {
            if workout.exercise_type != exercise_type {
                return false;
            }
        }

        if let Some(term) = active(&self.search_term) {
            let term = term.to_lowercase();
            let in_type = workout.exercise_type.to_lowercase().contains(&term);
            let in_notes = workout.notes_or_empty().to_lowercase().contains(&term);
            if !in_type && !in_notes {
                return false;
            }
        }

        true
    }
}

fn active(criterion: &Option<String>) -> Option<&str> {
    criterion.as_deref().filter(|value| !value.is_empty())
}

/// Workouts matching `criteria`, in collection order
pub fn filter<'a>(workouts: &'a [Workout], criteria: &WorkoutFilter) -> Vec<&'a Workout> {
    workouts.iter().filter(|w| criteria.matches(w)).collect()
}

/// Distinct exercise types in first-seen order
pub fn exercise_types(workouts: &[Workout]) -> Vec<&str> {
    let mut types: Vec<&str> = Vec::new();
    for workout in workouts {
        if !types.contains(&workout.exercise_type.as_str()) {
            types.push(&workout.exercise_type);
        }
    }
    types
}
