//! Unified error hierarchy for the workout log
//!
//! Validation and not-found failures are recoverable by the caller; persistence
//! failures are surfaced as-is so the caller can decide what to tell the user.

use thiserror::Error;

/// Top-level error type for all workout log operations
#[derive(Debug, Error)]
pub enum WorkoutLogError {
    /// A required field is missing or invalid
    #[error("Validation error on {field}: {reason}")]
    Validation { field: &'static str, reason: String },

    /// An operation referenced an id that is not in the collection
    #[error("Workout not found: {id}")]
    NotFound { id: String },

    /// The durable store failed to read or write
    #[error("Persistence error: {0}")]
    Persistence(#[from] PersistenceError),

    /// Unrecognized intensity code
    #[error("Invalid intensity code: {value:?}")]
    InvalidEnum { value: String },

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Configuration(String),
}

/// Durable store failures
#[derive(Debug, Error)]
pub enum PersistenceError {
    /// Underlying file system failure
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Snapshot could not be serialized
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Snapshot does not fit in the store
    #[error("Storage quota exceeded: {needed} bytes needed, {quota} available")]
    QuotaExceeded { needed: usize, quota: usize },
}

/// Result type alias for workout log operations
pub type Result<T> = std::result::Result<T, WorkoutLogError>;

impl WorkoutLogError {
    pub(crate) fn validation(field: &'static str, reason: impl Into<String>) -> Self {
        WorkoutLogError::Validation {
            field,
            reason: reason.into(),
        }
    }

    /// Whether the caller can recover by correcting its input
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            WorkoutLogError::Validation { .. }
                | WorkoutLogError::NotFound { .. }
                | WorkoutLogError::InvalidEnum { .. }
        )
    }

    /// Get error severity level
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            WorkoutLogError::Validation { .. } => ErrorSeverity::Warning,
            WorkoutLogError::NotFound { .. } => ErrorSeverity::Warning,
            WorkoutLogError::InvalidEnum { .. } => ErrorSeverity::Warning,
            WorkoutLogError::Persistence(_) => ErrorSeverity::Error,
            WorkoutLogError::Configuration(_) => ErrorSeverity::Error,
        }
    }

    /// Get user-friendly error message
    pub fn user_message(&self) -> String {
        match self {
            WorkoutLogError::Validation { field, reason } => {
                format!("Please check the {} field: {}", field, reason)
            }
            WorkoutLogError::NotFound { id } => {
                format!("No workout with id {} exists. It may have been deleted.", id)
            }
            WorkoutLogError::Persistence(PersistenceError::QuotaExceeded { .. }) => {
                "Storage is full. Delete some workouts and try again.".to_string()
            }
            WorkoutLogError::Persistence(_) => {
                "Could not save your workouts. Please check the data directory.".to_string()
            }
            _ => self.to_string(),
        }
    }
}

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    /// Error that prevents the operation
    Error,
    /// Warning that the caller can act on
    Warning,
}

impl ErrorSeverity {
    /// Convert to tracing level
    pub fn to_tracing_level(&self) -> tracing::Level {
        match self {
            ErrorSeverity::Error => tracing::Level::ERROR,
            ErrorSeverity::Warning => tracing::Level::WARN,
        }
    }
}
