// Library interface for the workout log
// The CLI binary and integration tests go through these modules

pub mod config;
pub mod error;
pub mod format;
pub mod logging;
pub mod models;
pub mod query;
pub mod stats;
pub mod storage;
pub mod store;

// Re-export commonly used types for convenience
pub use models::*;
pub use error::{ErrorSeverity, PersistenceError, Result, WorkoutLogError};
pub use format::{
    color_of, color_rgb, intensity_color, intensity_label, DisplayFormatter, DisplayLocale,
};
pub use query::{exercise_types, filter, WorkoutFilter};
pub use stats::{summarize, AverageIntensity, WorkoutStats};
pub use storage::{FileKeyValueStore, KeyValueStore, MemoryKeyValueStore, WorkoutRepository};
pub use store::WorkoutStore;
pub use config::AppConfig;
pub use logging::{LogConfig, LogFormat, LogLevel};
