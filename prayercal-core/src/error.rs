//! Error types for prayercal.

use thiserror::Error;

/// Errors that can occur in prayercal operations.
#[derive(Error, Debug)]
pub enum PrayerCalError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Prayer time API error: {0}")]
    Api(String),

    #[error("Invalid prayer time data: {0}")]
    InvalidTimings(String),

    #[error("Unknown prayer: {0}")]
    UnknownPrayer(String),

    #[error("Template not found: {0}")]
    TemplateNotFound(String),

    #[error("Group not found: {0}")]
    GroupNotFound(String),

    #[error("Invalid color '{0}'. Expected #rrggbb or a color name")]
    InvalidColor(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for PrayerCalError {
    fn from(e: serde_json::Error) -> Self {
        PrayerCalError::Serialization(e.to_string())
    }
}

/// Result type alias for prayercal operations.
pub type PrayerCalResult<T> = Result<T, PrayerCalError>;
