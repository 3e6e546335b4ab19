use miette::{Diagnostic, Result};
use thiserror::Error;

/// Main error type for the hours engine
#[derive(Debug, Error, Diagnostic)]
pub enum Error {
    #[error("Invalid time '{0}': expected HH:MM between 00:00 and 23:59")]
    #[diagnostic(code(roomhours::parse))]
    Parse(String),

    #[error("Invalid window on weekday {weekday}: {reason}")]
    #[diagnostic(code(roomhours::invalid_window))]
    InvalidWindow { weekday: u8, reason: String },

    #[error("Invalid weekday {0}: expected 0 (Sunday) to 6 (Saturday)")]
    #[diagnostic(code(roomhours::invalid_weekday))]
    InvalidWeekday(u8),

    #[error("Invalid weekly schedule: {0}")]
    #[diagnostic(code(roomhours::invalid_schedule))]
    InvalidSchedule(String),

    #[error("Weekly schedule has not been loaded yet")]
    #[diagnostic(code(roomhours::not_loaded))]
    NotLoaded,

    #[error("Persistence error: {0}")]
    #[diagnostic(code(roomhours::fetch), help("The working copy was kept; retry the save"))]
    Fetch(String),

    #[error("Unknown preset: {0}")]
    #[diagnostic(code(roomhours::unknown_preset))]
    UnknownPreset(String),

    #[error("Environment error: {0}")]
    #[diagnostic(code(roomhours::environment))]
    Environment(String),

    #[error("Configuration error: {0}")]
    #[diagnostic(code(roomhours::config))]
    Config(String),

    #[error(transparent)]
    #[diagnostic(code(roomhours::io))]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    #[diagnostic(code(roomhours::serialization))]
    Serialization(String),

    #[error("Other error: {0}")]
    #[diagnostic(code(roomhours::other))]
    Other(String),
}

// Implement From for TOML deserialization errors
impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Serialization(err.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Serialization(err.to_string())
    }
}

/// Type alias for Result with our Error type
pub type ScheduleResult<T> = Result<T, Error>;

/// Helper to create parse errors
pub fn parse_error(input: &str) -> Error {
    Error::Parse(input.to_string())
}

/// Helper to create per-day window warnings
pub fn invalid_window(weekday: u8, reason: &str) -> Error {
    Error::InvalidWindow {
        weekday,
        reason: reason.to_string(),
    }
}

/// Helper to create persistence errors
pub fn fetch_error(message: &str) -> Error {
    Error::Fetch(message.to_string())
}

/// Helper to create environment errors
pub fn env_error(var: &str) -> Error {
    Error::Environment(format!("Invalid environment variable: {}", var))
}

/// Helper to create configuration errors
pub fn config_error(message: &str) -> Error {
    Error::Config(message.to_string())
}

/// Helper to create other errors
pub fn other_error(message: &str) -> Error {
    Error::Other(message.to_string())
}
