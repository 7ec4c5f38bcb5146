// File: crates/drops-core/src/error.rs
// Summary: Error taxonomy: configuration errors (loud), data errors, and drawing failures (caught by the orchestrator).

use thiserror::Error;

/// Message shown when a drawing failure carries no usable text.
pub const UNKNOWN_ERROR: &str = "Unknown error";

/// Category registry and legend configuration problems. These are never
/// swallowed into blank UI; they propagate to the caller.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("unknown category `{0}`: no entry in the category registry")]
    UnknownCategory(String),
    #[error("category `{0}` is listed more than once")]
    DuplicateCategory(String),
    #[error("category `{id}` has an empty `{field}`")]
    EmptyField { id: String, field: &'static str },
    #[error("category table is missing the `{0}` column")]
    MissingColumn(&'static str),
    #[error("reading category table: {0}")]
    Csv(#[from] csv::Error),
}

/// Problems building a [`crate::ChartDataModel`] from raw drop events.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DataError {
    #[error("period end {end} is not after its start {start}")]
    InvertedPeriod { start: String, end: String },
    #[error("bucket width must be positive")]
    EmptyBucket,
}

/// A failure reported by the drawing routine.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct DrawError {
    message: String,
}

impl DrawError {
    /// Blank messages collapse to [`UNKNOWN_ERROR`].
    pub fn new(message: impl Into<String>) -> Self {
        let message = message.into();
        if message.trim().is_empty() {
            Self::unknown()
        } else {
            Self { message }
        }
    }

    pub fn unknown() -> Self {
        Self { message: UNKNOWN_ERROR.to_string() }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn into_message(self) -> String {
        self.message
    }
}

impl From<String> for DrawError {
    fn from(message: String) -> Self {
        Self::new(message)
    }
}

impl From<&str> for DrawError {
    fn from(message: &str) -> Self {
        Self::new(message)
    }
}
