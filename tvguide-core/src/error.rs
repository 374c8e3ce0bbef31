//! Error types for guide construction and configuration

use crate::Timestamp;
use thiserror::Error;

/// Guide data validation errors.
///
/// Raised only when constructing entities; lookups never fail and model
/// absence as `None`.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Invalid interval for programme '{title}': start {start_at} is not before end {end_at}")]
    InvalidInterval {
        title: String,
        start_at: Timestamp,
        end_at: Timestamp,
    },

    #[error("Programme title must not be empty")]
    EmptyTitle,

    #[error("Programmes out of order at index {index}: {start_at} starts before {previous_start_at}")]
    UnorderedProgrammes {
        index: usize,
        start_at: Timestamp,
        previous_start_at: Timestamp,
    },
}

/// Configuration errors.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid value for {field}: {value} - {reason}")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Unknown programme fallback: {value}")]
    UnknownFallback { value: String },
}

/// Master error type for all guide errors.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum GuideError {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
}

/// Result type alias for guide operations.
pub type GuideResult<T> = Result<T, GuideError>;

// =============================================================================
// TESTS
// =============================================================================
