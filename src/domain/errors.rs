// src/domain/errors.rs
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Persistence error: {0}")]
    Persistence(#[from] PersistenceError),

    #[error("Journal error: {0}")]
    Journal(#[from] JournalError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Export error: {0}")]
    Export(String),
}

/// Invalid or missing user input. Surfaced directly to the caller and never
/// retried; the user is re-prompted.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    #[error("Unknown news type: {0}")]
    UnknownNewsType(String),

    #[error("Unknown currency: {0}")]
    UnknownCurrency(String),

    #[error("Unknown plan: {0}")]
    UnknownPlan(String),

    #[error("Invalid number for {field}: {value:?}")]
    InvalidNumber { field: &'static str, value: String },

    #[error("Invalid value for {field}: {value:?}")]
    InvalidChoice { field: &'static str, value: String },
}

#[derive(Error, Debug)]
pub enum PersistenceError {
    #[error("Failed to read key {key}: {reason}")]
    Read { key: String, reason: String },

    #[error("Failed to write key {key}: {reason}")]
    Write { key: String, reason: String },

    #[error("Failed to decode stored value for {key}: {reason}")]
    Decode { key: String, reason: String },

    #[error("Failed to encode value for {key}: {reason}")]
    Encode { key: String, reason: String },
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum JournalError {
    #[error("No trade record with id {0}")]
    NotFound(String),

    #[error("Trade record {0} already has a recorded result")]
    AlreadyCompleted(String),
}

// Result type alias for convenience
pub type AppResult<T> = Result<T, AppError>;
pub type ValidationResult<T> = Result<T, ValidationError>;
pub type PersistenceResult<T> = Result<T, PersistenceError>;
pub type JournalResult<T> = Result<T, JournalError>;
