//! Core error types for focushub-core.
//!
//! This module defines the error hierarchy using thiserror. Validation
//! failures (malformed dates, bad intervals) are the only conditions the
//! calculators themselves can raise; everything else comes from the
//! storage, configuration and HTTP layers.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for focushub-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Storage-related errors
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Day planner placement errors
    #[error("Planner error: {0}")]
    Planner(#[from] PlannerError),

    /// A record with the given id does not exist
    #[error("{kind} not found: {id}")]
    NotFound { kind: &'static str, id: String },

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// HTTP errors from the task breakdown client
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

impl CoreError {
    pub fn not_found(kind: &'static str, id: impl Into<String>) -> Self {
        CoreError::NotFound {
            kind,
            id: id.into(),
        }
    }
}

/// Storage-specific errors.
#[derive(Error, Debug)]
pub enum StorageError {
    /// Failed to open database connection
    #[error("Failed to open database at {path}: {source}")]
    OpenFailed {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },

    /// Query execution failed
    #[error("Query failed: {0}")]
    QueryFailed(String),

    /// Database is locked
    #[error("Database is locked")]
    Locked,

    /// A stored document could not be decoded
    #[error("Corrupt document under key '{key}': {message}")]
    CorruptDocument { key: String, message: String },

    /// Data directory could not be resolved or created
    #[error("Data directory unavailable: {0}")]
    DataDir(String),
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Unknown dot-path key
    #[error("Unknown configuration key: {0}")]
    UnknownKey(String),

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },
}

/// Validation errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// A date string is not a valid `YYYY-MM-DD` calendar date
    #[error("Invalid date '{0}': expected YYYY-MM-DD")]
    InvalidDate(String),

    /// A time string is not a valid `HH:MM` time of day
    #[error("Invalid time '{0}': expected HH:MM")]
    InvalidTime(String),

    /// A scheduled interval has a non-positive duration or starts outside the day
    #[error("Invalid interval '{id}': {message}")]
    InvalidInterval { id: String, message: String },

    /// A name or title is empty after trimming
    #[error("{0} must not be empty")]
    EmptyName(&'static str),

    /// A date lies after the reference day
    #[error("Date {date} is in the future (today is {today})")]
    FutureDate {
        date: chrono::NaiveDate,
        today: chrono::NaiveDate,
    },

    /// Invalid value
    #[error("Invalid value for '{field}': {message}")]
    InvalidValue { field: String, message: String },
}

/// Day planner placement errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PlannerError {
    /// Candidate overlaps an existing timeline entry
    #[error("'{candidate}' overlaps '{with}'")]
    Conflict { candidate: String, with: String },
}

impl From<rusqlite::Error> for StorageError {
    fn from(err: rusqlite::Error) -> Self {
        match &err {
            rusqlite::Error::SqliteFailure(e, _msg) if e.code == rusqlite::ErrorCode::DatabaseLocked => {
                StorageError::Locked
            }
            _ => StorageError::QueryFailed(err.to_string()),
        }
    }
}

impl From<rusqlite::Error> for CoreError {
    fn from(err: rusqlite::Error) -> Self {
        CoreError::Storage(err.into())
    }
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
