//! Core error types for attendance-core.
//!
//! This module defines the error hierarchy using thiserror. Validation errors
//! are surfaced to the caller before any mutation happens; load errors are
//! normally swallowed by the best-effort loader in [`crate::storage`].

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for attendance-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Input rejected by the routine editor
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Key-value store errors
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Strict load errors
    #[error("Load error: {0}")]
    Load(#[from] LoadError),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

/// Validation errors raised by the routine draft editor.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Subject name is empty or whitespace-only
    #[error("Please enter a subject name.")]
    EmptySubjectName,

    /// No weekday selected
    #[error("Please select at least one day.")]
    EmptyDays,

    /// Saving a draft with no subjects
    #[error("Please add at least one subject to your routine.")]
    EmptyDraft,

    /// Draft operation issued while no editor is open
    #[error("Routine editor is not open")]
    NotEditing,

    /// Weekday name not in the seven-day vocabulary
    #[error("Unknown weekday: '{0}'")]
    UnknownWeekday(String),
}

/// Errors from the underlying key-value store.
#[derive(Error, Debug)]
pub enum StorageError {
    /// Failed to open the SQLite file
    #[error("Failed to open database at {path}: {source}")]
    OpenFailed {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },

    /// Query execution failed
    #[error("Query failed: {0}")]
    Sqlite(#[from] rusqlite::Error),

    /// Serialization failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Data directory could not be resolved or created
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors from a strict collection load.
#[derive(Error, Debug)]
pub enum LoadError {
    /// Stored value under `key` is not a valid JSON collection
    #[error("Stored value for '{key}' is corrupt: {source}")]
    Corrupt {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    /// Store could not be read
    #[error(transparent)]
    Store(#[from] StorageError),
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

    /// Unknown dot-separated key
    #[error("unknown config key: {0}")]
    UnknownKey(String),

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
