//! Core error types for shadowguess-core.
//!
//! Precondition violations in the scheduler and scale modules (empty item
//! universe, out-of-range random draws) are contract errors and assert
//! instead of returning one of these.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for shadowguess-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Database-related errors
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// Configuration-related errors
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Validation errors
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),

    /// IO errors
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load configuration
    #[error("failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Failed to parse configuration
    #[error("failed to parse configuration: {0}")]
    ParseFailed(String),
}

/// Validation errors for host-supplied data.
#[derive(Error, Debug)]
pub enum ValidationError {
    /// The subject catalog has no entries
    #[error("subject catalog is empty")]
    EmptyCatalog,

    /// A subjects file was read but contained no usable lines
    #[error("subject list at {path} contains no entries")]
    EmptySubjectsFile { path: PathBuf },
}
