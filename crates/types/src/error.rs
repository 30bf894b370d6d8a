//! Error types for the ESPA API client

use thiserror::Error;

/// Main error type for the ESPA API client
#[derive(Error, Debug)]
pub enum EspaError {
    /// Configuration related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Filesystem errors outside of configuration loading
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Internal errors
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Result type alias for ESPA client operations
pub type Result<T> = std::result::Result<T, EspaError>;

/// Configuration specific errors
#[derive(Error, Debug)]
pub enum ConfigError {
    /// File not found
    #[error("Configuration file not found: {path}")]
    FileNotFound { path: String },

    /// Parse error
    #[error("Configuration parse error: {0}")]
    ParseError(String),

    /// Validation error
    #[error("Configuration validation error: {field}: {message}")]
    ValidationError { field: String, message: String },

    /// Invalid value
    #[error("Invalid configuration value for {field}: {value}")]
    InvalidValue { field: String, value: String },

    /// The install location of the running program could not be determined.
    /// Not transient; callers should treat it as fatal.
    #[error("Failed to resolve install location: {message}")]
    ResolutionFailed { message: String },

    /// The process-wide configuration was already set
    #[error("Process-wide configuration is already initialized")]
    AlreadyInitialized,
}

impl ConfigError {
    /// Whether the process can continue after this error
    pub fn is_fatal(&self) -> bool {
        matches!(self, ConfigError::ResolutionFailed { .. })
    }
}
