//! Shared types for the ESPA API client
//!
//! This crate contains the error types and small helpers shared by the
//! configuration crate and the command line tool.

pub mod error;
pub mod utils;

// Re-export commonly used types
pub use error::{ConfigError, EspaError, Result};
