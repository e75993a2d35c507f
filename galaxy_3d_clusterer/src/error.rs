//! Error types for the Galaxy3D clusterer
//!
//! Only construction can fail (invalid grid configuration, worker pool
//! creation). Per-frame preparation and binning are infallible: they
//! operate on caller-validated geometry and guard contract violations
//! with debug assertions.

use std::fmt;

/// Result type for Galaxy3D clusterer operations
pub type Result<T> = std::result::Result<T, Error>;

/// Galaxy3D clusterer errors
#[derive(Debug, Clone)]
pub enum Error {
    /// Invalid configuration (zero cluster count, grid too large, ...)
    InvalidConfig(String),

    /// Initialization failed (worker pool, subsystems)
    InitializationFailed(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidConfig(msg) => write!(f, "Invalid configuration: {}", msg),
            Error::InitializationFailed(msg) => write!(f, "Initialization failed: {}", msg),
        }
    }
}

impl std::error::Error for Error {}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
