//! Error types for the fitness counter library.

use thiserror::Error;

/// Main error type for the library
#[derive(Error, Debug)]
pub enum Error {
    /// File I/O operation failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid input parameters provided
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Filter initialization error
    #[error("Filter error: {0}")]
    FilterError(String),

    /// Counter or analyzer configuration rejected at construction
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Landmark name not part of the 33-point body model
    #[error("Unknown landmark: {0}")]
    UnknownLandmark(String),

    /// Exercise name not present in the registry
    #[error("Unknown exercise: {0}")]
    UnknownExercise(String),

    /// Pose recording could not be parsed
    #[error("Recording error: {0}")]
    Recording(String),
}

/// Convenience type alias for Results with our Error type
pub type Result<T> = std::result::Result<T, Error>;
