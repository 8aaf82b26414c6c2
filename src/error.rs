//! Error types for the head pose scan library.
//!
//! The classification core never fails; errors only come from the edges
//! (configuration, smoothing filter construction, sample logs, file I/O).

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

    /// Smoothing filter initialization error
    #[error("Filter error: {0}")]
    FilterError(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Malformed line in a recorded sample log
    #[error("Replay error at line {line}: {message}")]
    ReplayError {
        /// 1-based line number in the sample log
        line: usize,
        /// What was wrong with the line
        message: String,
    },
}

/// Convenience type alias for Results with our Error type
pub type Result<T> = std::result::Result<T, Error>;
