//! Unified error types for pagerun

use thiserror::Error;

use crate::signal::SignalDecodeError;

/// Unified error type for all pagerun operations
#[derive(Error, Debug)]
pub enum RunnerError {
    // Browser errors (launch, CDP, navigation plumbing)
    #[error("Browser error: {0}")]
    Browser(String),

    // Target resolution errors
    #[error("Invalid target: {0}")]
    Target(String),

    // Exit signal errors
    #[error("Exit signal decode failed: {0}")]
    SignalDecode(#[from] SignalDecodeError),

    // Watchdog expiry while awaiting the page's exit signal
    #[error("No exit signal within {0} seconds")]
    Watchdog(u64),

    // I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    // Generic
    #[error("{0}")]
    Other(String),
}

/// Result type alias using RunnerError
pub type Result<T> = std::result::Result<T, RunnerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_watchdog_display() {
        let err = RunnerError::Watchdog(300);
        assert_eq!(err.to_string(), "No exit signal within 300 seconds");
    }

    #[test]
    fn test_io_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err: RunnerError = io.into();
        assert!(matches!(err, RunnerError::Io(_)));
    }
}
