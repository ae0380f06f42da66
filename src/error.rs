//! Error types for the submission client.

use std::fmt;

/// Error returned when an admission wait is abandoned by the gate itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AcquireError {
    /// The gate was closed while the caller was waiting for a unit.
    Cancelled,
}

impl fmt::Display for AcquireError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AcquireError::Cancelled => write!(f, "admission wait cancelled"),
        }
    }
}

impl std::error::Error for AcquireError {}

/// Errors surfaced by `Client::submit` and `PendingResponse`.
///
/// A non-2xx status from the remote service is NOT an error: it is returned
/// as a regular [`crate::SubmissionResponse`] for the caller to interpret.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitError {
    /// The admission wait was cancelled (client shut down).
    Cancelled,
    /// The document could not be serialized to the wire format.
    InvalidDocument(String),
    /// Network-level failure: connect, timeout, or body read error.
    Transport(String),
}

impl fmt::Display for SubmitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SubmitError::Cancelled => write!(f, "submission cancelled"),
            SubmitError::InvalidDocument(e) => write!(f, "invalid document: {}", e),
            SubmitError::Transport(e) => write!(f, "transport error: {}", e),
        }
    }
}

impl std::error::Error for SubmitError {}

impl From<AcquireError> for SubmitError {
    fn from(e: AcquireError) -> Self {
        match e {
            AcquireError::Cancelled => SubmitError::Cancelled,
        }
    }
}

/// Configuration validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Capacity must admit at least one submission per window.
    ZeroCapacity,
    /// Window length must be greater than zero.
    ZeroWindow,
    /// The endpoint URL could not be parsed or uses an unsupported scheme.
    InvalidEndpoint(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::ZeroCapacity => write!(f, "capacity must be greater than zero"),
            ConfigError::ZeroWindow => write!(f, "window length must be greater than zero"),
            ConfigError::InvalidEndpoint(e) => write!(f, "invalid endpoint: {}", e),
        }
    }
}

impl std::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn acquire_error_maps_to_submit_cancelled() {
        assert_eq!(SubmitError::from(AcquireError::Cancelled), SubmitError::Cancelled);
    }

    #[test]
    fn display_messages() {
        assert_eq!(AcquireError::Cancelled.to_string(), "admission wait cancelled");
        assert_eq!(
            SubmitError::Transport("connection refused".to_string()).to_string(),
            "transport error: connection refused"
        );
        assert_eq!(ConfigError::ZeroCapacity.to_string(), "capacity must be greater than zero");
    }
}
