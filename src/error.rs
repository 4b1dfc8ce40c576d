//! Error types for chart computation.
//!
//! Invalid inputs and ephemeris failures are always surfaced to the caller
//! as distinct, typed failures — never downgraded to a default chart.
//! Degenerate house geometry is not an error; it is recovered by clamping
//! and reported through [`crate::models::Diagnostic`].

use crate::models::Body;

/// Result type for chart operations.
pub type Result<T> = std::result::Result<T, ChartError>;

/// Error type for chart computation.
#[derive(Debug, thiserror::Error)]
pub enum ChartError {
    /// The request failed validation before any computation was attempted:
    /// non-finite or out-of-range coordinates, or an unrepresentable instant.
    #[error("invalid input: {message}")]
    InvalidInput { message: String },

    /// The ephemeris provider raised or returned an unusable value for a
    /// specific body. The whole chart computation aborts; no partial chart
    /// is returned.
    #[error("ephemeris failure for {body}: {message}")]
    Ephemeris { body: Body, message: String },

    /// The ephemeris provider does not cover one of the ten chart bodies.
    /// Detected once at engine construction, not per call.
    #[error("ephemeris provider does not support {body}")]
    UnsupportedBody { body: Body },
}

impl ChartError {
    /// Convenience constructor for input validation failures.
    pub fn invalid_input(message: impl Into<String>) -> Self {
        ChartError::InvalidInput {
            message: message.into(),
        }
    }

    /// The body an ephemeris failure refers to, if any.
    pub fn failing_body(&self) -> Option<Body> {
        match self {
            ChartError::Ephemeris { body, .. } => Some(*body),
            ChartError::UnsupportedBody { body } => Some(*body),
            ChartError::InvalidInput { .. } => None,
        }
    }
}
