//! Error types for lead matching.

use leadscout_core::LeadscoutError;
use thiserror::Error;

/// Errors that can occur while matching leads.
#[derive(Error, Debug)]
pub enum MatchError {
    /// Caller contract violation, such as a missing customer ID
    #[error("invalid match input: {0}")]
    InvalidInput(String),

    /// The model call failed or returned something unusable
    #[error("matcher error ({model}): {message}")]
    Provider {
        /// Model that was called
        model: String,
        /// Error message
        message: String,
    },

    /// A lead refused a status transition
    #[error("status transition failed: {0}")]
    Transition(#[from] LeadscoutError),
}

/// Result type for matching operations.
pub type Result<T> = std::result::Result<T, MatchError>;
