//! Error types for search orchestration.

use thiserror::Error;

/// Errors surfaced to callers of the orchestrator.
///
/// Provider failures never appear here; they are absorbed per source and
/// reported through [`crate::SourceOutcome`].
#[derive(Debug, Error)]
pub enum SearchError {
    /// The caller broke the entry point contract
    #[error("invalid search input: {0}")]
    InvalidInput(String),
}

/// Result type for search operations.
pub type Result<T> = std::result::Result<T, SearchError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_input_display() {
        let err = SearchError::InvalidInput("max_concurrent must be at least 1".to_string());
        assert_eq!(
            err.to_string(),
            "invalid search input: max_concurrent must be at least 1"
        );
    }
}
