//! Error types for the source subsystem.

use thiserror::Error;

/// Errors raised while loading, constructing or calling source adapters.
#[derive(Error, Debug)]
pub enum SourceError {
    /// A source entry is malformed or its adapter could not be built
    #[error("configuration error for source {source_id}: {reason}")]
    Configuration {
        /// Source the entry describes
        source_id: String,
        /// What is wrong with it
        reason: String,
    },

    /// No constructor is registered for the adapter type
    #[error("unknown adapter type '{adapter_type}' for source {source_id}")]
    UnknownAdapterType {
        /// Source requesting the type
        source_id: String,
        /// Requested adapter type
        adapter_type: String,
    },

    /// A second definition reused an identifier
    #[error("duplicate source definition: {source_id}")]
    DuplicateSource {
        /// Repeated identifier
        source_id: String,
    },

    /// Transport failure talking to a provider
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Provider answered with a non-success status
    #[error("API error ({source_id}): status {status}, {message}")]
    Api {
        /// Source that was called
        source_id: String,
        /// HTTP status code
        status: u16,
        /// Response body or reason
        message: String,
    },

    /// Provider payload could not be decoded
    #[error("malformed response from {source_id}: {message}")]
    Parse {
        /// Source that was called
        source_id: String,
        /// Decoding failure
        message: String,
    },

    /// The call was cancelled by the caller
    #[error("search on {source_id} cancelled")]
    Cancelled {
        /// Source whose call was cancelled
        source_id: String,
    },

    /// The call exceeded the caller's deadline
    #[error("search on {source_id} timed out")]
    TimedOut {
        /// Source whose call timed out
        source_id: String,
    },

    /// Failed to read a source definition file
    #[error("failed to load source definitions from {path}: {source}")]
    LoadError {
        /// Path to the definition file
        path: String,
        /// Underlying error
        source: std::io::Error,
    },

    /// Failed to parse a source definition file
    #[error("failed to parse source definitions TOML in {path}: {source}")]
    ParseError {
        /// Path to the definition file
        path: String,
        /// TOML parse error
        #[source]
        source: toml::de::Error,
    },

    /// Definition path does not exist
    #[error("source definitions not found at {path}")]
    DefinitionsNotFound {
        /// Expected path
        path: String,
    },

    /// I/O error while accessing source definitions
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl SourceError {
    /// True for failures that come from talking to a provider during a search,
    /// as opposed to configuration problems.
    #[must_use]
    pub fn is_provider_error(&self) -> bool {
        matches!(
            self,
            Self::Http(_)
                | Self::Api { .. }
                | Self::Parse { .. }
                | Self::Cancelled { .. }
                | Self::TimedOut { .. }
        )
    }
}

/// Result type for source operations.
pub type Result<T> = std::result::Result<T, SourceError>;
