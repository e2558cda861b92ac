//! Leadscout Core - Foundation crate for the leadscout lead search workspace.
//!
//! This crate provides the shared data model, error handling and
//! configuration management that the source, search and match crates
//! depend on.
//!
//! # Modules
//!
//! - [`lead`] - The normalized [`Lead`] record and its status lifecycle
//! - [`query`] - [`IcpQuery`] search criteria
//! - [`types`] - Shared newtypes and enums (`SourceId`, `MatchStatus`, `Timestamp`)
//! - [`error`] - Central error types using thiserror
//! - [`config`] - TOML-based configuration with XDG paths
//! - [`telemetry`] - Tracing subscriber setup
//!
//! # Example
//!
//! ```rust
//! use leadscout_core::{IcpQuery, Lead, MatchStatus};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let query = IcpQuery::new().with_keywords(["AI"]).with_countries(["US"]);
//! assert!(!query.is_empty());
//!
//! let mut lead = Lead::new("Acme AI").with_company_id("acme-1");
//! lead.transition(MatchStatus::Scored, "matched keywords", "matcher")?;
//! assert_eq!(lead.match_status_history().len(), 1);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod config;
pub mod error;
pub mod lead;
pub mod query;
pub mod telemetry;
pub mod types;

// Re-export commonly used types
pub use config::{AppConfig, CaptureConfig, MatchingConfig, SearchConfig, SourcesConfig};
pub use error::{ConfigError, ConfigResult, LeadscoutError, Result};
pub use lead::{normalize_name, DedupKey, Lead, SocialProfiles};
pub use query::IcpQuery;
pub use types::{MatchStatus, MatchStatusRecord, SourceId, Timestamp};
