//! Leadscout Match - judging leads against a customer profile.
//!
//! The model call itself sits behind the [`LeadMatcher`] trait. The
//! [`MatchPipeline`] runs a matcher over a batch of leads, moves each lead
//! through its status lifecycle and produces one [`MatchRecord`] per lead.
//!
//! # Modules
//!
//! - [`matcher`] - The [`LeadMatcher`] trait and [`MatchVerdict`]
//! - [`pipeline`] - Batch matching with bounded concurrency
//! - [`profile`] - [`CustomerProfile`] criteria
//! - [`context`] - [`LeadContext`] built from a lead
//! - [`rules`] - A deterministic criteria matcher
//! - [`error`] - Error types using thiserror
//!
//! # Example
//!
//! ```rust
//! use leadscout_core::{Lead, MatchStatus, MatchingConfig};
//! use leadscout_match::{CustomerProfile, MatchPipeline, RuleMatcher};
//! use std::sync::Arc;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = MatchingConfig::default();
//! let pipeline = MatchPipeline::from_config(Arc::new(RuleMatcher::from_config(&config)), &config);
//!
//! let mut profile = CustomerProfile::new("cust-1");
//! profile.keywords = vec!["AI".to_string()];
//!
//! let outcome = pipeline.run(&profile, vec![Lead::new("Acme AI")]).await?;
//! assert_eq!(outcome.leads[0].match_status(), MatchStatus::Recommended);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod context;
pub mod error;
pub mod matcher;
pub mod pipeline;
pub mod profile;
pub mod rules;

// Re-export commonly used types
pub use context::{CompanyContext, ContactContext, LeadContext};
pub use error::{MatchError, Result};
pub use matcher::{LeadMatcher, MatchVerdict};
pub use pipeline::{MatchOutcome, MatchPipeline, MatchRecord, SOURCE_ERROR, SOURCE_MODEL};
pub use profile::CustomerProfile;
pub use rules::RuleMatcher;
