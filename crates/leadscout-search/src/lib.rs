//! Leadscout Search - concurrent multi-source lead retrieval.
//!
//! This crate drives one search round across every available source in an
//! [`leadscout_sources::AdapterRegistry`]: bounded fan-out, per-source
//! failure isolation, and order-preserving merge of the results.
//!
//! # Modules
//!
//! - [`orchestrator`] - [`SearchOrchestrator`] and its options and reports
//! - [`standardizer`] - Pure merge and filter functions over leads
//! - [`error`] - Caller-facing error type
//!
//! # Example
//!
//! ```rust,no_run
//! use leadscout_core::IcpQuery;
//! use leadscout_search::{SearchOptions, SearchOrchestrator};
//! use leadscout_sources::{AdapterContext, AdapterFactory, AdapterRegistry, SourceLoader};
//! use std::sync::Arc;
//! use std::time::Duration;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let loader = SourceLoader::new("sources.toml")?;
//! let registry = AdapterRegistry::load_from(
//!     &loader,
//!     &AdapterFactory::with_builtin_adapters(),
//!     &AdapterContext::default(),
//! )?;
//!
//! let orchestrator = SearchOrchestrator::new(Arc::new(registry));
//! let query = IcpQuery::new().with_keywords(["AI"]).with_countries(["US"]);
//!
//! let options = SearchOptions::new(50)
//!     .with_max_concurrent(2)
//!     .with_timeout(Duration::from_secs(30));
//! let report = orchestrator.search_all_report(&query, options).await?;
//! println!("{} leads from {} sources", report.leads.len(), report.outcomes.len());
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod error;
pub mod orchestrator;
pub mod standardizer;

// Re-export commonly used types
pub use error::{Result, SearchError};
pub use orchestrator::{
    SearchOptions, SearchOrchestrator, SearchReport, SourceOutcome, DEFAULT_LIMIT_PER_SOURCE,
    DEFAULT_MAX_CONCURRENT,
};
pub use standardizer::{filter, merge, FilterCriteria};
