//! Leadscout Sources - Data source adapters and their registry.
//!
//! This crate defines the contract every lead source implements, loads
//! declarative source lists, builds adapters through a type-keyed factory and
//! keeps them in a registry the search orchestrator draws from.
//!
//! # Architecture
//!
//! - **Adapter contract** ([`adapter`]): the [`SourceAdapter`] capability trait
//! - **Definitions** ([`definition`]): one TOML entry per source with free-form settings
//! - **Loader** ([`loader`]): TOML source lists from a file or directory
//! - **Factory** ([`factory`]): adapter-type selector to constructor
//! - **Registry** ([`registry`]): constructed adapters in registration order
//! - **Raw capture** ([`capture`]): best-effort side channel for provider payloads
//! - **Adapters** ([`adapters`]): Clay HTTP API and the internal contact store
//!
//! # Example
//!
//! ```rust,no_run
//! use leadscout_sources::{AdapterContext, AdapterFactory, AdapterRegistry, SourceLoader};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let loader = SourceLoader::new("sources.toml")?;
//! let registry = AdapterRegistry::load_from(
//!     &loader,
//!     &AdapterFactory::with_builtin_adapters(),
//!     &AdapterContext::default(),
//! )?;
//!
//! for source in registry.list_available() {
//!     println!("{} ({}): available={}", source.name, source.id, source.available);
//! }
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod adapter;
pub mod adapters;
pub mod capture;
pub mod definition;
pub mod error;
pub mod extract;
pub mod factory;
pub mod loader;
pub mod registry;

// Re-export commonly used types
pub use adapter::{AdapterInfo, SourceAdapter};
pub use adapters::{ClayAdapter, InternalDbAdapter};
pub use capture::{FileRawCapture, NoopRawCapture, RawCapture};
pub use definition::SourceDefinition;
pub use error::{Result, SourceError};
pub use factory::{AdapterConstructor, AdapterContext, AdapterFactory};
pub use loader::SourceLoader;
pub use registry::{AdapterRegistry, RegisteredSource, SourceSummary};
