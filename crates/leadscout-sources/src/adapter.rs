//! The capability every data source implements.

use crate::error::Result;
use async_trait::async_trait;
use leadscout_core::{IcpQuery, Lead};
use serde::{Deserialize, Serialize};

/// A single external or internal lead source.
///
/// Implementations must be safe to call concurrently: the same adapter
/// instance may serve overlapping searches.
#[async_trait]
pub trait SourceAdapter: Send + Sync {
    /// Search the source for up to `limit` leads matching `query`.
    ///
    /// Ordinary provider failures (transport errors, non-success statuses,
    /// malformed payloads) come back as `Err`, never as a panic.
    ///
    /// # Errors
    /// Returns error if the provider call fails or its payload can't be mapped.
    async fn search(&self, query: &IcpQuery, limit: usize) -> Result<Vec<Lead>>;

    /// Whether the adapter has what it needs to run. Fixed at construction.
    fn is_available(&self) -> bool;

    /// Human-readable name of the source.
    fn name(&self) -> &str;

    /// Adapter type selector this instance was built from.
    fn adapter_type(&self) -> &str;

    /// Summary of the adapter for listings.
    fn info(&self) -> AdapterInfo {
        AdapterInfo {
            name: self.name().to_string(),
            adapter_type: self.adapter_type().to_string(),
            available: self.is_available(),
        }
    }
}

/// Descriptive summary of an adapter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdapterInfo {
    /// Human-readable name
    pub name: String,
    /// Adapter type selector
    pub adapter_type: String,
    /// Availability flag
    pub available: bool,
}
