//! Search orchestrator for fanning a query out across registered sources.
//!
//! This module provides the [`SearchOrchestrator`] which runs one adapter
//! call per available source under a counting admission gate, isolates
//! per-source failures, and merges the surviving batches in registration
//! order.

use crate::error::{Result, SearchError};
use crate::standardizer;
use leadscout_core::{IcpQuery, Lead, SearchConfig, SourceId};
use leadscout_sources::{AdapterRegistry, SourceAdapter, SourceError, SourceSummary};
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{OwnedSemaphorePermit, Semaphore};
use tokio::task::JoinHandle;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::{debug, debug_span, error, info, info_span, warn, Instrument};
use uuid::Uuid;

/// Default number of adapter calls admitted at once.
pub const DEFAULT_MAX_CONCURRENT: usize = 4;

/// Default result limit handed to each adapter.
pub const DEFAULT_LIMIT_PER_SOURCE: usize = 100;

/// Per-call knobs for a search round.
#[derive(Debug, Clone)]
pub struct SearchOptions {
    /// Result limit handed to each adapter
    pub limit_per_source: usize,
    /// Maximum adapter calls in flight
    pub max_concurrent: usize,
    /// Deadline for the whole round
    pub timeout: Option<Duration>,
    /// Caller-held cancellation token
    pub cancel: Option<CancellationToken>,
}

impl SearchOptions {
    /// Options with the given per-source limit and default concurrency.
    #[must_use]
    pub fn new(limit_per_source: usize) -> Self {
        Self {
            limit_per_source,
            max_concurrent: DEFAULT_MAX_CONCURRENT,
            timeout: None,
            cancel: None,
        }
    }

    /// Set the admission gate size.
    #[must_use]
    pub fn with_max_concurrent(mut self, max: usize) -> Self {
        self.max_concurrent = max;
        self
    }

    /// Bound the whole round by `timeout`.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Stop the round when `token` is cancelled.
    #[must_use]
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancel = Some(token);
        self
    }
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self::new(DEFAULT_LIMIT_PER_SOURCE)
    }
}

/// Result of searching a single source within a round.
#[derive(Debug, Clone, Serialize)]
pub struct SourceOutcome {
    /// Source that was searched
    pub source_id: SourceId,
    /// Number of leads it contributed before deduplication
    pub leads_count: usize,
    /// Error message if the source failed or was never started
    pub error: Option<String>,
    /// Time from admission to completion
    pub elapsed: Duration,
}

impl SourceOutcome {
    /// True when the source returned without error.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.error.is_none()
    }
}

/// Everything a search round produced.
#[derive(Debug, Clone, Serialize)]
pub struct SearchReport {
    /// Round identifier, also attached to the round's tracing span
    pub search_id: Uuid,
    /// Merged, deduplicated leads
    pub leads: Vec<Lead>,
    /// One entry per selected source, in registration order
    pub outcomes: Vec<SourceOutcome>,
    /// Registered sources skipped as unavailable
    pub skipped: Vec<SourceId>,
}

impl SearchReport {
    fn empty(search_id: Uuid) -> Self {
        Self {
            search_id,
            leads: Vec::new(),
            outcomes: Vec::new(),
            skipped: Vec::new(),
        }
    }

    /// Outcomes of sources that failed.
    pub fn failures(&self) -> impl Iterator<Item = &SourceOutcome> {
        self.outcomes.iter().filter(|o| !o.is_success())
    }
}

/// Orchestrates search rounds across the sources of one registry.
pub struct SearchOrchestrator {
    /// Registry the sources are drawn from
    registry: Arc<AdapterRegistry>,
    /// Default admission gate size
    max_concurrent: usize,
    /// Default per-source limit
    limit_per_source: usize,
    /// Default round deadline
    timeout: Option<Duration>,
}

impl SearchOrchestrator {
    /// Create a new orchestrator with default settings.
    #[must_use]
    pub fn new(registry: Arc<AdapterRegistry>) -> Self {
        Self {
            registry,
            max_concurrent: DEFAULT_MAX_CONCURRENT,
            limit_per_source: DEFAULT_LIMIT_PER_SOURCE,
            timeout: None,
        }
    }

    /// Create an orchestrator using the `[search]` configuration section.
    #[must_use]
    pub fn from_config(registry: Arc<AdapterRegistry>, config: &SearchConfig) -> Self {
        Self {
            registry,
            max_concurrent: config.max_concurrent,
            limit_per_source: config.limit_per_source,
            timeout: config.timeout_secs.map(Duration::from_secs),
        }
    }

    /// Set the default maximum number of concurrent adapter calls.
    #[must_use]
    pub fn with_max_concurrent(mut self, max: usize) -> Self {
        self.max_concurrent = max;
        self
    }

    /// Set the default round deadline.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// The registry this orchestrator searches.
    #[must_use]
    pub fn registry(&self) -> &Arc<AdapterRegistry> {
        &self.registry
    }

    /// Options carrying this orchestrator's defaults.
    #[must_use]
    pub fn default_options(&self) -> SearchOptions {
        SearchOptions {
            limit_per_source: self.limit_per_source,
            max_concurrent: self.max_concurrent,
            timeout: self.timeout,
            cancel: None,
        }
    }

    /// Every registered source with its availability.
    #[must_use]
    pub fn list_available_sources(&self) -> Vec<SourceSummary> {
        self.registry.list_available()
    }

    /// Search every available source and return the merged leads.
    ///
    /// # Errors
    /// Returns [`SearchError::InvalidInput`] if the configured concurrency is
    /// zero. Source failures are never returned.
    pub async fn search_all(&self, query: &IcpQuery, limit_per_source: usize) -> Result<Vec<Lead>> {
        let options = SearchOptions {
            limit_per_source,
            ..self.default_options()
        };
        self.search_all_with(query, options).await
    }

    /// Search every available source with explicit options.
    ///
    /// # Errors
    /// Returns [`SearchError::InvalidInput`] if `options.max_concurrent` is zero.
    pub async fn search_all_with(&self, query: &IcpQuery, options: SearchOptions) -> Result<Vec<Lead>> {
        Ok(self.search_all_report(query, options).await?.leads)
    }

    /// Search every available source and report per-source outcomes.
    ///
    /// At most `options.max_concurrent` adapter calls run at once; queued
    /// calls are admitted in registration order. A failing, panicking or
    /// cancelled source contributes nothing and never affects its siblings.
    ///
    /// # Errors
    /// Returns [`SearchError::InvalidInput`] if `options.max_concurrent` is zero.
    pub async fn search_all_report(
        &self,
        query: &IcpQuery,
        options: SearchOptions,
    ) -> Result<SearchReport> {
        if options.max_concurrent == 0 {
            return Err(SearchError::InvalidInput(
                "max_concurrent must be at least 1".to_string(),
            ));
        }

        let search_id = Uuid::new_v4();
        let span = info_span!("search_all", search_id = %search_id);

        Ok(self.run_round(search_id, query, options).instrument(span).await)
    }

    async fn run_round(&self, search_id: Uuid, query: &IcpQuery, options: SearchOptions) -> SearchReport {
        if query.is_empty() {
            warn!("query carries no criteria, returning no leads");
            return SearchReport::empty(search_id);
        }

        let mut report = SearchReport::empty(search_id);
        let mut selected = Vec::new();

        for source in self.registry.sources() {
            if source.is_available() {
                selected.push(source);
            } else {
                warn!(source_id = %source.id(), "source unavailable, skipping");
                report.skipped.push(source.id().clone());
            }
        }

        if selected.is_empty() {
            info!("no available sources");
            return report;
        }

        info!(
            sources = selected.len(),
            skipped = report.skipped.len(),
            max_concurrent = options.max_concurrent,
            limit_per_source = options.limit_per_source,
            "starting search round"
        );

        let query = Arc::new(query.clone());
        let cancel = options.cancel.clone().unwrap_or_default();
        let deadline = options.timeout.map(|t| Instant::now() + t);
        let semaphore = Arc::new(Semaphore::new(options.max_concurrent));

        let mut pending: Vec<(SourceId, Instant, Option<JoinHandle<UnitResult>>)> =
            Vec::with_capacity(selected.len());
        let mut halted: Option<&'static str> = None;

        for source in selected {
            let source_id = source.id().clone();

            if halted.is_none() {
                match admit(&semaphore, &cancel, deadline).await {
                    Ok(permit) => {
                        let handle = tokio::spawn(
                            run_unit(
                                Arc::clone(source.adapter()),
                                source_id.clone(),
                                Arc::clone(&query),
                                options.limit_per_source,
                                cancel.clone(),
                                deadline,
                                Some(permit),
                            )
                            .in_current_span(),
                        );
                        pending.push((source_id, Instant::now(), Some(handle)));
                        continue;
                    }
                    Err(reason) => halted = Some(reason),
                }
            }

            pending.push((source_id, Instant::now(), None));
        }

        let mut batches = Vec::with_capacity(pending.len());

        for (source_id, admitted_at, handle) in pending {
            let Some(handle) = handle else {
                let reason = halted.unwrap_or("round halted");
                debug!(source_id = %source_id, reason, "source not started");
                report.outcomes.push(SourceOutcome {
                    source_id,
                    leads_count: 0,
                    error: Some(format!("not started: {reason}")),
                    elapsed: Duration::ZERO,
                });
                continue;
            };

            let (result, elapsed) = match handle.await {
                Ok(unit) => unit,
                Err(e) => {
                    error!(source_id = %source_id, error = %e, "source task panicked");
                    (Err(e.to_string()), admitted_at.elapsed())
                }
            };

            match result {
                Ok(mut leads) => {
                    for lead in &mut leads {
                        lead.source.get_or_insert_with(|| source_id.to_string());
                    }
                    report.outcomes.push(SourceOutcome {
                        source_id,
                        leads_count: leads.len(),
                        error: None,
                        elapsed,
                    });
                    batches.push(leads);
                }
                Err(message) => {
                    report.outcomes.push(SourceOutcome {
                        source_id,
                        leads_count: 0,
                        error: Some(message),
                        elapsed,
                    });
                }
            }
        }

        report.leads = standardizer::merge(batches);

        info!(
            leads = report.leads.len(),
            failed = report.failures().count(),
            "search round finished"
        );

        report
    }

    /// Search a single source by ID, without the admission gate.
    ///
    /// An empty query, unknown or unavailable sources and provider failures
    /// all yield an empty list with a logged reason.
    pub async fn search_one(&self, source_id: &str, query: &IcpQuery, limit: usize) -> Vec<Lead> {
        if query.is_empty() {
            warn!(source_id, "query carries no criteria, returning no leads");
            return Vec::new();
        }

        let Some(source) = self.registry.get_by_str(source_id) else {
            warn!(source_id, "unknown source");
            return Vec::new();
        };

        if !source.is_available() {
            warn!(source_id, "source unavailable");
            return Vec::new();
        }

        let handle = tokio::spawn(
            run_unit(
                Arc::clone(source.adapter()),
                source.id().clone(),
                Arc::new(query.clone()),
                limit,
                CancellationToken::new(),
                self.timeout.map(|t| Instant::now() + t),
                None,
            )
            .in_current_span(),
        );

        match handle.await {
            Ok((Ok(mut leads), _)) => {
                for lead in &mut leads {
                    lead.source.get_or_insert_with(|| source.id().to_string());
                }
                leads
            }
            Ok((Err(_), _)) => Vec::new(),
            Err(e) => {
                error!(source_id, error = %e, "source task panicked");
                Vec::new()
            }
        }
    }
}

type UnitResult = (std::result::Result<Vec<Lead>, String>, Duration);

/// Wait for a gate permit, or report why the round stopped admitting.
async fn admit(
    semaphore: &Arc<Semaphore>,
    cancel: &CancellationToken,
    deadline: Option<Instant>,
) -> std::result::Result<OwnedSemaphorePermit, &'static str> {
    tokio::select! {
        biased;
        () = cancel.cancelled() => Err("round cancelled"),
        () = expired(deadline) => Err("round timed out"),
        permit = Arc::clone(semaphore).acquire_owned() => permit.map_err(|_| "admission gate closed"),
    }
}

/// One adapter call. The permit is held until this future completes or unwinds.
async fn run_unit(
    adapter: Arc<dyn SourceAdapter>,
    source_id: SourceId,
    query: Arc<IcpQuery>,
    limit: usize,
    cancel: CancellationToken,
    deadline: Option<Instant>,
    permit: Option<OwnedSemaphorePermit>,
) -> UnitResult {
    let _permit = permit;
    let started = Instant::now();
    let span = debug_span!("source", source_id = %source_id);

    async {
        debug!("searching source");

        let result = tokio::select! {
            biased;
            () = cancel.cancelled() => Err(SourceError::Cancelled {
                source_id: source_id.to_string(),
            }),
            () = expired(deadline) => Err(SourceError::TimedOut {
                source_id: source_id.to_string(),
            }),
            result = adapter.search(&query, limit) => result,
        };

        let elapsed = started.elapsed();

        match result {
            Ok(leads) => {
                debug!(count = leads.len(), elapsed_ms = elapsed.as_millis(), "source returned");
                (Ok(leads), elapsed)
            }
            Err(e) => {
                warn!(error = %e, elapsed_ms = elapsed.as_millis(), "source search failed");
                (Err(e.to_string()), elapsed)
            }
        }
    }
    .instrument(span)
    .await
}

async fn expired(deadline: Option<Instant>) {
    match deadline {
        Some(deadline) => tokio::time::sleep_until(deadline).await,
        None => std::future::pending().await,
    }
}
