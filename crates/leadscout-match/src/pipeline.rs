//! Batch matching of leads against a customer profile.

use crate::context::LeadContext;
use crate::error::{MatchError, Result};
use crate::matcher::{LeadMatcher, MatchVerdict};
use crate::profile::CustomerProfile;
use futures::stream::{self, StreamExt};
use leadscout_core::{DedupKey, Lead, MatchStatus, MatchingConfig, Timestamp};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Default number of matcher calls in flight.
pub const DEFAULT_MAX_CONCURRENT: usize = 4;

/// Record source for verdicts that came back from the matcher.
pub const SOURCE_MODEL: &str = "model";

/// Record source for leads whose matcher call failed.
pub const SOURCE_ERROR: &str = "error";

/// One matching result, as it would be persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchRecord {
    /// Customer the lead was matched for
    pub customer_id: String,
    /// Company ID, or normalized name, of the lead
    pub lead_key: Option<String>,
    /// Whether the lead was recommended
    pub qualified: bool,
    /// Verdict reason, or the failure message
    pub reason: String,
    /// `model` or `error`
    pub source: String,
    /// Model name reported by the matcher
    pub model: String,
    /// Prompt version reported by the matcher
    pub prompt_version: String,
    /// When the result was produced
    pub timestamp: Timestamp,
}

/// Output of [`MatchPipeline::run`].
#[derive(Debug, Clone, Default)]
pub struct MatchOutcome {
    /// Leads in input order, with updated status and score
    pub leads: Vec<Lead>,
    /// One record per lead, in input order
    pub records: Vec<MatchRecord>,
}

impl MatchOutcome {
    /// Leads that reached `recommended`.
    pub fn recommended(&self) -> impl Iterator<Item = &Lead> {
        self.leads
            .iter()
            .filter(|lead| lead.match_status() == MatchStatus::Recommended)
    }
}

/// Runs a [`LeadMatcher`] over a batch of leads and applies the verdicts.
pub struct MatchPipeline {
    matcher: Arc<dyn LeadMatcher>,
    max_concurrent: usize,
}

impl MatchPipeline {
    /// Create a pipeline around `matcher`.
    #[must_use]
    pub fn new(matcher: Arc<dyn LeadMatcher>) -> Self {
        Self {
            matcher,
            max_concurrent: DEFAULT_MAX_CONCURRENT,
        }
    }

    /// Create a pipeline using the `[matching]` configuration section.
    #[must_use]
    pub fn from_config(matcher: Arc<dyn LeadMatcher>, config: &MatchingConfig) -> Self {
        Self::new(matcher).with_max_concurrent(config.max_concurrent)
    }

    /// Set the maximum number of matcher calls in flight. Zero is treated as one.
    #[must_use]
    pub fn with_max_concurrent(mut self, max: usize) -> Self {
        self.max_concurrent = max.max(1);
        self
    }

    /// Match every lead against `profile`.
    ///
    /// A matcher failure on one lead is recorded and leaves that lead's
    /// status unchanged; it never fails the batch.
    ///
    /// # Errors
    /// Returns [`MatchError::InvalidInput`] if the profile has no customer ID.
    pub async fn run(&self, profile: &CustomerProfile, leads: Vec<Lead>) -> Result<MatchOutcome> {
        if profile.is_anonymous() {
            return Err(MatchError::InvalidInput(
                "customer_id must not be empty".to_string(),
            ));
        }

        info!(
            customer_id = %profile.customer_id,
            leads = leads.len(),
            model = self.matcher.model_name(),
            "matching leads"
        );

        let judged: Vec<(Lead, Result<MatchVerdict>)> = stream::iter(leads)
            .map(|lead| async move {
                let context = LeadContext::from_lead(&lead);
                let verdict = self.matcher.match_lead(profile, &lead, &context).await;
                (lead, verdict)
            })
            .buffered(self.max_concurrent.max(1))
            .collect()
            .await;

        let mut outcome = MatchOutcome::default();

        for (mut lead, verdict) in judged {
            let record = match verdict {
                Ok(verdict) => self.apply_verdict(profile, &mut lead, verdict)?,
                Err(e) => {
                    warn!(
                        customer_id = %profile.customer_id,
                        company = lead.company_name.as_deref().unwrap_or("<unnamed>"),
                        error = %e,
                        "matcher call failed"
                    );
                    self.record(profile, &lead, false, format!("model call failed: {e}"), SOURCE_ERROR)
                }
            };

            outcome.records.push(record);
            outcome.leads.push(lead);
        }

        info!(
            customer_id = %profile.customer_id,
            recommended = outcome.recommended().count(),
            failed = outcome.records.iter().filter(|r| r.source == SOURCE_ERROR).count(),
            "matching finished"
        );

        Ok(outcome)
    }

    fn apply_verdict(
        &self,
        profile: &CustomerProfile,
        lead: &mut Lead,
        verdict: MatchVerdict,
    ) -> Result<MatchRecord> {
        let actor = self.matcher.model_name().to_string();

        if lead.match_status() < MatchStatus::Scored {
            lead.transition(MatchStatus::Scored, verdict.reason.clone(), actor.clone())?;
        }
        if verdict.qualified && lead.match_status() < MatchStatus::Recommended {
            lead.transition(MatchStatus::Recommended, verdict.reason.clone(), actor)?;
        }

        lead.lead_score = verdict.score;
        lead.score_detail = verdict.score_detail;

        debug!(
            company = lead.company_name.as_deref().unwrap_or("<unnamed>"),
            qualified = verdict.qualified,
            status = %lead.match_status(),
            "applied verdict"
        );

        Ok(self.record(profile, lead, verdict.qualified, verdict.reason, SOURCE_MODEL))
    }

    fn record(
        &self,
        profile: &CustomerProfile,
        lead: &Lead,
        qualified: bool,
        reason: String,
        source: &str,
    ) -> MatchRecord {
        MatchRecord {
            customer_id: profile.customer_id.clone(),
            lead_key: lead.dedup_key().map(|key| match key {
                DedupKey::Id(value) | DedupKey::Name(value) => value,
            }),
            qualified,
            reason,
            source: source.to_string(),
            model: self.matcher.model_name().to_string(),
            prompt_version: self.matcher.prompt_version().to_string(),
            timestamp: Timestamp::now(),
        }
    }
}
