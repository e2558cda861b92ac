//! The normalized lead record produced by every source adapter.
//!
//! A [`Lead`] is created with status [`MatchStatus::Raw`]. Its status only
//! moves forward through [`Lead::transition`], and every move is appended to
//! the status history.

use crate::error::{LeadscoutError, Result};
use crate::types::{MatchStatus, MatchStatusRecord, Timestamp};
use serde::{Deserialize, Serialize};

/// Social-profile handles of a contact.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
#[allow(missing_docs)]
pub struct SocialProfiles {
    pub facebook: Option<String>,
    pub linkedin: Option<String>,
    pub twitter: Option<String>,
    pub instagram: Option<String>,
    pub youtube: Option<String>,
    pub tiktok: Option<String>,
    pub pinterest: Option<String>,
    pub reddit: Option<String>,
    pub google_map: Option<String>,
    pub line: Option<String>,
    pub whatsapp: Option<String>,
    pub zalo: Option<String>,
    pub telegram: Option<String>,
}

/// A normalized sales lead: one company and, optionally, one contact there.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Lead {
    /// Agent/ICP the lead was searched for
    pub icp_id: Option<String>,
    /// Registry ID of the source that produced the lead
    pub source: Option<String>,

    /// Provider-issued company identifier
    pub company_id: Option<String>,
    /// Company name
    pub company_name: Option<String>,
    /// Company web domain or homepage
    pub company_domain: Option<String>,
    /// Company industry
    pub company_industry: Option<String>,
    /// Free-form company location
    pub company_location: Option<String>,
    /// Company country name
    pub company_country: Option<String>,
    /// Company country code
    pub company_country_code: Option<String>,
    /// Company size bucket
    pub company_size: Option<String>,

    /// Contact full name
    pub full_name: Option<String>,
    /// Contact job title
    pub job_title: Option<String>,
    /// Contact seniority
    pub seniority: Option<String>,
    /// Contact department
    pub department: Option<String>,
    /// Contact work email
    pub work_email: Option<String>,
    /// Contact personal email
    pub personal_email: Option<String>,
    /// Contact language
    pub language: Option<String>,
    /// Contact phone numbers
    pub tels: Vec<String>,
    /// Contact social handles
    #[serde(flatten)]
    pub social: SocialProfiles,
    /// Contact biography
    pub summary: Option<String>,
    /// Education history
    pub educations: Vec<String>,
    /// Employment history
    pub jobs: Vec<String>,

    /// Source-specific payload
    pub context: serde_json::Map<String, serde_json::Value>,

    /// Numeric score assigned by a matcher
    pub lead_score: Option<f64>,
    /// Structured score breakdown assigned by a matcher
    pub score_detail: Option<serde_json::Value>,

    match_status: MatchStatus,
    match_status_history: Vec<MatchStatusRecord>,
}

/// Identity used to deduplicate leads across sources.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum DedupKey {
    /// Provider-issued company identifier (trimmed)
    Id(String),
    /// Normalized company name, used when no identifier was issued
    Name(String),
}

impl Lead {
    /// Create an empty raw lead for the named company.
    #[must_use]
    pub fn new(company_name: impl Into<String>) -> Self {
        Self {
            company_name: Some(company_name.into()),
            ..Self::default()
        }
    }

    /// Set the company identifier.
    #[must_use]
    pub fn with_company_id(mut self, id: impl Into<String>) -> Self {
        self.company_id = Some(id.into());
        self
    }

    /// Set the company industry.
    #[must_use]
    pub fn with_industry(mut self, industry: impl Into<String>) -> Self {
        self.company_industry = Some(industry.into());
        self
    }

    /// Set the contact work email.
    #[must_use]
    pub fn with_work_email(mut self, email: impl Into<String>) -> Self {
        self.work_email = Some(email.into());
        self
    }

    /// Set the producing source.
    #[must_use]
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Current match status.
    #[must_use]
    pub fn match_status(&self) -> MatchStatus {
        self.match_status
    }

    /// Status history, oldest first.
    #[must_use]
    pub fn match_status_history(&self) -> &[MatchStatusRecord] {
        &self.match_status_history
    }

    /// Deduplication identity: the company ID when present, otherwise the
    /// normalized company name. `None` when the lead carries neither.
    #[must_use]
    pub fn dedup_key(&self) -> Option<DedupKey> {
        if let Some(id) = self.company_id.as_deref().map(str::trim) {
            if !id.is_empty() {
                return Some(DedupKey::Id(id.to_string()));
            }
        }

        self.company_name
            .as_deref()
            .map(normalize_name)
            .filter(|name| !name.is_empty())
            .map(DedupKey::Name)
    }

    /// Move the lead forward to `to`, appending to the status history.
    ///
    /// Only forward moves are accepted. Skipping a step (raw to recommended)
    /// records both intermediate moves with the same reason and actor.
    ///
    /// # Errors
    /// Returns a validation error, leaving the lead untouched, when `to` is
    /// the current status or an earlier one.
    pub fn transition(
        &mut self,
        to: MatchStatus,
        reason: impl Into<String>,
        updated_by: impl Into<String>,
    ) -> Result<()> {
        if to <= self.match_status {
            return Err(LeadscoutError::Validation(format!(
                "invalid status transition {} -> {to}: status only moves forward",
                self.match_status
            )));
        }

        let reason = reason.into();
        let updated_by = updated_by.into();
        let timestamp = Timestamp::now();

        while self.match_status < to {
            let Some(next) = self.match_status.next() else {
                break;
            };
            self.match_status_history.push(MatchStatusRecord {
                from_status: self.match_status,
                to_status: next,
                reason: reason.clone(),
                updated_by: updated_by.clone(),
                timestamp,
            });
            self.match_status = next;
        }

        Ok(())
    }
}

/// Normalize a company name for identity comparison: trimmed, lowercased,
/// internal whitespace collapsed to single spaces.
#[must_use]
pub fn normalize_name(name: &str) -> String {
    name.split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join(" ")
}
