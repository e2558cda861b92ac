//! The model-call boundary and its verdict type.

use crate::context::LeadContext;
use crate::error::Result;
use crate::profile::CustomerProfile;
use async_trait::async_trait;
use leadscout_core::Lead;
use serde::{Deserialize, Serialize};

/// Trait for backends that judge whether a lead fits a customer.
///
/// Implementations wrap a model call (or any other scorer) and must be
/// thread-safe, since the pipeline calls them concurrently.
#[async_trait]
pub trait LeadMatcher: Send + Sync {
    /// Judge one lead against the profile.
    ///
    /// # Errors
    /// Returns error if the backend call fails or its answer can't be read.
    async fn match_lead(
        &self,
        profile: &CustomerProfile,
        lead: &Lead,
        context: &LeadContext,
    ) -> Result<MatchVerdict>;

    /// Model name recorded on every result.
    fn model_name(&self) -> &str;

    /// Prompt version recorded on every result.
    fn prompt_version(&self) -> &str;
}

/// A matcher's judgement of one lead.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MatchVerdict {
    /// Whether the lead should be recommended
    pub qualified: bool,
    /// Explanation for the judgement
    pub reason: String,
    /// Optional numeric score
    pub score: Option<f64>,
    /// Optional structured breakdown of the score
    pub score_detail: Option<serde_json::Value>,
}

impl MatchVerdict {
    /// A positive verdict.
    #[must_use]
    pub fn qualified(reason: impl Into<String>) -> Self {
        Self {
            qualified: true,
            reason: reason.into(),
            ..Self::default()
        }
    }

    /// A negative verdict.
    #[must_use]
    pub fn rejected(reason: impl Into<String>) -> Self {
        Self {
            qualified: false,
            reason: reason.into(),
            ..Self::default()
        }
    }

    /// Attach a numeric score.
    #[must_use]
    pub fn with_score(mut self, score: f64) -> Self {
        self.score = Some(score);
        self
    }

    /// Attach a structured score breakdown.
    #[must_use]
    pub fn with_score_detail(mut self, detail: serde_json::Value) -> Self {
        self.score_detail = Some(detail);
        self
    }
}
