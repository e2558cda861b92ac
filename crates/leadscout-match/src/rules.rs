//! Deterministic criteria matcher that needs no model backend.

use crate::context::LeadContext;
use crate::error::Result;
use crate::matcher::{LeadMatcher, MatchVerdict};
use crate::profile::CustomerProfile;
use async_trait::async_trait;
use leadscout_core::{Lead, MatchingConfig};
use serde_json::json;

/// Scores a lead by how many profile axes it satisfies.
///
/// Axes are keywords (company name, industry or summary), sectors (industry),
/// countries and job titles. An axis the profile leaves empty is ignored.
/// The lead qualifies when every non-empty axis matches.
#[derive(Debug, Clone)]
pub struct RuleMatcher {
    model_name: String,
    prompt_version: String,
}

impl RuleMatcher {
    /// Create a matcher reporting the given labels.
    #[must_use]
    pub fn new(model_name: impl Into<String>, prompt_version: impl Into<String>) -> Self {
        Self {
            model_name: model_name.into(),
            prompt_version: prompt_version.into(),
        }
    }

    /// Create a matcher labelled from the `[matching]` configuration section.
    #[must_use]
    pub fn from_config(config: &MatchingConfig) -> Self {
        Self::new(config.model_name.clone(), config.prompt_version.clone())
    }

    fn evaluate(profile: &CustomerProfile, lead: &Lead, context: &LeadContext) -> MatchVerdict {
        let haystack = [
            context.company.name.as_deref(),
            context.company.industry.as_deref(),
            lead.summary.as_deref(),
        ]
        .into_iter()
        .flatten()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join(" ");

        let axes = [
            ("keywords", axis(&profile.keywords, Some(haystack.as_str()))),
            ("sectors", axis(&profile.sectors, context.company.industry.as_deref())),
            ("countries", axis(&profile.countries, context.company.country.as_deref())),
            ("job_titles", axis(&profile.job_titles, context.contact.job_title.as_deref())),
        ];

        let checked: Vec<_> = axes
            .iter()
            .filter_map(|(name, hit)| hit.map(|hit| (*name, hit)))
            .collect();
        let matched: Vec<_> = checked.iter().filter(|(_, hit)| *hit).map(|(n, _)| *n).collect();
        let missed: Vec<_> = checked.iter().filter(|(_, hit)| !*hit).map(|(n, _)| *n).collect();

        #[allow(clippy::cast_precision_loss)]
        let score = if checked.is_empty() {
            0.0
        } else {
            matched.len() as f64 / checked.len() as f64
        };

        let qualified = !checked.is_empty() && missed.is_empty();
        let reason = if checked.is_empty() {
            "profile has no criteria to match".to_string()
        } else if qualified {
            format!("matches {}", matched.join(", "))
        } else {
            format!("does not match {}", missed.join(", "))
        };

        MatchVerdict {
            qualified,
            reason,
            score: Some(score),
            score_detail: Some(json!({ "matched": matched, "missed": missed })),
        }
    }
}

/// `None` when the profile sets no values for the axis.
fn axis(wanted: &[String], actual: Option<&str>) -> Option<bool> {
    let wanted: Vec<String> = wanted
        .iter()
        .map(|w| w.trim().to_lowercase())
        .filter(|w| !w.is_empty())
        .collect();
    if wanted.is_empty() {
        return None;
    }

    let actual = actual.map(str::to_lowercase).unwrap_or_default();
    Some(wanted.iter().any(|w| actual.contains(w.as_str())))
}

#[async_trait]
impl LeadMatcher for RuleMatcher {
    async fn match_lead(
        &self,
        profile: &CustomerProfile,
        lead: &Lead,
        context: &LeadContext,
    ) -> Result<MatchVerdict> {
        Ok(Self::evaluate(profile, lead, context))
    }

    fn model_name(&self) -> &str {
        &self.model_name
    }

    fn prompt_version(&self) -> &str {
        &self.prompt_version
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile() -> CustomerProfile {
        let mut profile = CustomerProfile::new("cust-1");
        profile.keywords = vec!["AI".to_string()];
        profile.countries = vec!["US".to_string()];
        profile
    }

    #[tokio::test]
    async fn test_qualifies_when_every_axis_matches() {
        let mut lead = Lead::new("Acme AI");
        lead.company_country = Some("US".to_string());
        let matcher = RuleMatcher::from_config(&MatchingConfig::default());

        let verdict = matcher
            .match_lead(&profile(), &lead, &LeadContext::from_lead(&lead))
            .await
            .expect("rule verdict");

        assert!(verdict.qualified);
        assert_eq!(verdict.score, Some(1.0));
        assert_eq!(verdict.reason, "matches keywords, countries");
        assert_eq!(matcher.model_name(), "gpt-3.5-turbo");
    }

    #[tokio::test]
    async fn test_partial_match_is_rejected_with_score() {
        let mut lead = Lead::new("Acme AI");
        lead.company_country = Some("Germany".to_string());
        let matcher = RuleMatcher::new("rules", "v1");

        let verdict = matcher
            .match_lead(&profile(), &lead, &LeadContext::from_lead(&lead))
            .await
            .expect("rule verdict");

        assert!(!verdict.qualified);
        assert_eq!(verdict.score, Some(0.5));
        assert_eq!(verdict.reason, "does not match countries");
    }

    #[tokio::test]
    async fn test_empty_profile_never_qualifies() {
        let lead = Lead::new("Acme");
        let verdict = RuleMatcher::new("rules", "v1")
            .match_lead(
                &CustomerProfile::new("cust-1"),
                &lead,
                &LeadContext::from_lead(&lead),
            )
            .await
            .expect("rule verdict");

        assert!(!verdict.qualified);
        assert_eq!(verdict.score, Some(0.0));
    }
}
