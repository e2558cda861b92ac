//! Pure functions over lead collections: cross-source merge and view filters.

use leadscout_core::Lead;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// Flatten `batches` in order and drop later duplicates.
///
/// Identity is [`Lead::dedup_key`]. The first occurrence wins and keeps its
/// position; leads without a key are always kept.
#[must_use]
pub fn merge<I>(batches: I) -> Vec<Lead>
where
    I: IntoIterator,
    I::Item: IntoIterator<Item = Lead>,
{
    let mut seen = HashSet::new();

    batches
        .into_iter()
        .flatten()
        .filter(|lead| lead.dedup_key().map_or(true, |key| seen.insert(key)))
        .collect()
}

/// Criteria for [`filter`]. Empty criteria keep everything.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterCriteria {
    /// Lowercased keywords; a lead must have one in its company name
    pub keywords: Vec<String>,
    /// Lowercased industry fragment to require
    pub industry: Option<String>,
    /// Lowercased tokens that disqualify a work email
    pub email_blacklist: Vec<String>,
}

impl FilterCriteria {
    /// Create empty criteria.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build criteria from a loose option map.
    ///
    /// Recognized keys are `keywords`, `industry` and `emailBlacklist`
    /// (`email_blacklist` is accepted too). List values are comma separated.
    /// Unknown keys are ignored.
    #[must_use]
    pub fn from_options<K, V>(options: &HashMap<K, V>) -> Self
    where
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut criteria = Self::new();

        for (key, value) in options {
            match key.as_ref() {
                "keywords" => criteria.keywords = split_list(value.as_ref()),
                "industry" => {
                    criteria.industry = Some(value.as_ref().trim().to_lowercase())
                        .filter(|industry| !industry.is_empty());
                }
                "emailBlacklist" | "email_blacklist" => {
                    criteria.email_blacklist = split_list(value.as_ref());
                }
                _ => {}
            }
        }

        criteria
    }

    /// Require one of the comma-separated `keywords`.
    #[must_use]
    pub fn with_keywords(mut self, keywords: &str) -> Self {
        self.keywords = split_list(keywords);
        self
    }

    /// Require an industry containing `industry`.
    #[must_use]
    pub fn with_industry(mut self, industry: &str) -> Self {
        self.industry = Some(industry.trim().to_lowercase()).filter(|i| !i.is_empty());
        self
    }

    /// Reject work emails containing any of the comma-separated tokens.
    #[must_use]
    pub fn with_email_blacklist(mut self, blacklist: &str) -> Self {
        self.email_blacklist = split_list(blacklist);
        self
    }

    /// True when no criterion is set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.keywords.is_empty() && self.industry.is_none() && self.email_blacklist.is_empty()
    }

    /// Whether `lead` passes every criterion.
    ///
    /// Leads missing an industry or a work email are not rejected on those
    /// axes. A lead without a company name fails any keyword criterion.
    #[must_use]
    pub fn matches(&self, lead: &Lead) -> bool {
        if !self.keywords.is_empty() {
            let Some(name) = lead.company_name.as_deref().map(str::to_lowercase) else {
                return false;
            };
            if !self.keywords.iter().any(|k| name.contains(k.as_str())) {
                return false;
            }
        }

        if let (Some(wanted), Some(industry)) = (&self.industry, lead.company_industry.as_deref()) {
            if !industry.to_lowercase().contains(wanted.as_str()) {
                return false;
            }
        }

        if let Some(email) = lead.work_email.as_deref().map(str::to_lowercase) {
            if self
                .email_blacklist
                .iter()
                .any(|token| email.contains(token.as_str()))
            {
                return false;
            }
        }

        true
    }
}

/// Keep the leads that pass `criteria`, in their original order.
#[must_use]
pub fn filter(leads: &[Lead], criteria: &FilterCriteria) -> Vec<Lead> {
    if criteria.is_empty() {
        return leads.to_vec();
    }

    leads
        .iter()
        .filter(|lead| criteria.matches(lead))
        .cloned()
        .collect()
}

fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|item| item.trim().to_lowercase())
        .filter(|item| !item.is_empty())
        .collect()
}
