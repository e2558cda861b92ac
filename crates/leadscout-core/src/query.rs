//! Ideal-customer-profile search criteria.

use serde::{Deserialize, Serialize};

/// Immutable search criteria handed to every source adapter.
///
/// Adapters read the query; nothing in the pipeline mutates it once built.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IcpQuery {
    /// Owning agent identifier
    pub agent_id: Option<String>,
    /// Product or company keywords
    pub keywords: Vec<String>,
    /// Target countries
    pub countries: Vec<String>,
    /// Target sectors/industries
    pub sectors: Vec<String>,
    /// Target contact job titles
    pub job_titles: Vec<String>,
    /// Email fragments to exclude
    pub email_blacklist: Vec<String>,
    /// Allowed customer source channels
    pub customer_sources: Vec<String>,
    /// Company size bucket
    pub company_size: Option<String>,
}

impl IcpQuery {
    /// Create an empty query.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the owning agent.
    #[must_use]
    pub fn with_agent_id(mut self, agent_id: impl Into<String>) -> Self {
        self.agent_id = Some(agent_id.into());
        self
    }

    /// Set the keyword list.
    #[must_use]
    pub fn with_keywords<I, S>(mut self, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.keywords = keywords.into_iter().map(Into::into).collect();
        self
    }

    /// Set the country list.
    #[must_use]
    pub fn with_countries<I, S>(mut self, countries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.countries = countries.into_iter().map(Into::into).collect();
        self
    }

    /// Set the sector list.
    #[must_use]
    pub fn with_sectors<I, S>(mut self, sectors: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.sectors = sectors.into_iter().map(Into::into).collect();
        self
    }

    /// Set the job-title list.
    #[must_use]
    pub fn with_job_titles<I, S>(mut self, job_titles: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.job_titles = job_titles.into_iter().map(Into::into).collect();
        self
    }

    /// Set the email blacklist.
    #[must_use]
    pub fn with_email_blacklist<I, S>(mut self, blacklist: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.email_blacklist = blacklist.into_iter().map(Into::into).collect();
        self
    }

    /// Set the allowed customer source channels.
    #[must_use]
    pub fn with_customer_sources<I, S>(mut self, sources: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.customer_sources = sources.into_iter().map(Into::into).collect();
        self
    }

    /// Set the company size bucket.
    #[must_use]
    pub fn with_company_size(mut self, size: impl Into<String>) -> Self {
        self.company_size = Some(size.into());
        self
    }

    /// True when the query carries no criteria at all.
    ///
    /// The owning agent and the email blacklist are not search criteria.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.keywords.is_empty()
            && self.countries.is_empty()
            && self.sectors.is_empty()
            && self.job_titles.is_empty()
            && self.customer_sources.is_empty()
            && self.company_size.as_deref().map_or(true, |s| s.trim().is_empty())
    }
}
