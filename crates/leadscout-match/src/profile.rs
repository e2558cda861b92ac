//! Customer profile a lead is matched against.

use leadscout_core::IcpQuery;
use serde::{Deserialize, Serialize};

/// The ideal customer a set of leads is judged against.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CustomerProfile {
    /// Customer the profile belongs to
    pub customer_id: String,
    /// Product or company keywords
    pub keywords: Vec<String>,
    /// Target countries
    pub countries: Vec<String>,
    /// Target sectors
    pub sectors: Vec<String>,
    /// Target contact job titles
    pub job_titles: Vec<String>,
    /// Company size bucket
    pub company_size: Option<String>,
}

impl CustomerProfile {
    /// Create an empty profile for `customer_id`.
    #[must_use]
    pub fn new(customer_id: impl Into<String>) -> Self {
        Self {
            customer_id: customer_id.into(),
            ..Self::default()
        }
    }

    /// Build a profile from the query that produced the leads.
    #[must_use]
    pub fn from_query(customer_id: impl Into<String>, query: &IcpQuery) -> Self {
        Self {
            customer_id: customer_id.into(),
            keywords: query.keywords.clone(),
            countries: query.countries.clone(),
            sectors: query.sectors.clone(),
            job_titles: query.job_titles.clone(),
            company_size: query.company_size.clone(),
        }
    }

    /// Search criteria equivalent to this profile, owned by the customer.
    #[must_use]
    pub fn to_query(&self) -> IcpQuery {
        let mut query = IcpQuery::new()
            .with_agent_id(self.customer_id.clone())
            .with_keywords(self.keywords.iter().cloned())
            .with_countries(self.countries.iter().cloned())
            .with_sectors(self.sectors.iter().cloned())
            .with_job_titles(self.job_titles.iter().cloned());
        query.company_size.clone_from(&self.company_size);
        query
    }

    /// True when the customer ID is blank.
    #[must_use]
    pub fn is_anonymous(&self) -> bool {
        self.customer_id.trim().is_empty()
    }
}
