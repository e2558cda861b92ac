//! Context handed to the matcher alongside a lead.

use leadscout_core::Lead;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Company facts known about a lead.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompanyContext {
    /// Company name
    pub name: Option<String>,
    /// Company industry
    pub industry: Option<String>,
    /// Company web domain
    pub website: Option<String>,
    /// Company size bucket
    pub size: Option<String>,
    /// Company country
    pub country: Option<String>,
}

/// Contact facts known about a lead.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactContext {
    /// Contact full name
    pub name: Option<String>,
    /// Contact job title
    pub job_title: Option<String>,
    /// Contact location
    pub region: Option<String>,
}

/// Everything the matcher may consult beyond the lead record itself.
///
/// Only facts present on the lead are carried; missing ones stay `None`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LeadContext {
    /// Company facts
    pub company: CompanyContext,
    /// Contact facts
    pub contact: ContactContext,
    /// Source-specific payload copied from the lead
    pub extra: Map<String, Value>,
}

impl LeadContext {
    /// Build the context for `lead`.
    #[must_use]
    pub fn from_lead(lead: &Lead) -> Self {
        Self {
            company: CompanyContext {
                name: lead.company_name.clone(),
                industry: lead.company_industry.clone(),
                website: lead.company_domain.clone(),
                size: lead.company_size.clone(),
                country: lead
                    .company_country
                    .clone()
                    .or_else(|| lead.company_country_code.clone()),
            },
            contact: ContactContext {
                name: lead.full_name.clone(),
                job_title: lead.job_title.clone(),
                region: lead.company_location.clone(),
            },
            extra: lead.context.clone(),
        }
    }
}
