//! Internal contact store adapter.
//!
//! Posts a query document to the internal contacts endpoint and maps the
//! returned `contacts` collection into raw leads tagged with the query's
//! agent.

use super::common::{build_http_client, non_blank, send_json};
use crate::adapter::SourceAdapter;
use crate::capture::{capture_best_effort, RawCapture};
use crate::definition::SourceDefinition;
use crate::error::{Result, SourceError};
use async_trait::async_trait;
use leadscout_core::{IcpQuery, Lead, SocialProfiles};
use reqwest::Client;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::sync::Arc;

/// Adapter type selector for [`InternalDbAdapter`].
pub const ADAPTER_TYPE: &str = "internal-db";

const DEFAULT_TIMEOUT_SECS: u64 = 60;
const DEFAULT_EXPECT_CNT: u64 = 10;

/// Internal contact store adapter. Always available once constructed.
///
/// Settings: `base_url` (required), `timeout_secs`, `expect_cnt`.
pub struct InternalDbAdapter {
    source_id: String,
    name: String,
    base_url: String,
    expect_cnt: u64,
    client: Client,
    capture: Arc<dyn RawCapture>,
}

#[derive(Debug, Serialize)]
struct ContactQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    agent_id: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    company_type: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    products_keywords: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    countries: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    blacklinks: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    job_title: Vec<String>,
    product_industry: Vec<String>,
    expect_cnt: u64,
    limit: usize,
    offset: usize,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    source: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct ContactsResponse {
    #[serde(default)]
    contacts: Vec<ContactRecord>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ContactRecord {
    #[serde(deserialize_with = "lenient_string")]
    company_id: Option<String>,
    company_name: Option<String>,
    company_domain: Option<String>,
    company_industry: Option<String>,
    company_location: Option<String>,
    company_size: Option<String>,
    company_country: Option<String>,
    company_country_code: Option<String>,
    full_name: Option<String>,
    job_title: Option<String>,
    seniority: Option<String>,
    department: Option<String>,
    work_email: Option<String>,
    personal_email: Option<String>,
    language: Option<String>,
    tels: Option<Vec<String>>,
    #[serde(flatten)]
    social: SocialProfiles,
    summary: Option<String>,
    educations: Option<Vec<String>>,
    jobs: Option<Vec<String>>,
}

/// Accept identifiers the store sometimes returns as numbers.
fn lenient_string<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::String(s)) => Some(s),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}

impl InternalDbAdapter {
    /// Build the adapter from its source definition.
    ///
    /// # Errors
    /// Returns a configuration error if `base_url` is missing or a setting is
    /// malformed.
    pub fn from_definition(
        definition: &SourceDefinition,
        capture: Arc<dyn RawCapture>,
    ) -> Result<Self> {
        let base_url = definition
            .setting_str("base_url")
            .ok_or_else(|| definition.config_error("base_url is required"))?;

        let expect_cnt = definition
            .setting_u64("expect_cnt")?
            .unwrap_or(DEFAULT_EXPECT_CNT);

        Ok(Self {
            source_id: definition.id.to_string(),
            name: definition.name.clone(),
            base_url,
            expect_cnt,
            client: build_http_client(definition, DEFAULT_TIMEOUT_SECS)?,
            capture,
        })
    }

    fn to_query_document(&self, query: &IcpQuery, limit: usize) -> ContactQuery {
        ContactQuery {
            agent_id: query
                .agent_id
                .as_deref()
                .map(str::trim)
                .filter(|a| !a.is_empty())
                .map(str::to_string),
            company_type: non_blank(&query.sectors),
            products_keywords: non_blank(&query.keywords),
            countries: non_blank(&query.countries),
            blacklinks: non_blank(&query.email_blacklist),
            job_title: non_blank(&query.job_titles),
            product_industry: Vec::new(),
            expect_cnt: self.expect_cnt,
            limit,
            offset: 0,
            source: non_blank(&query.customer_sources),
        }
    }

    fn to_lead(&self, record: ContactRecord, query: &IcpQuery) -> Lead {
        let mut lead = Lead::default();
        lead.icp_id.clone_from(&query.agent_id);
        lead.source = Some(self.source_id.clone());
        lead.company_id = record.company_id;
        lead.company_name = record.company_name;
        lead.company_domain = record.company_domain;
        lead.company_industry = record.company_industry;
        lead.company_location = record.company_location;
        lead.company_country = record.company_country;
        lead.company_country_code = record.company_country_code;
        lead.company_size = record.company_size;
        lead.full_name = record.full_name;
        lead.job_title = record.job_title;
        lead.seniority = record.seniority;
        lead.department = record.department;
        lead.work_email = record.work_email;
        lead.personal_email = record.personal_email;
        lead.language = record.language;
        lead.tels = record.tels.unwrap_or_default();
        lead.social = record.social;
        lead.summary = record.summary;
        lead.educations = record.educations.unwrap_or_default();
        lead.jobs = record.jobs.unwrap_or_default();
        lead
    }

    fn map_contacts(&self, payload: Value, query: &IcpQuery, limit: usize) -> Result<Vec<Lead>> {
        let response: ContactsResponse =
            serde_json::from_value(payload).map_err(|e| SourceError::Parse {
                source_id: self.source_id.clone(),
                message: format!("unexpected contacts payload: {e}"),
            })?;

        Ok(response
            .contacts
            .into_iter()
            .take(limit)
            .map(|record| self.to_lead(record, query))
            .collect())
    }
}

#[async_trait]
impl SourceAdapter for InternalDbAdapter {
    async fn search(&self, query: &IcpQuery, limit: usize) -> Result<Vec<Lead>> {
        if limit == 0 {
            return Ok(Vec::new());
        }

        let document = self.to_query_document(query, limit);

        let request = self
            .client
            .post(&self.base_url)
            .header("Content-Type", "application/json")
            .json(&document);

        let payload = send_json(&self.source_id, request).await?;
        capture_best_effort(self.capture.as_ref(), &self.name, &payload).await;

        self.map_contacts(payload, query, limit)
    }

    fn is_available(&self) -> bool {
        true
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn adapter_type(&self) -> &str {
        ADAPTER_TYPE
    }
}
