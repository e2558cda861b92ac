//! Clay people/company search API adapter.

use super::common::{build_http_client, non_blank, send_json};
use crate::adapter::SourceAdapter;
use crate::capture::{capture_best_effort, RawCapture};
use crate::definition::SourceDefinition;
use crate::error::{Result, SourceError};
use crate::extract;
use async_trait::async_trait;
use leadscout_core::{IcpQuery, Lead};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, warn};

/// Adapter type selector for [`ClayAdapter`].
pub const ADAPTER_TYPE: &str = "clay";

const DEFAULT_BASE_URL: &str = "https://api.clay.com/v1";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Clay search adapter.
///
/// Settings: `api_key` (required for availability), `base_url`,
/// `timeout_secs`.
pub struct ClayAdapter {
    source_id: String,
    name: String,
    api_key: Option<String>,
    base_url: String,
    client: Client,
    capture: Arc<dyn RawCapture>,
}

#[derive(Debug, Serialize)]
struct ClaySearchRequest {
    limit: usize,
    filters: ClayFilters,
}

#[derive(Debug, Default, Serialize)]
struct ClayFilters {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    keywords: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    countries: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    industries: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    company_size: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ClaySearchResponse {
    Wrapped { results: Vec<Value> },
    Bare(Vec<Value>),
}

impl ClayAdapter {
    /// Build the adapter from its source definition.
    ///
    /// A missing or placeholder `api_key` does not fail construction; the
    /// adapter is built unavailable instead.
    ///
    /// # Errors
    /// Returns a configuration error if a setting is malformed.
    pub fn from_definition(
        definition: &SourceDefinition,
        capture: Arc<dyn RawCapture>,
    ) -> Result<Self> {
        let base_url = definition
            .setting_str("base_url")
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
            .trim_end_matches('/')
            .to_string();

        let api_key = definition.setting_str("api_key");
        if api_key.is_none() {
            debug!(source_id = %definition.id, "no Clay API key configured, adapter unavailable");
        }

        Ok(Self {
            source_id: definition.id.to_string(),
            name: definition.name.clone(),
            api_key,
            base_url,
            client: build_http_client(definition, DEFAULT_TIMEOUT_SECS)?,
            capture,
        })
    }

    fn to_api_request(query: &IcpQuery, limit: usize) -> ClaySearchRequest {
        ClaySearchRequest {
            limit,
            filters: ClayFilters {
                keywords: non_blank(&query.keywords),
                countries: non_blank(&query.countries),
                industries: non_blank(&query.sectors),
                company_size: query
                    .company_size
                    .as_deref()
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .map(str::to_string),
            },
        }
    }

    fn to_lead(&self, item: serde_json::Map<String, Value>) -> Lead {
        let mut lead = Lead::default();
        lead.source = Some(self.source_id.clone());
        lead.company_id = extract::extract_id(&item);
        lead.company_name = extract::extract_name(&item);
        lead.company_domain = extract::extract_domain(&item);
        lead.company_industry = extract::extract_industry(&item);
        lead.work_email = extract::extract_email(&item);
        lead.company_size = extract::first_present(&item, &["company_size", "size"]);
        lead.company_country = extract::first_present(&item, &["country", "company_country"]);
        lead.context = item;
        lead
    }

    fn map_results(&self, payload: Value, limit: usize) -> Result<Vec<Lead>> {
        let items = match serde_json::from_value(payload) {
            Ok(ClaySearchResponse::Wrapped { results }) => results,
            Ok(ClaySearchResponse::Bare(items)) => items,
            Err(e) => {
                return Err(SourceError::Parse {
                    source_id: self.source_id.clone(),
                    message: format!("expected a results array: {e}"),
                })
            }
        };

        let mut skipped = 0usize;
        let leads: Vec<Lead> = items
            .into_iter()
            .filter_map(|item| match item {
                Value::Object(map) => Some(self.to_lead(map)),
                _ => {
                    skipped += 1;
                    None
                }
            })
            .take(limit)
            .collect();

        if skipped > 0 {
            warn!(source_id = %self.source_id, skipped, "ignored non-object result items");
        }

        Ok(leads)
    }
}

#[async_trait]
impl SourceAdapter for ClayAdapter {
    async fn search(&self, query: &IcpQuery, limit: usize) -> Result<Vec<Lead>> {
        let Some(api_key) = self.api_key.as_deref() else {
            debug!(source_id = %self.source_id, "search on unavailable adapter");
            return Ok(Vec::new());
        };

        if limit == 0 {
            return Ok(Vec::new());
        }

        let api_request = Self::to_api_request(query, limit);

        let request = self
            .client
            .post(format!("{}/search", self.base_url))
            .header("Authorization", format!("Bearer {api_key}"))
            .header("Content-Type", "application/json")
            .json(&api_request);

        let payload = send_json(&self.source_id, request).await?;
        capture_best_effort(self.capture.as_ref(), &self.name, &payload).await;

        self.map_results(payload, limit)
    }

    fn is_available(&self) -> bool {
        self.api_key.is_some()
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn adapter_type(&self) -> &str {
        ADAPTER_TYPE
    }
}
