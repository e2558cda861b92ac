//! Common utilities shared across HTTP-backed adapters.

use crate::definition::SourceDefinition;
use crate::error::{Result, SourceError};
use reqwest::{Client, RequestBuilder};
use std::time::Duration;
use tracing::debug;

/// Build an HTTP client honouring the definition's `timeout_secs` setting.
///
/// # Errors
/// Returns a configuration error if `timeout_secs` is malformed or zero, or
/// the client cannot be created.
pub fn build_http_client(definition: &SourceDefinition, default_timeout_secs: u64) -> Result<Client> {
    let timeout_secs = definition
        .setting_u64("timeout_secs")?
        .unwrap_or(default_timeout_secs);
    if timeout_secs == 0 {
        return Err(definition.config_error("timeout_secs must be at least 1"));
    }

    Client::builder()
        .timeout(Duration::from_secs(timeout_secs))
        .build()
        .map_err(|e| definition.config_error(&format!("failed to create HTTP client: {e}")))
}

/// Send a prepared request and decode the JSON body.
///
/// Non-success statuses become [`SourceError::Api`] carrying the response
/// text; bodies that are not JSON become [`SourceError::Parse`].
pub async fn send_json(source_id: &str, request: RequestBuilder) -> Result<serde_json::Value> {
    let response = request.send().await?;

    let status = response.status();
    if !status.is_success() {
        let error_text = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());
        return Err(SourceError::Api {
            source_id: source_id.to_string(),
            status: status.as_u16(),
            message: error_text,
        });
    }

    let body = response.text().await?;
    debug!(source_id, bytes = body.len(), "received provider response");

    serde_json::from_str(&body).map_err(|e| SourceError::Parse {
        source_id: source_id.to_string(),
        message: format!("response is not valid JSON: {e}"),
    })
}

/// Drop blank entries from a criteria list.
#[must_use]
pub fn non_blank(values: &[String]) -> Vec<String> {
    values
        .iter()
        .map(|v| v.trim())
        .filter(|v| !v.is_empty())
        .map(str::to_string)
        .collect()
}
