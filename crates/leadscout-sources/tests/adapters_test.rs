//! HTTP-level tests for the reference adapters against mocked providers.

use leadscout_core::{IcpQuery, MatchStatus, SourceId};
use leadscout_sources::{
    ClayAdapter, FileRawCapture, InternalDbAdapter, NoopRawCapture, SourceAdapter,
    SourceDefinition, SourceError,
};
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn clay_definition(base_url: &str) -> SourceDefinition {
    SourceDefinition::new(SourceId::new("clay").expect("valid source ID"), "Clay", "clay")
        .with_setting("api_key", "sk-test")
        .with_setting("base_url", base_url)
}

fn internal_definition(base_url: &str) -> SourceDefinition {
    SourceDefinition::new(
        SourceId::new("internal_db").expect("valid source ID"),
        "InternalDB",
        "internal-db",
    )
    .with_setting("base_url", base_url)
}

fn sample_query() -> IcpQuery {
    IcpQuery::new()
        .with_agent_id("agent-7")
        .with_keywords(["AI"])
        .with_countries(["US"])
        .with_sectors(["Software"])
}

#[tokio::test]
async fn test_clay_search_sends_filters_and_maps_results() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/search"))
        .and(header("Authorization", "Bearer sk-test"))
        .and(body_partial_json(json!({
            "limit": 2,
            "filters": {"keywords": ["AI"], "countries": ["US"], "industries": ["Software"]}
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "results": [
                {"id": "c-1", "company_name": "Acme AI", "website": "acme.ai", "industry": "Tech"},
                {"id": "c-2", "name": "Beta Labs", "contact_email": "hi@beta.io"},
                {"id": "c-3", "company_name": "Gamma"}
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let adapter = ClayAdapter::from_definition(&clay_definition(&server.uri()), Arc::new(NoopRawCapture))
        .expect("build clay adapter");

    let leads = adapter.search(&sample_query(), 2).await.expect("clay search");

    assert_eq!(leads.len(), 2);
    assert_eq!(leads[0].company_id.as_deref(), Some("c-1"));
    assert_eq!(leads[0].company_industry.as_deref(), Some("Tech"));
    assert_eq!(leads[1].company_name.as_deref(), Some("Beta Labs"));
    assert_eq!(leads[1].work_email.as_deref(), Some("hi@beta.io"));
    assert!(leads.iter().all(|l| l.match_status() == MatchStatus::Raw));
}

#[tokio::test]
async fn test_clay_non_success_status_is_api_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(503).set_body_string("maintenance"))
        .mount(&server)
        .await;

    let adapter = ClayAdapter::from_definition(&clay_definition(&server.uri()), Arc::new(NoopRawCapture))
        .expect("build clay adapter");

    let err = adapter
        .search(&sample_query(), 10)
        .await
        .expect_err("503 must fail");

    match err {
        SourceError::Api { status, message, .. } => {
            assert_eq!(status, 503);
            assert_eq!(message, "maintenance");
        }
        other => panic!("expected Api error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_clay_malformed_body_is_parse_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let adapter = ClayAdapter::from_definition(&clay_definition(&server.uri()), Arc::new(NoopRawCapture))
        .expect("build clay adapter");

    let err = adapter
        .search(&sample_query(), 10)
        .await
        .expect_err("HTML body must fail");
    assert!(matches!(err, SourceError::Parse { .. }));
    assert!(err.is_provider_error());
}

#[tokio::test]
async fn test_clay_unavailable_makes_no_request() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"results": []})))
        .expect(0)
        .mount(&server)
        .await;

    let definition = SourceDefinition::new(SourceId::new("clay").expect("valid source ID"), "Clay", "clay")
        .with_setting("api_key", "${LEADSCOUT_ADAPTER_TEST_UNSET}")
        .with_setting("base_url", server.uri());

    let adapter = ClayAdapter::from_definition(&definition, Arc::new(NoopRawCapture))
        .expect("build clay adapter");

    assert!(!adapter.is_available());
    let leads = adapter.search(&sample_query(), 10).await.expect("unavailable search");
    assert!(leads.is_empty());
}

#[tokio::test]
async fn test_internal_db_posts_query_document_and_maps_all_contacts() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/contacts/getAgentContacts"))
        .and(body_partial_json(json!({
            "agent_id": "agent-7",
            "company_type": ["Software"],
            "products_keywords": ["AI"],
            "countries": ["US"],
            "product_industry": [],
            "expect_cnt": 10,
            "limit": 50,
            "offset": 0
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "contacts": [
                {"company_id": "1", "company_name": "Acme", "full_name": "Ada Lovelace", "job_title": "CTO"},
                {"company_id": "2", "company_name": "Beta", "work_email": "cto@beta.io"},
                {"company_id": "3", "company_name": "Gamma", "whatsapp": "+1 555 0100"}
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let base_url = format!("{}/api/contacts/getAgentContacts", server.uri());
    let adapter = InternalDbAdapter::from_definition(&internal_definition(&base_url), Arc::new(NoopRawCapture))
        .expect("build internal db adapter");

    let leads = adapter.search(&sample_query(), 50).await.expect("internal db search");

    let names: Vec<_> = leads.iter().filter_map(|l| l.company_name.as_deref()).collect();
    assert_eq!(names, vec!["Acme", "Beta", "Gamma"]);
    assert_eq!(leads[0].full_name.as_deref(), Some("Ada Lovelace"));
    assert_eq!(leads[2].social.whatsapp.as_deref(), Some("+1 555 0100"));
    assert!(leads
        .iter()
        .all(|l| l.icp_id.as_deref() == Some("agent-7") && l.source.as_deref() == Some("internal_db")));
}

#[tokio::test]
async fn test_internal_db_captures_raw_payload() {
    let server = MockServer::start().await;
    let payload = json!({"contacts": [{"company_id": "1", "company_name": "Acme"}]});

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&payload))
        .mount(&server)
        .await;

    let tmp = tempfile::TempDir::new().expect("create temp dir");
    let capture = Arc::new(FileRawCapture::new(tmp.path().join("raw_data")));

    let adapter = InternalDbAdapter::from_definition(&internal_definition(&server.uri()), capture)
        .expect("build internal db adapter");
    adapter.search(&IcpQuery::new(), 10).await.expect("internal db search");

    let written = std::fs::read_to_string(tmp.path().join("raw_data").join("internaldb.json"))
        .expect("read raw capture");
    let captured: serde_json::Value = serde_json::from_str(&written).expect("parse raw capture");
    assert_eq!(captured, payload);
}

#[tokio::test]
async fn test_internal_db_capture_failure_does_not_fail_search() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "contacts": [{"company_name": "Acme"}]
        })))
        .mount(&server)
        .await;

    let tmp = tempfile::TempDir::new().expect("create temp dir");
    let blocker = tmp.path().join("blocked");
    std::fs::write(&blocker, "regular file").expect("write blocker");

    let adapter = InternalDbAdapter::from_definition(
        &internal_definition(&server.uri()),
        Arc::new(FileRawCapture::new(&blocker)),
    )
    .expect("build internal db adapter");

    let leads = adapter.search(&IcpQuery::new(), 10).await.expect("search despite capture failure");
    assert_eq!(leads.len(), 1);
}

#[tokio::test]
async fn test_internal_db_timeout_is_transport_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"contacts": []}))
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&server)
        .await;

    let definition = internal_definition(&server.uri()).with_setting("timeout_secs", 1_i64);
    let adapter = InternalDbAdapter::from_definition(&definition, Arc::new(NoopRawCapture))
        .expect("build internal db adapter");

    let err = adapter
        .search(&IcpQuery::new(), 10)
        .await
        .expect_err("slow provider must time out");
    assert!(matches!(err, SourceError::Http(_)));
}
