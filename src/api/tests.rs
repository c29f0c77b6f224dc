//! Tests for the API client

use super::*;
use crate::config::Settings;
use crate::error::Error;
use crate::http::RateLimiterConfig;
use crate::types::Shard;
use serde_json::json;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn settings_for(server: &MockServer) -> Settings {
    let mut settings = Settings::default();
    settings.api.base_url = server.uri();
    settings.api.api_key = Some("test-key".to_string());
    settings.api.shard = Shard::PcNa;
    settings.api.rate_limit = None;
    settings
}

#[test]
fn test_api_client_requires_key() {
    let settings = Settings::default();
    let err = ApiClient::new(&settings).unwrap_err();
    assert!(matches!(err, Error::MissingConfigField { .. }));
}

#[test]
fn test_api_client_with_rate_limit() {
    let mut settings = Settings::default();
    settings.api.api_key = Some("k".to_string());
    settings.api.rate_limit = Some(RateLimiterConfig::new(10, 1));
    let client = ApiClient::new(&settings).unwrap();
    assert_eq!(client.shard(), Shard::PcKakao);
}

#[tokio::test]
async fn test_match_document_sends_credentials() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/shards/pc-na/matches/m1"))
        .and(header("Authorization", "Bearer test-key"))
        .and(header("Accept", "application/vnd.api+json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": {"id": "m1"}})))
        .expect(1)
        .mount(&server)
        .await;

    let client = ApiClient::new(&settings_for(&server)).unwrap();
    let doc = client.match_document("m1").await.unwrap();
    assert_eq!(doc["data"]["id"], "m1");
}

#[tokio::test]
async fn test_player_lookup_uses_name_filter() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/shards/pc-na/players"))
        .and(query_param("filter[playerNames]", "alice"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": [{"id": "account.a"}]})))
        .mount(&server)
        .await;

    let client = ApiClient::new(&settings_for(&server)).unwrap();
    let doc = client.player("alice").await.unwrap();
    assert_eq!(doc["data"][0]["id"], "account.a");
}

#[tokio::test]
async fn test_samples() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/shards/pc-na/samples"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": {"type": "sample"}})))
        .mount(&server)
        .await;

    let client = ApiClient::new(&settings_for(&server)).unwrap();
    let doc = client.samples().await.unwrap();
    assert_eq!(doc["data"]["type"], "sample");
}

#[tokio::test]
async fn test_try_match_document_absorbs_failure() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/shards/pc-na/matches/gone"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let client = ApiClient::new(&settings_for(&server)).unwrap();
    assert!(client.try_match_document("gone").await.is_none());
    assert!(client.match_document("gone").await.is_err());
}

#[tokio::test]
async fn test_try_telemetry_absorbs_bad_body() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/telemetry/t.json"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let client = ApiClient::new(&settings_for(&server)).unwrap();
    let url = format!("{}/telemetry/t.json", server.uri());
    assert!(client.try_telemetry(&url).await.is_none());
}

#[tokio::test]
async fn test_telemetry_requested_uncompressed_without_key() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/telemetry/t.json"))
        .and(header("Accept-Encoding", "identity"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{"_T": "LogMatchStart"}])))
        .expect(1)
        .mount(&server)
        .await;

    let client = ApiClient::new(&settings_for(&server)).unwrap();
    let url = format!("{}/telemetry/t.json", server.uri());
    let events = client.telemetry(&url).await.unwrap();
    assert_eq!(events[0]["_T"], "LogMatchStart");

    let requests = server.received_requests().await.unwrap();
    assert!(requests[0].headers.get("authorization").is_none());
}
