//! Tests for engine module

use super::*;
use crate::config::Settings;
use crate::output::read_coordinates;
use crate::types::{MatchInfo, Shard};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use tempfile::tempdir;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

// ============================================================================
// Fixtures
// ============================================================================

fn pipeline_for(server: &MockServer) -> KillPipeline {
    let mut settings = Settings::default();
    settings.api.base_url = server.uri();
    settings.api.api_key = Some("test-key".to_string());
    settings.api.shard = Shard::PcKakao;
    settings.api.rate_limit = None;
    KillPipeline::new(ApiClient::new(&settings).unwrap())
}

fn match_doc(server: &MockServer, id: &str, mode: &str, map: &str) -> Value {
    json!({
        "data": {
            "type": "match",
            "id": id,
            "attributes": {"gameMode": mode, "mapName": map, "duration": 1700}
        },
        "included": [
            {
                "type": "participant",
                "id": format!("{id}-p1"),
                "attributes": {"stats": {"playerId": "account.alice", "kills": 2, "winPlace": 1}}
            },
            {
                "type": "participant",
                "id": format!("{id}-p2"),
                "attributes": {"stats": {"playerId": "account.bob", "kills": 0, "winPlace": 2}}
            },
            {
                "type": "roster",
                "id": format!("{id}-r1"),
                "attributes": {"won": "true"},
                "relationships": {"participants": {"data": [{"type": "participant", "id": format!("{id}-p1")}]}}
            },
            {
                "type": "roster",
                "id": format!("{id}-r2"),
                "attributes": {"won": "false"},
                "relationships": {"participants": {"data": [{"type": "participant", "id": format!("{id}-p2")}]}}
            },
            {
                "type": "asset",
                "id": format!("{id}-asset"),
                "attributes": {"URL": format!("{}/telemetry/{id}.json", server.uri())}
            }
        ]
    })
}

fn kill(x: f64, y: f64) -> Value {
    json!({
        "_T": "LogPlayerKill",
        "killer": {"name": "alice"},
        "victim": {"name": "bob", "location": {"x": x, "y": y, "z": 10.0}}
    })
}

fn telemetry(kills: &[(f64, f64)]) -> Value {
    let mut events = vec![json!({"_T": "LogMatchStart"})];
    for (x, y) in kills {
        events.push(json!({"_T": "LogPlayerPosition"}));
        events.push(kill(*x, *y));
    }
    events.push(json!({"_T": "LogMatchEnd"}));
    Value::Array(events)
}

async fn mount_match(server: &MockServer, id: &str, doc: Value) {
    Mock::given(method("GET"))
        .and(path(format!("/shards/pc-kakao/matches/{id}")))
        .respond_with(ResponseTemplate::new(200).set_body_json(doc))
        .mount(server)
        .await;
}

async fn mount_telemetry(server: &MockServer, id: &str, body: Value) {
    Mock::given(method("GET"))
        .and(path(format!("/telemetry/{id}.json")))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

/// A selected match with `kills` kill events, fully mocked
async fn mount_solo_match(server: &MockServer, id: &str, kills: &[(f64, f64)]) {
    mount_match(server, id, match_doc(server, id, "solo", "Savage_Main")).await;
    mount_telemetry(server, id, telemetry(kills)).await;
}

async fn mount_samples(server: &MockServer, ids: &[&str]) {
    let data: Vec<Value> = ids.iter().map(|id| json!({"type": "match", "id": id})).collect();
    Mock::given(method("GET"))
        .and(path("/shards/pc-kakao/samples"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {"type": "sample", "relationships": {"matches": {"data": data}}}
        })))
        .mount(server)
        .await;
}

fn ids(names: &[&str]) -> Vec<MatchId> {
    names.iter().map(|s| (*s).to_string()).collect()
}

// ============================================================================
// Types
// ============================================================================

#[test]
fn test_match_outcome_into_rows() {
    let rows = vec![KillCoordinate::new(1.0, 2.0)];
    assert_eq!(MatchOutcome::Kills(rows.clone()).into_rows(), rows);
    assert!(MatchOutcome::Failed.into_rows().is_empty());
    let info = MatchInfo {
        map_name: "Erangel_Main".to_string(),
        game_mode: "squad".to_string(),
    };
    assert!(MatchOutcome::Skipped(info).into_rows().is_empty());
}

#[test]
fn test_run_stats_record() {
    let mut stats = RunStats::new();
    stats.record(&MatchOutcome::Kills(vec![]));
    stats.record(&MatchOutcome::Failed);
    stats.record(&MatchOutcome::Failed);
    stats.add_rows(4);
    stats.add_batch();

    assert_eq!(stats.matches_processed, 3);
    assert_eq!(stats.matches_selected, 1);
    assert_eq!(stats.matches_failed, 2);
    assert_eq!(stats.matches_skipped, 0);
    assert_eq!(stats.rows_written, 4);
    assert_eq!(stats.batches, 1);
}

// ============================================================================
// Single match
// ============================================================================

#[tokio::test]
async fn test_selected_match_yields_victim_positions() {
    let server = MockServer::start().await;
    mount_solo_match(&server, "m1", &[(10.0, 20.0), (30.0, 40.0), (50.5, 60.5)]).await;

    let pipeline = pipeline_for(&server);
    let rows = pipeline.process_match("m1").await;

    assert_eq!(
        rows,
        vec![
            KillCoordinate::new(10.0, 20.0),
            KillCoordinate::new(30.0, 40.0),
            KillCoordinate::new(50.5, 60.5),
        ]
    );
}

#[tokio::test]
async fn test_other_mode_yields_nothing_and_skips_telemetry() {
    let server = MockServer::start().await;
    mount_match(&server, "m1", match_doc(&server, "m1", "squad", "Savage_Main")).await;

    Mock::given(method("GET"))
        .and(path("/telemetry/m1.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(telemetry(&[(1.0, 1.0)])))
        .expect(0)
        .mount(&server)
        .await;

    let pipeline = pipeline_for(&server);
    let outcome = pipeline.evaluate_match("m1").await;
    assert_eq!(
        outcome,
        MatchOutcome::Skipped(MatchInfo {
            map_name: "Savage_Main".to_string(),
            game_mode: "squad".to_string(),
        })
    );
}

#[tokio::test]
async fn test_other_map_yields_nothing() {
    let server = MockServer::start().await;
    mount_match(&server, "m1", match_doc(&server, "m1", "solo", "Erangel_Main")).await;
    mount_telemetry(&server, "m1", telemetry(&[(1.0, 1.0)])).await;

    let pipeline = pipeline_for(&server);
    assert!(pipeline.process_match("m1").await.is_empty());
}

#[tokio::test]
async fn test_custom_policy() {
    let server = MockServer::start().await;
    mount_match(&server, "m1", match_doc(&server, "m1", "squad", "Erangel_Main")).await;
    mount_telemetry(&server, "m1", telemetry(&[(1.0, 2.0)])).await;

    let pipeline = pipeline_for(&server).with_policy(SelectionPolicy::new("squad", "Erangel_Main"));
    assert_eq!(pipeline.policy().game_mode, "squad");
    assert_eq!(pipeline.process_match("m1").await, vec![KillCoordinate::new(1.0, 2.0)]);
}

#[tokio::test]
async fn test_telemetry_failure_yields_nothing() {
    let server = MockServer::start().await;
    mount_match(&server, "m1", match_doc(&server, "m1", "solo", "Savage_Main")).await;

    Mock::given(method("GET"))
        .and(path("/telemetry/m1.json"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let pipeline = pipeline_for(&server);
    assert!(pipeline.evaluate_match("m1").await.is_failed());
    assert!(pipeline.process_match("m1").await.is_empty());
}

#[tokio::test]
async fn test_match_fetch_failure_yields_nothing() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/shards/pc-kakao/matches/m1"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let pipeline = pipeline_for(&server);
    assert!(pipeline.evaluate_match("m1").await.is_failed());
}

#[tokio::test]
async fn test_match_without_asset_yields_nothing() {
    let server = MockServer::start().await;
    let mut doc = match_doc(&server, "m1", "solo", "Savage_Main");
    doc["included"]
        .as_array_mut()
        .unwrap()
        .retain(|item| item["type"] != "asset");
    mount_match(&server, "m1", doc).await;

    let pipeline = pipeline_for(&server);
    assert!(pipeline.evaluate_match("m1").await.is_failed());
}

#[tokio::test]
async fn test_malformed_kill_event_yields_nothing() {
    let server = MockServer::start().await;
    mount_match(&server, "m1", match_doc(&server, "m1", "solo", "Savage_Main")).await;
    mount_telemetry(
        &server,
        "m1",
        json!([kill(1.0, 2.0), {"_T": "LogPlayerKill", "victim": null}]),
    )
    .await;

    let pipeline = pipeline_for(&server);
    assert!(pipeline.evaluate_match("m1").await.is_failed());
}

// ============================================================================
// Batches
// ============================================================================

async fn mount_five_matches(server: &MockServer) -> Vec<MatchId> {
    mount_solo_match(server, "a", &[(1.0, 1.0)]).await;
    mount_solo_match(server, "b", &[(2.0, 2.0), (2.5, 2.5)]).await;
    mount_match(server, "c", match_doc(server, "c", "duo", "Savage_Main")).await;
    mount_solo_match(server, "d", &[]).await;
    mount_solo_match(server, "e", &[(5.0, 5.0), (5.5, 5.5), (6.0, 6.0)]).await;
    ids(&["a", "b", "c", "d", "e"])
}

#[tokio::test]
async fn test_run_appends_rows() {
    let server = MockServer::start().await;
    let match_ids = mount_five_matches(&server).await;
    let dir = tempdir().unwrap();
    let out = dir.path().join("kills.csv");

    let pipeline = pipeline_for(&server).with_config(PipelineConfig::default().with_batch_size(2));
    let mut sink = CsvSink::open(&out, false).unwrap();
    let stats = pipeline.run(&match_ids, &mut sink).await.unwrap();

    assert_eq!(stats.batches, 3);
    assert_eq!(stats.matches_processed, 5);
    assert_eq!(stats.matches_selected, 4);
    assert_eq!(stats.matches_skipped, 1);
    assert_eq!(stats.matches_failed, 0);
    assert_eq!(stats.rows_written, 6);
    assert_eq!(read_coordinates(&out, false).unwrap().len(), 6);
}

#[tokio::test]
async fn test_batching_does_not_change_row_count() {
    let server = MockServer::start().await;
    let match_ids = mount_five_matches(&server).await;
    let dir = tempdir().unwrap();

    let mut counts = Vec::new();
    for batch_size in [1, 2, 5, 100] {
        let out = dir.path().join(format!("kills-{batch_size}.csv"));
        let config = PipelineConfig::default()
            .with_batch_size(batch_size)
            .with_workers(3)
            .with_max_batches(None);
        let pipeline = pipeline_for(&server).with_config(config);
        let mut sink = CsvSink::open(&out, false).unwrap();
        pipeline.run(&match_ids, &mut sink).await.unwrap();
        counts.push(read_coordinates(&out, false).unwrap().len());
    }

    assert_eq!(counts, vec![6, 6, 6, 6]);
}

#[tokio::test]
async fn test_failed_match_does_not_abort_batch() {
    let server = MockServer::start().await;
    mount_solo_match(&server, "ok1", &[(1.0, 1.0)]).await;
    mount_solo_match(&server, "ok2", &[(2.0, 2.0)]).await;
    Mock::given(method("GET"))
        .and(path("/shards/pc-kakao/matches/bad"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let dir = tempdir().unwrap();
    let out = dir.path().join("kills.csv");
    let pipeline = pipeline_for(&server);
    let mut sink = CsvSink::open(&out, false).unwrap();
    let stats = pipeline
        .run(&ids(&["ok1", "bad", "ok2"]), &mut sink)
        .await
        .unwrap();

    assert_eq!(stats.matches_failed, 1);
    assert_eq!(stats.rows_written, 2);
}

#[tokio::test]
async fn test_max_batches_caps_run() {
    let server = MockServer::start().await;
    let match_ids = mount_five_matches(&server).await;
    let dir = tempdir().unwrap();
    let out = dir.path().join("kills.csv");

    let config = PipelineConfig::default()
        .with_batch_size(2)
        .with_max_batches(Some(1));
    let pipeline = pipeline_for(&server).with_config(config);
    let mut sink = CsvSink::open(&out, false).unwrap();
    let stats = pipeline.run(&match_ids, &mut sink).await.unwrap();

    // Only "a" and "b"
    assert_eq!(stats.batches, 1);
    assert_eq!(stats.matches_processed, 2);
    assert_eq!(stats.rows_written, 3);
}

#[tokio::test]
async fn test_run_samples() {
    let server = MockServer::start().await;
    mount_five_matches(&server).await;
    mount_samples(&server, &["a", "b", "c", "d", "e"]).await;

    let dir = tempdir().unwrap();
    let out = dir.path().join("kills.csv");
    let pipeline = pipeline_for(&server);
    let mut sink = CsvSink::open(&out, true).unwrap();
    let stats = pipeline.run_samples(&mut sink).await.unwrap();

    assert_eq!(stats.rows_written, 6);
    assert_eq!(read_coordinates(&out, true).unwrap().len(), 6);
}

#[tokio::test]
async fn test_run_samples_fails_without_samples() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/shards/pc-kakao/samples"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let dir = tempdir().unwrap();
    let mut sink = CsvSink::open(dir.path().join("kills.csv"), false).unwrap();
    let err = pipeline_for(&server).run_samples(&mut sink).await.unwrap_err();
    assert!(err.is_transport());
}

// ============================================================================
// Player and winner summaries
// ============================================================================

#[tokio::test]
async fn test_player_matches_after_last_seen() {
    let server = MockServer::start().await;
    for id in ["m1", "m2", "m3"] {
        mount_match(&server, id, match_doc(&server, id, "solo", "Savage_Main")).await;
    }

    Mock::given(method("GET"))
        .and(path("/shards/pc-kakao/players"))
        .and(query_param("filter[playerNames]", "alice"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [{
                "type": "player",
                "id": "account.alice",
                "relationships": {"matches": {"data": [
                    {"type": "match", "id": "m3"},
                    {"type": "match", "id": "m2"},
                    {"type": "match", "id": "m1"}
                ]}}
            }]
        })))
        .mount(&server)
        .await;

    let pipeline = pipeline_for(&server);

    let all = pipeline.player_matches("alice", None).await.unwrap();
    let order: Vec<_> = all.iter().map(|m| m.match_id.as_str()).collect();
    assert_eq!(order, vec!["m1", "m2", "m3"]);

    let newer = pipeline.player_matches("alice", Some("m1")).await.unwrap();
    assert_eq!(newer.len(), 2);
    let first = &newer[0];
    assert_eq!(first.match_id, "m2");
    assert_eq!(first.stats["kills"], 2);
    assert_eq!(first.info["mapName"], "Savage_Main");
    assert_eq!(first.roster_id, "m2-r1");
    assert_eq!(first.telemetry_url, format!("{}/telemetry/m2.json", server.uri()));
}

#[tokio::test]
async fn test_winner_stats() {
    let server = MockServer::start().await;
    mount_samples(&server, &["a", "b", "c"]).await;
    mount_match(&server, "a", match_doc(&server, "a", "solo", "Savage_Main")).await;
    mount_match(&server, "b", match_doc(&server, "b", "squad", "Erangel_Main")).await;

    let pipeline = pipeline_for(&server);
    let rows = pipeline.winner_stats(Some(2)).await.unwrap();

    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0]["playerId"], "account.alice");
    assert_eq!(rows[0]["gameMode"], "solo");
    assert_eq!(rows[1]["mapName"], "Erangel_Main");
    assert_eq!(rows[1]["winPlace"], 1);
}

#[tokio::test]
async fn test_sample_telemetry_urls_skips_failures() {
    let server = MockServer::start().await;
    mount_samples(&server, &["a", "missing", "b"]).await;
    mount_match(&server, "a", match_doc(&server, "a", "solo", "Savage_Main")).await;
    mount_match(&server, "b", match_doc(&server, "b", "duo", "Savage_Main")).await;
    Mock::given(method("GET"))
        .and(path("/shards/pc-kakao/matches/missing"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let pipeline = pipeline_for(&server);
    let urls = pipeline.sample_telemetry_urls(None).await.unwrap();
    assert_eq!(
        urls,
        vec![
            format!("{}/telemetry/a.json", server.uri()),
            format!("{}/telemetry/b.json", server.uri()),
        ]
    );
}
