//! End-to-end export tests against a mock Piwik PRO server
//!
//! Every test points `api.base_url` at a mockito server, so all report
//! documents hit the same host and are told apart by their client id.

use chrono::NaiveDate;
use mockito::{Matcher, Server};
use piwik_export::config::RunnerConfig;
use piwik_export::core::export::{ExportCoordinator, FailureStage, OutcomeStatus};
use serde_json::json;
use std::fs;
use std::path::Path;
use tempfile::TempDir;
use tokio::sync::watch;

const QUERY_PATH: &str = "/api/analytics/v1/query/";

struct Workspace {
    _root: TempDir,
    config: RunnerConfig,
}

impl Workspace {
    fn new(base_url: String) -> Self {
        let root = TempDir::new().unwrap();
        let config_dir = root.path().join("config");
        let export_dir = root.path().join("export");
        fs::create_dir(&config_dir).unwrap();
        fs::create_dir(&export_dir).unwrap();

        let mut config = RunnerConfig::default();
        config.api.base_url = base_url;
        config.paths.config_dir = config_dir.display().to_string();
        config.paths.export_dir = export_dir.display().to_string();

        Self {
            _root: root,
            config,
        }
    }

    fn config_dir(&self) -> &Path {
        Path::new(&self.config.paths.config_dir)
    }

    fn export_dir(&self) -> &Path {
        Path::new(&self.config.paths.export_dir)
    }

    fn add_document(&self, file_name: &str, document: serde_json::Value) {
        fs::write(self.config_dir().join(file_name), document.to_string()).unwrap();
    }

    fn coordinator(&self) -> (ExportCoordinator, watch::Sender<bool>) {
        let (tx, rx) = watch::channel(false);
        (ExportCoordinator::new(&self.config, rx).unwrap(), tx)
    }
}

fn document(client_id: &str, extra: serde_json::Value) -> serde_json::Value {
    let mut doc = json!({
        "client_id": client_id,
        "client_secret": "s3cret",
        "piwik_hostname": "acme",
        "website_id": "3f2c9e1a-5d4b-4c7e-9a8f-1b2c3d4e5f60",
        "columns": [
            { "column_id": "page_title" },
            { "column_id": "page_views" }
        ],
        "filters": null,
        "metric_filters": null
    });
    if let (Some(doc), Some(extra)) = (doc.as_object_mut(), extra.as_object()) {
        for (key, value) in extra {
            doc.insert(key.clone(), value.clone());
        }
    }
    doc
}

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 3, 14).unwrap()
}

#[tokio::test]
async fn test_export_writes_csv_verbatim() {
    let mut server = Server::new_async().await;
    let csv = "page_title,page_views\r\n\"Hello, world\",3\r\n\"two\nlines\",1\r\n";

    let auth = server
        .mock("POST", "/auth/token")
        .match_body(Matcher::AllOf(vec![
            Matcher::UrlEncoded("grant_type".into(), "client_credentials".into()),
            Matcher::UrlEncoded("client_id".into(), "id-a".into()),
            Matcher::UrlEncoded("client_secret".into(), "s3cret".into()),
        ]))
        .with_status(200)
        .with_body(r#"{"access_token":"tok-a","token_type":"Bearer","expires_in":1800}"#)
        .expect(1)
        .create_async()
        .await;

    let query = server
        .mock("POST", QUERY_PATH)
        .match_header("authorization", "Bearer tok-a")
        .match_header("content-type", "application/vnd.api+json")
        .match_body(Matcher::PartialJson(json!({
            "date_from": "2024-01-01",
            "date_to": "2024-12-31",
            "website_id": "3f2c9e1a-5d4b-4c7e-9a8f-1b2c3d4e5f60",
            "offset": 0,
            "limit": 10000,
            "format": "csv",
            "columns": [{ "column_id": "page_title" }, { "column_id": "page_views" }],
            "order_by": [[0, "desc"]]
        })))
        .with_status(200)
        .with_header("content-type", "text/csv")
        .with_body(csv)
        .expect(1)
        .create_async()
        .await;

    let workspace = Workspace::new(server.url());
    workspace.add_document("siteA.json", document("id-a", json!({})));

    let (coordinator, _tx) = workspace.coordinator();
    let summary = coordinator.execute_export(today()).await.unwrap();

    auth.assert_async().await;
    query.assert_async().await;

    assert!(summary.is_successful());
    let written = workspace.export_dir().join("siteA_2024-01-01_2024-12-31.csv");
    assert_eq!(fs::read(&written).unwrap(), csv.as_bytes());
    assert_eq!(
        summary.outcome("siteA.json").and_then(|o| o.export_path()),
        Some(&written)
    );
}

#[tokio::test]
async fn test_explicit_dates_name_the_file() {
    let mut server = Server::new_async().await;

    server
        .mock("POST", "/auth/token")
        .with_status(200)
        .with_body(r#"{"access_token":"tok"}"#)
        .create_async()
        .await;
    let query = server
        .mock("POST", QUERY_PATH)
        .match_body(Matcher::PartialJson(json!({
            "date_from": "2024-05-01",
            "date_to": "2024-12-08",
            "order_by": [[1, "asc"]]
        })))
        .with_status(200)
        .with_body("a\n1\n")
        .create_async()
        .await;

    let workspace = Workspace::new(server.url());
    workspace.add_document(
        "campaigns.json",
        document(
            "id",
            json!({
                "date_from": "2024-05-01",
                "date_to": "2024-12-08",
                "order_by": [[1, "asc"]]
            }),
        ),
    );

    let (coordinator, _tx) = workspace.coordinator();
    let summary = coordinator.execute_export(today()).await.unwrap();

    query.assert_async().await;
    assert_eq!(summary.exported(), 1);
    assert!(workspace
        .export_dir()
        .join("campaigns_2024-05-01_2024-12-08.csv")
        .exists());
}

#[tokio::test]
async fn test_document_columns_and_order_reach_the_wire_unchanged() {
    let mut server = Server::new_async().await;
    let columns = json!([
        { "column_id": "timestamp", "transformation_id": null },
        { "column_id": "goal_conversions", "goal_uuid": "4c800ddd", "requires_events": "false" }
    ]);
    let order_by = json!([[1, "DESC"], [0, "asc", "nulls_last"]]);

    server
        .mock("POST", "/auth/token")
        .with_status(200)
        .with_body(r#"{"access_token":"tok"}"#)
        .create_async()
        .await;
    let query = server
        .mock("POST", QUERY_PATH)
        .match_body(Matcher::PartialJson(json!({
            "columns": columns.clone(),
            "order_by": order_by.clone()
        })))
        .with_status(200)
        .with_body("a\n1\n")
        .expect(1)
        .create_async()
        .await;

    let workspace = Workspace::new(server.url());
    workspace.add_document(
        "goals.json",
        document("id", json!({ "columns": columns, "order_by": order_by })),
    );

    let (coordinator, _tx) = workspace.coordinator();
    let summary = coordinator.execute_export(today()).await.unwrap();

    query.assert_async().await;
    assert!(summary.is_successful());
}

#[tokio::test]
async fn test_failures_do_not_stop_the_batch() {
    let mut server = Server::new_async().await;

    let denied = server
        .mock("POST", "/auth/token")
        .match_body(Matcher::UrlEncoded("client_id".into(), "id-denied".into()))
        .with_status(401)
        .with_body(r#"{"error":"invalid_client"}"#)
        .expect(1)
        .create_async()
        .await;
    let granted = server
        .mock("POST", "/auth/token")
        .match_body(Matcher::UrlEncoded("client_id".into(), "id-ok".into()))
        .with_status(200)
        .with_body(r#"{"access_token":"tok-ok"}"#)
        .expect(1)
        .create_async()
        .await;
    let query = server
        .mock("POST", QUERY_PATH)
        .match_header("authorization", "Bearer tok-ok")
        .with_status(200)
        .with_body("x\n1\n")
        .expect(1)
        .create_async()
        .await;

    let workspace = Workspace::new(server.url());
    workspace.add_document("a_denied.json", document("id-denied", json!({})));
    fs::write(workspace.config_dir().join("b_broken.json"), "{ not json").unwrap();
    workspace.add_document("c_ok.json", document("id-ok", json!({})));
    fs::write(workspace.config_dir().join("notes.txt"), "ignored").unwrap();

    let (coordinator, _tx) = workspace.coordinator();
    let summary = coordinator.execute_export(today()).await.unwrap();

    denied.assert_async().await;
    granted.assert_async().await;
    query.assert_async().await;

    assert_eq!(summary.total(), 3);
    assert_eq!(summary.exported(), 1);
    assert_eq!(summary.failed(), 2);

    match &summary.outcome("a_denied.json").unwrap().status {
        OutcomeStatus::Failed { stage, reason } => {
            assert_eq!(*stage, FailureStage::Authentication);
            assert!(reason.contains("401"));
            assert!(reason.contains("invalid_client"));
        }
        other => panic!("expected failure, got {other:?}"),
    }
    match &summary.outcome("b_broken.json").unwrap().status {
        OutcomeStatus::Failed { stage, .. } => assert_eq!(*stage, FailureStage::Parse),
        other => panic!("expected failure, got {other:?}"),
    }

    let files: Vec<_> = fs::read_dir(workspace.export_dir())
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    assert_eq!(files, vec!["c_ok_2024-01-01_2024-12-31.csv"]);
}

#[tokio::test]
async fn test_query_rejection_writes_nothing() {
    let mut server = Server::new_async().await;

    server
        .mock("POST", "/auth/token")
        .with_status(200)
        .with_body(r#"{"access_token":"tok"}"#)
        .create_async()
        .await;
    server
        .mock("POST", QUERY_PATH)
        .with_status(400)
        .with_body(r#"{"errors":[{"title":"Invalid column"}]}"#)
        .create_async()
        .await;

    let workspace = Workspace::new(server.url());
    workspace.add_document("siteA.json", document("id", json!({})));

    let (coordinator, _tx) = workspace.coordinator();
    let summary = coordinator.execute_export(today()).await.unwrap();

    match &summary.outcome("siteA.json").unwrap().status {
        OutcomeStatus::Failed { stage, reason } => {
            assert_eq!(*stage, FailureStage::Request);
            assert!(reason.contains("400"));
            assert!(reason.contains("Invalid column"));
        }
        other => panic!("expected failure, got {other:?}"),
    }
    assert_eq!(fs::read_dir(workspace.export_dir()).unwrap().count(), 0);
}

#[tokio::test]
async fn test_rerun_overwrites_previous_export() {
    let mut server = Server::new_async().await;

    server
        .mock("POST", "/auth/token")
        .with_status(200)
        .with_body(r#"{"access_token":"tok"}"#)
        .create_async()
        .await;
    server
        .mock("POST", QUERY_PATH)
        .with_status(200)
        .with_body("fresh\n")
        .create_async()
        .await;

    let workspace = Workspace::new(server.url());
    workspace.add_document("siteA.json", document("id", json!({})));
    let target = workspace.export_dir().join("siteA_2024-01-01_2024-12-31.csv");
    fs::write(&target, "stale data that is longer\n").unwrap();

    let (coordinator, _tx) = workspace.coordinator();
    coordinator.execute_export(today()).await.unwrap();

    assert_eq!(fs::read_to_string(target).unwrap(), "fresh\n");
}

#[tokio::test]
async fn test_shutdown_before_start_processes_nothing() {
    let mut server = Server::new_async().await;
    let auth = server
        .mock("POST", "/auth/token")
        .expect(0)
        .create_async()
        .await;

    let workspace = Workspace::new(server.url());
    workspace.add_document("siteA.json", document("id", json!({})));

    let (coordinator, tx) = workspace.coordinator();
    tx.send(true).unwrap();
    let summary = coordinator.execute_export(today()).await.unwrap();

    auth.assert_async().await;
    assert!(summary.interrupted);
    assert_eq!(summary.total(), 0);
    assert!(!summary.is_successful());
}
