// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use super::helpers::{
    app, app_with_process, get, healthy_core, mount_core_status, mount_mbeans, unreachable_solr,
};
use axum::http::{header, StatusCode};
use serde_json::json;
use solr_exporter::infrastructure::observability::process::ProcessCollector;
use std::io::Write;
use std::sync::Arc;
use tempfile::NamedTempFile;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// 一个 core 正常、一个 core 损坏时，抓取仍然成功
#[tokio::test]
async fn test_broken_core_does_not_fail_scrape() {
    let server = MockServer::start().await;
    mount_core_status(
        &server,
        json!({
            "core1": healthy_core("core1", 10),
            "core2": {"name": "core2", "index": "corrupted"}
        }),
    )
    .await;

    let app = app(&format!("{}/solr", server.uri()), "", false);
    let (response, body) = get(app, "/metrics").await;

    assert_eq!(response.status(), StatusCode::OK);
    let content_type = response.headers()[header::CONTENT_TYPE].to_str().unwrap();
    assert!(content_type.starts_with("text/plain; version=0.0.4"));

    assert!(body.contains("solr_up 1"));
    assert!(body.contains("solr_core_num_docs{core=\"core1\"} 10"));
    assert!(body.contains("solr_core_deleted_docs{core=\"core1\"} 2"));
    assert!(!body.contains("core=\"core2\""));
    assert!(body.contains("solr_exporter_scrape_duration_seconds"));
    assert!(body.contains("solr_exporter_build_info{version="));
}

#[tokio::test]
async fn test_unreachable_solr_reports_down() {
    let app = app(&unreachable_solr(), "", false);
    let (response, body) = get(app, "/metrics").await;

    assert_eq!(response.status(), StatusCode::OK);
    assert!(body.contains("solr_up 0"));
    assert!(!body.contains("core=\""));
}

#[tokio::test]
async fn test_solr_error_status_reports_down() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/solr/admin/cores"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let app = app(&format!("{}/solr", server.uri()), "", false);
    let (response, body) = get(app, "/metrics").await;

    assert_eq!(response.status(), StatusCode::OK);
    assert!(body.contains("solr_up 0"));
}

#[tokio::test]
async fn test_excluded_cores_are_not_exported() {
    let server = MockServer::start().await;
    mount_core_status(
        &server,
        json!({
            "test_a": healthy_core("test_a", 1),
            "prod_b": healthy_core("prod_b", 2)
        }),
    )
    .await;

    let app = app(&format!("{}/solr", server.uri()), "^test_", false);
    let (_, body) = get(app, "/metrics").await;

    assert!(body.contains("solr_core_num_docs{core=\"prod_b\"} 2"));
    assert!(!body.contains("test_a"));
}

#[tokio::test]
async fn test_mbeans_are_exported_with_handler_labels() {
    let server = MockServer::start().await;
    mount_core_status(&server, json!({"core1": healthy_core("core1", 10)})).await;
    mount_mbeans(
        &server,
        "core1",
        json!({
            "responseHeader": {"status": 0},
            "solr-mbeans": {
                "QUERYHANDLER": {
                    "/select": {"class": "solr.SearchHandler", "stats": {"requests": 7, "errors": 1}}
                },
                "CACHE": {
                    "filterCache": {"stats": {"CACHE.searcher.filterCache.hits": 3, "size": 12}}
                }
            }
        }),
    )
    .await;

    let app = app(&format!("{}/solr", server.uri()), "", true);
    let (_, body) = get(app, "/metrics").await;

    assert!(body.contains("solr_up 1"));
    assert!(body.contains("solr_handler_requests_total{core=\"core1\",handler=\"/select\"} 7"));
    assert!(body.contains("solr_handler_errors_total{core=\"core1\",handler=\"/select\"} 1"));
    assert!(body.contains("solr_cache_hits_total{core=\"core1\",cache=\"filterCache\"} 3"));
    assert!(body.contains("solr_cache_size{core=\"core1\",cache=\"filterCache\"} 12"));
}

#[tokio::test]
async fn test_successive_scrapes_do_not_leak_cores() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/solr/admin/cores"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "responseHeader": {"status": 0},
            "status": {"old": healthy_core("old", 1)}
        })))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    mount_core_status(&server, json!({"new": healthy_core("new", 1)})).await;

    let app = app(&format!("{}/solr", server.uri()), "", false);
    let (_, first) = get(app.clone(), "/metrics").await;
    let (_, second) = get(app, "/metrics").await;

    assert!(first.contains("core=\"old\""));
    assert!(second.contains("core=\"new\""));
    assert!(!second.contains("core=\"old\""));
}

#[tokio::test]
async fn test_process_metrics_are_appended() {
    let mut pid_file = NamedTempFile::new().unwrap();
    write!(pid_file, "{}", std::process::id()).unwrap();
    let process = Arc::new(ProcessCollector::new(pid_file.path()));

    let app = app_with_process(&unreachable_solr(), "", false, Some(process));
    let (response, body) = get(app, "/metrics").await;

    assert_eq!(response.status(), StatusCode::OK);
    assert!(body.contains("solr_up 0"));
    assert!(body.contains("# TYPE solr_process_resident_memory_bytes gauge"));
    assert!(body.contains("# TYPE solr_process_cpu_seconds counter"));
    assert!(body.contains("solr_process_cpu_seconds_total "));
}

#[tokio::test]
async fn test_unreadable_pid_file_skips_process_metrics() {
    let dir = tempfile::tempdir().unwrap();
    let process = Arc::new(ProcessCollector::new(dir.path().join("missing.pid")));

    let app = app_with_process(&unreachable_solr(), "", false, Some(process));
    let (response, body) = get(app, "/metrics").await;

    assert_eq!(response.status(), StatusCode::OK);
    assert!(body.contains("solr_up 0"));
    assert!(!body.contains("solr_process_"));
}
