// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use super::helpers::{app, get};
use axum::http::StatusCode;

/// 健康检查不访问 Solr
#[tokio::test]
async fn health_check_works() {
    let (response, body) = get(app("http://127.0.0.1:9/solr", "", false), "/health").await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body, "OK");
}

#[tokio::test]
async fn landing_page_links_metrics() {
    let (response, body) = get(app("http://127.0.0.1:9/solr", "", false), "/").await;

    assert_eq!(response.status(), StatusCode::OK);
    assert!(body.contains("<a href=\"/metrics\">"));
}

#[tokio::test]
async fn unknown_path_returns_404() {
    let (response, _) = get(app("http://127.0.0.1:9/solr", "", false), "/nope").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
