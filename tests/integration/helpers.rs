// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use axum::{
    body::{to_bytes, Body},
    http::{Request, Response},
    Router,
};
use serde_json::{json, Value};
use solr_exporter::domain::models::scrape_target::ScrapeTarget;
use solr_exporter::domain::services::collector::Collector;
use solr_exporter::domain::services::core_filter::CoreFilter;
use solr_exporter::engines::reqwest_engine::ReqwestEngine;
use solr_exporter::infrastructure::observability::process::ProcessCollector;
use solr_exporter::presentation::handlers::metrics_handler::MetricsState;
use solr_exporter::presentation::routes;
use std::sync::Arc;
use std::time::Duration;
use tower::util::ServiceExt;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// 构建指向给定 Solr 地址的应用路由
pub fn app(base_url: &str, excluded_core: &str, collect_mbeans: bool) -> Router {
    app_with_process(base_url, excluded_core, collect_mbeans, None)
}

/// 同时导出 Solr 进程指标的应用路由
pub fn app_with_process(
    base_url: &str,
    excluded_core: &str,
    collect_mbeans: bool,
    process: Option<Arc<ProcessCollector>>,
) -> Router {
    let target = Arc::new(ScrapeTarget {
        base_url: base_url.to_string(),
        timeout: Duration::from_secs(2),
        filter: CoreFilter::new(excluded_core).unwrap(),
        collect_mbeans,
    });
    let engine = Arc::new(ReqwestEngine::new(target.base_url.clone(), target.timeout).unwrap());
    let collector = Arc::new(Collector::new(engine, target));

    routes::routes("/metrics", MetricsState::new(collector, process))
}

/// 发送 GET 请求，返回响应与响应体文本
pub async fn get(app: Router, uri: &str) -> (Response<Body>, String) {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();

    let (parts, body) = response.into_parts();
    let bytes = to_bytes(body, usize::MAX).await.unwrap();
    let text = String::from_utf8(bytes.to_vec()).unwrap();
    (Response::from_parts(parts, Body::empty()), text)
}

pub fn healthy_core(name: &str, num_docs: u64) -> Value {
    json!({
        "name": name,
        "instanceDir": format!("/var/solr/data/{}", name),
        "startTime": "2025-01-01T00:00:00.000Z",
        "uptime": 120000,
        "index": {
            "numDocs": num_docs,
            "maxDoc": num_docs + 2,
            "deletedDocs": 2,
            "segmentCount": 3,
            "current": true,
            "sizeInBytes": 4096
        }
    })
}

/// 挂载 core 状态接口
pub async fn mount_core_status(server: &MockServer, status: Value) {
    let body = json!({
        "responseHeader": {"status": 0, "QTime": 1},
        "initFailures": {},
        "status": status
    });
    Mock::given(method("GET"))
        .and(path("/solr/admin/cores"))
        .and(query_param("action", "STATUS"))
        .and(query_param("wt", "json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

/// 挂载单个 core 的 mbeans 接口
pub async fn mount_mbeans(server: &MockServer, core: &str, body: Value) {
    Mock::given(method("GET"))
        .and(path(format!("/solr/{}/admin/mbeans", core)))
        .and(query_param("stats", "true"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

/// 一个肯定连不上的 Solr 地址
pub fn unreachable_solr() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}/solr", addr)
}
