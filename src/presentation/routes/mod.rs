// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::presentation::handlers::metrics_handler::{self, MetricsState};
use axum::{response::Html, routing::get, Extension, Router};
use tower_http::trace::TraceLayer;

/// 健康检查路径
pub const HEALTH_PATH: &str = "/health";

/// 创建应用路由
///
/// # 参数
///
/// * `metrics_path` - 抓取路径，缺少前导 `/` 时自动补上
/// * `state` - 指标端点共享的状态
///
/// # 返回值
///
/// 返回配置好的路由
pub fn routes(metrics_path: &str, state: MetricsState) -> Router {
    let metrics_path = normalize_path(metrics_path);

    let mut router = Router::new().route(&metrics_path, get(metrics_handler::metrics));

    if metrics_path != HEALTH_PATH {
        router = router.route(HEALTH_PATH, get(health_check));
    }
    if metrics_path != "/" {
        let page = landing_page(&metrics_path);
        router = router.route("/", get(move || async move { Html(page) }));
    }

    router
        .layer(Extension(state))
        .layer(TraceLayer::new_for_http())
}

/// 健康检查端点
///
/// # 返回值
///
/// 返回"OK"字符串
pub async fn health_check() -> &'static str {
    "OK"
}

fn normalize_path(path: &str) -> String {
    let trimmed = path.trim();
    if trimmed.starts_with('/') {
        trimmed.to_string()
    } else {
        format!("/{}", trimmed)
    }
}

fn landing_page(metrics_path: &str) -> String {
    format!(
        "<html>\n\
         <head><title>Solr Exporter</title></head>\n\
         <body>\n\
         <h1>Solr Exporter</h1>\n\
         <p><a href=\"{}\">Metrics</a></p>\n\
         </body>\n\
         </html>\n",
        metrics_path
    )
}
