// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use axum::{
    extract::Extension,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use std::sync::Arc;
use tracing::{debug, error, warn};

use crate::domain::models::metric::MetricSample;
use crate::domain::services::collector::Collector;
use crate::infrastructure::observability::metrics::{build_info_sample, render, CONTENT_TYPE};
use crate::infrastructure::observability::process::ProcessCollector;

/// 指标端点共享的状态
#[derive(Clone)]
pub struct MetricsState {
    pub collector: Arc<Collector>,
    pub process: Option<Arc<ProcessCollector>>,
}

impl MetricsState {
    pub fn new(collector: Arc<Collector>, process: Option<Arc<ProcessCollector>>) -> Self {
        Self { collector, process }
    }
}

/// 抓取端点
///
/// 每次请求执行一次完整采集。Solr 不可用时仍返回 200，
/// 由 `solr_up` 指标表达失败。
pub async fn metrics(Extension(state): Extension<MetricsState>) -> Response {
    let result = state.collector.collect().await;
    debug!(
        success = result.success,
        cores = result.cores().len(),
        elapsed_ms = result.duration.as_millis() as u64,
        "Served metrics scrape"
    );

    let mut samples = result.samples;
    samples.push(build_info_sample());

    if let Some(process) = &state.process {
        samples.extend(process_samples(Arc::clone(process)).await);
    }

    match render(samples) {
        Ok(body) => ([(header::CONTENT_TYPE, CONTENT_TYPE)], body).into_response(),
        Err(e) => {
            error!(error = %e, "Failed to encode metrics");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

/// 在阻塞线程池中读取 /proc，失败时不输出进程指标
async fn process_samples(process: Arc<ProcessCollector>) -> Vec<MetricSample> {
    let pid_file = process.pid_file().to_path_buf();
    match tokio::task::spawn_blocking(move || process.collect()).await {
        Ok(Ok(samples)) => samples,
        Ok(Err(e)) => {
            warn!(
                pid_file = %pid_file.display(),
                error = %e,
                "Failed to collect Solr process metrics"
            );
            Vec::new()
        }
        Err(e) => {
            warn!(error = %e, "Process metrics task failed");
            Vec::new()
        }
    }
}
