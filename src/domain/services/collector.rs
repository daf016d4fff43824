// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use std::sync::Arc;
use thiserror::Error;
use tokio::sync::Mutex;
use tokio::time::Instant;
use tracing::{debug, info, warn};

use crate::domain::models::core_stats::CoreStatRecord;
use crate::domain::models::metric::CollectionResult;
use crate::domain::models::scrape_target::ScrapeTarget;
use crate::domain::services::{metric_synthesizer, stats_parser};
use crate::engines::traits::StatsFetcher;
use crate::utils::errors::{ParseError, TransportError};

/// core 状态接口路径
pub const CORE_STATUS_PATH: &str = "/admin/cores?action=STATUS&wt=json";

/// 单个 core 的 mbeans 接口路径
pub fn mbeans_path(core: &str) -> String {
    format!(
        "/{}/admin/mbeans?stats=true&wt=json&json.nl=map",
        urlencoding::encode(core)
    )
}

/// 导致整次采集失败的错误，只在采集器内部使用
#[derive(Error, Debug)]
enum ScrapeError {
    #[error(transparent)]
    Transport(#[from] TransportError),
    #[error(transparent)]
    Parse(#[from] ParseError),
}

/// Solr 指标采集器
///
/// 每次外部抓取调用一次 `collect`。同一时刻只允许一次采集，
/// 并发请求会等待前一次完成后再各自采集。
pub struct Collector {
    fetcher: Arc<dyn StatsFetcher>,
    target: Arc<ScrapeTarget>,
    in_flight: Mutex<()>,
}

impl Collector {
    /// 创建新的采集器
    pub fn new(fetcher: Arc<dyn StatsFetcher>, target: Arc<ScrapeTarget>) -> Self {
        info!(
            engine = fetcher.name(),
            base_url = %target.base_url,
            timeout_ms = target.timeout.as_millis() as u64,
            mbeans = target.collect_mbeans,
            excludes_cores = !target.filter.is_empty(),
            "Solr collector initialised"
        );
        Self {
            fetcher,
            target,
            in_flight: Mutex::new(()),
        }
    }

    /// 执行一次采集
    ///
    /// 从不返回错误：传输错误与顶层解析错误都体现在 `success` 上，
    /// 结果中总是包含 `solr_up` 和采集耗时两个指标。
    /// 超时只会让 core 状态请求失败；mbeans 请求超出预算时保留已有的 core 统计。
    pub async fn collect(&self) -> CollectionResult {
        let _guard = self.in_flight.lock().await;
        let start = Instant::now();
        let deadline = start + self.target.timeout;

        let outcome = tokio::time::timeout_at(deadline, self.fetch_core_status()).await;
        let (success, mut samples) = match outcome {
            Ok(Ok(mut records)) => {
                if self.target.collect_mbeans {
                    self.enrich_before(&mut records, deadline).await;
                }
                let failed = records.iter().filter(|r| r.is_failed()).count();
                debug!(cores = records.len(), failed, "Parsed core statistics");
                (true, metric_synthesizer::synthesize(&records))
            }
            Ok(Err(err)) => {
                warn!(error = %err, "Failed to scrape Solr");
                (false, Vec::new())
            }
            Err(_) => {
                warn!(
                    timeout_ms = self.target.timeout.as_millis() as u64,
                    "Scraping Solr exceeded the timeout budget"
                );
                (false, Vec::new())
            }
        };

        let duration = start.elapsed();
        samples.extend(metric_synthesizer::scrape_samples(success, duration));
        debug!(
            success,
            samples = samples.len(),
            elapsed_ms = duration.as_millis() as u64,
            "Collection finished"
        );

        CollectionResult {
            samples,
            success,
            duration,
        }
    }

    async fn fetch_core_status(&self) -> Result<Vec<CoreStatRecord>, ScrapeError> {
        let payload = self.fetcher.fetch(CORE_STATUS_PATH).await?;
        let records = stats_parser::parse_core_status(&payload)?;
        drop(payload);

        let discovered = records.len();
        let records = self.target.filter.filter(records);
        if records.len() != discovered {
            debug!(
                discovered,
                retained = records.len(),
                "Excluded cores from monitoring"
            );
        }

        Ok(records)
    }

    /// 依次补充 mbeans 统计，到达截止时间后跳过剩余的 core
    async fn enrich_before(&self, records: &mut [CoreStatRecord], deadline: Instant) {
        for record in records.iter_mut() {
            let core = record.core().to_string();
            if tokio::time::timeout_at(deadline, self.enrich_with_mbeans(record))
                .await
                .is_err()
            {
                warn!(
                    core = %core,
                    timeout_ms = self.target.timeout.as_millis() as u64,
                    "Timeout budget exhausted while fetching mbeans, skipping remaining cores"
                );
                break;
            }
        }
    }

    /// 获取 mbeans 统计并合并到记录中，失败只记录日志
    async fn enrich_with_mbeans(&self, record: &mut CoreStatRecord) {
        let CoreStatRecord::Parsed { core, stats } = record else {
            return;
        };

        let payload = match self.fetcher.fetch(&mbeans_path(core)).await {
            Ok(payload) => payload,
            Err(err) => {
                warn!(core = %core, error = %err, "Failed to fetch mbeans");
                return;
            }
        };

        match stats_parser::parse_mbeans(core, &payload) {
            Ok(mbeans) => stats.mbeans = mbeans,
            Err(err) => warn!(core = %core, error = %err, "Failed to parse mbeans"),
        }
    }
}

#[cfg(test)]
#[path = "collector_test.rs"]
mod tests;
