// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use std::time::Duration;
use tracing::debug;

use crate::domain::models::core_stats::{CoreStatRecord, CoreStats, MBeanCategory};
use crate::domain::models::metric::{MetricKind, MetricSample};

/// 采集是否成功的指标名
pub const UP_METRIC: &str = "solr_up";
/// 采集耗时的指标名
pub const SCRAPE_DURATION_METRIC: &str = "solr_exporter_scrape_duration_seconds";

/// 统计值来源分组
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatGroup {
    /// core STATUS 中的值
    Core,
    /// mbeans 中的某一分类
    MBean(MBeanCategory),
}

impl StatGroup {
    /// mbean 名称对应的标签名
    fn label(self) -> Option<&'static str> {
        match self {
            StatGroup::Core => None,
            StatGroup::MBean(MBeanCategory::QueryHandler)
            | StatGroup::MBean(MBeanCategory::UpdateHandler) => Some("handler"),
            StatGroup::MBean(MBeanCategory::Cache) => Some("cache"),
        }
    }
}

/// 统计项到指标的映射
#[derive(Debug, Clone, Copy)]
pub struct StatMapping {
    pub group: StatGroup,
    /// Solr 返回的统计 key
    pub key: &'static str,
    pub metric: &'static str,
    pub kind: MetricKind,
    /// 数值缩放系数，例如毫秒转秒
    pub scale: f64,
    pub help: &'static str,
}

const fn mapping(
    group: StatGroup,
    key: &'static str,
    metric: &'static str,
    kind: MetricKind,
    help: &'static str,
) -> StatMapping {
    StatMapping {
        group,
        key,
        metric,
        kind,
        scale: 1.0,
        help,
    }
}

const QUERY: StatGroup = StatGroup::MBean(MBeanCategory::QueryHandler);
const UPDATE: StatGroup = StatGroup::MBean(MBeanCategory::UpdateHandler);
const CACHE: StatGroup = StatGroup::MBean(MBeanCategory::Cache);

use MetricKind::{Counter, Gauge};

/// 固定的统计项映射表，不在表中的 key 会被忽略
pub const STAT_MAPPINGS: &[StatMapping] = &[
    mapping(StatGroup::Core, "numDocs", "solr_core_num_docs", Gauge, "Number of documents in the index."),
    mapping(StatGroup::Core, "maxDoc", "solr_core_max_docs", Gauge, "Number of documents including deleted ones."),
    mapping(StatGroup::Core, "deletedDocs", "solr_core_deleted_docs", Gauge, "Number of deleted documents not yet merged away."),
    mapping(StatGroup::Core, "segmentCount", "solr_core_segment_count", Gauge, "Number of index segments."),
    mapping(StatGroup::Core, "sizeInBytes", "solr_core_index_size_bytes", Gauge, "Size of the index on disk in bytes."),
    mapping(StatGroup::Core, "version", "solr_core_index_version", Gauge, "Index version."),
    mapping(StatGroup::Core, "current", "solr_core_index_current", Gauge, "Whether the searcher is current (1) or not (0)."),
    StatMapping {
        group: StatGroup::Core,
        key: "uptime",
        metric: "solr_core_uptime_seconds",
        kind: Gauge,
        scale: 0.001,
        help: "Core uptime in seconds.",
    },
    mapping(QUERY, "requests", "solr_handler_requests_total", Counter, "Requests served by the handler."),
    mapping(QUERY, "errors", "solr_handler_errors_total", Counter, "Errors raised by the handler."),
    mapping(QUERY, "serverErrors", "solr_handler_server_errors_total", Counter, "Server errors raised by the handler."),
    mapping(QUERY, "clientErrors", "solr_handler_client_errors_total", Counter, "Client errors raised by the handler."),
    mapping(QUERY, "timeouts", "solr_handler_timeouts_total", Counter, "Requests that timed out in the handler."),
    mapping(QUERY, "totalTime", "solr_handler_request_time_milliseconds_total", Counter, "Total time spent in the handler in milliseconds."),
    mapping(QUERY, "avgTimePerRequest", "solr_handler_avg_time_per_request_milliseconds", Gauge, "Average time per request in milliseconds."),
    mapping(QUERY, "avgRequestsPerSecond", "solr_handler_avg_requests_per_second", Gauge, "Average requests per second since handler start."),
    mapping(UPDATE, "commits", "solr_update_commits_total", Counter, "Commits issued."),
    mapping(UPDATE, "autocommits", "solr_update_autocommits_total", Counter, "Automatic commits issued."),
    mapping(UPDATE, "cumulative_adds", "solr_update_adds_total", Counter, "Documents added since the core started."),
    mapping(UPDATE, "cumulative_errors", "solr_update_errors_total", Counter, "Update errors since the core started."),
    // Solr 7+ 的指标名
    mapping(UPDATE, "autoCommits", "solr_update_autocommits_total", Counter, "Automatic commits issued."),
    mapping(UPDATE, "cumulativeAdds", "solr_update_adds_total", Counter, "Documents added since the core started."),
    mapping(UPDATE, "cumulativeErrors", "solr_update_errors_total", Counter, "Update errors since the core started."),
    mapping(UPDATE, "docsPending", "solr_update_docs_pending", Gauge, "Documents pending commit."),
    mapping(CACHE, "lookups", "solr_cache_lookups_total", Counter, "Cache lookups."),
    mapping(CACHE, "hits", "solr_cache_hits_total", Counter, "Cache hits."),
    mapping(CACHE, "inserts", "solr_cache_inserts_total", Counter, "Cache inserts."),
    mapping(CACHE, "evictions", "solr_cache_evictions_total", Counter, "Cache evictions."),
    mapping(CACHE, "hitratio", "solr_cache_hit_ratio", Gauge, "Cache hit ratio."),
    mapping(CACHE, "size", "solr_cache_size", Gauge, "Number of entries in the cache."),
];

/// 查找映射
pub fn lookup(group: StatGroup, key: &str) -> Option<&'static StatMapping> {
    STAT_MAPPINGS
        .iter()
        .find(|m| m.group == group && m.key == key)
}

/// 按指标名查找说明文字
pub fn help_for(metric: &str) -> Option<&'static str> {
    match metric {
        UP_METRIC => Some("Whether the last scrape of Solr was successful (1) or not (0)."),
        SCRAPE_DURATION_METRIC => Some("Duration of the last scrape of Solr in seconds."),
        _ => STAT_MAPPINGS
            .iter()
            .find(|m| m.metric == metric)
            .map(|m| m.help),
    }
}

/// 把统计记录转换为指标样本
///
/// 失败的记录不产生样本，不影响其他 core
pub fn synthesize(records: &[CoreStatRecord]) -> Vec<MetricSample> {
    let mut samples = Vec::new();
    for record in records {
        match record {
            CoreStatRecord::Parsed { core, stats } => synthesize_core(core, stats, &mut samples),
            CoreStatRecord::Failed { core, reason } => {
                debug!(core = %core, reason = %reason, "No samples for failed core");
            }
        }
    }
    samples
}

fn synthesize_core(core: &str, stats: &CoreStats, samples: &mut Vec<MetricSample>) {
    for (key, value) in &stats.values {
        if let Some(mapping) = lookup(StatGroup::Core, key) {
            samples.push(sample(mapping, *value).with_label("core", core));
        }
    }

    for mbean in &stats.mbeans {
        let group = StatGroup::MBean(mbean.category);
        for (key, value) in &mbean.values {
            if let Some(mapping) = lookup(group, key) {
                let mut s = sample(mapping, *value).with_label("core", core);
                if let Some(label) = group.label() {
                    s = s.with_label(label, mbean.name.as_str());
                }
                samples.push(s);
            }
        }
    }
}

fn sample(mapping: &StatMapping, value: f64) -> MetricSample {
    MetricSample {
        name: mapping.metric.to_string(),
        labels: Vec::new(),
        value: value * mapping.scale,
        kind: mapping.kind,
    }
}

/// 每次采集都输出的两个采集级指标
pub fn scrape_samples(success: bool, duration: Duration) -> [MetricSample; 2] {
    [
        MetricSample::gauge(UP_METRIC, if success { 1.0 } else { 0.0 }),
        MetricSample::gauge(SCRAPE_DURATION_METRIC, duration.as_secs_f64()),
    ]
}

#[cfg(test)]
#[path = "metric_synthesizer_test.rs"]
mod tests;
