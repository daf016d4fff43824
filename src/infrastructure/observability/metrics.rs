// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use prometheus_client::collector::Collector;
use prometheus_client::encoding::{DescriptorEncoder, NoLabelSet};
use prometheus_client::metrics::MetricType;
use prometheus_client::registry::Registry;
use std::collections::HashMap;

use crate::domain::models::metric::{MetricKind, MetricSample};
use crate::domain::services::metric_synthesizer::help_for;
use crate::infrastructure::observability::process;

/// 构建信息指标名
pub const BUILD_INFO_METRIC: &str = "solr_exporter_build_info";

/// Prometheus 文本格式的 Content-Type
pub const CONTENT_TYPE: &str = "text/plain; version=0.0.4; charset=utf-8";

/// 构建信息样本，值恒为 1
pub fn build_info_sample() -> MetricSample {
    MetricSample::gauge(BUILD_INFO_METRIC, 1.0).with_label("version", env!("CARGO_PKG_VERSION"))
}

/// 同名样本组成的指标族
#[derive(Debug)]
struct Family {
    name: String,
    kind: MetricKind,
    samples: Vec<MetricSample>,
}

/// 单次抓取的样本快照，注册到临时 registry 后编码
#[derive(Debug)]
struct SnapshotCollector {
    families: Vec<Family>,
}

impl SnapshotCollector {
    /// 按名称分组，保持首次出现的顺序
    fn new(samples: Vec<MetricSample>) -> Self {
        let mut families: Vec<Family> = Vec::new();
        let mut index: HashMap<String, usize> = HashMap::new();

        for sample in samples {
            match index.get(&sample.name) {
                Some(&i) => families[i].samples.push(sample),
                None => {
                    index.insert(sample.name.clone(), families.len());
                    families.push(Family {
                        name: sample.name.clone(),
                        kind: sample.kind,
                        samples: vec![sample],
                    });
                }
            }
        }

        Self { families }
    }
}

impl Collector for SnapshotCollector {
    fn encode(&self, mut encoder: DescriptorEncoder) -> Result<(), std::fmt::Error> {
        for family in &self.families {
            let help = describe(&family.name).unwrap_or(family.name.as_str());
            let (name, metric_type) = match family.kind {
                // 编码器会为计数器追加 `_total`
                MetricKind::Counter => (
                    family
                        .name
                        .strip_suffix("_total")
                        .unwrap_or(family.name.as_str()),
                    MetricType::Counter,
                ),
                MetricKind::Gauge => (family.name.as_str(), MetricType::Gauge),
            };

            let mut metric_encoder = encoder.encode_descriptor(name, help, None, metric_type)?;
            for sample in &family.samples {
                if sample.labels.is_empty() {
                    encode_value(sample, &mut metric_encoder)?;
                } else {
                    let mut family_encoder = metric_encoder.encode_family(&sample.labels)?;
                    encode_value(sample, &mut family_encoder)?;
                }
            }
        }
        Ok(())
    }
}

fn encode_value(
    sample: &MetricSample,
    encoder: &mut prometheus_client::encoding::MetricEncoder<'_>,
) -> Result<(), std::fmt::Error> {
    match sample.kind {
        MetricKind::Counter => encoder.encode_counter::<NoLabelSet, _, u64>(&sample.value.max(0.0), None),
        MetricKind::Gauge => encoder.encode_gauge(&sample.value),
    }
}

fn describe(name: &str) -> Option<&'static str> {
    match name {
        BUILD_INFO_METRIC => Some("Build information of the Solr exporter."),
        name => help_for(name).or_else(|| process::help_for(name)),
    }
}

/// 把样本渲染为 Prometheus 文本格式
///
/// 每次调用都使用新的 registry，不会残留上一次抓取的数据。
/// 计数器与仪表盘都以浮点数输出。
pub fn render(samples: Vec<MetricSample>) -> Result<String, std::fmt::Error> {
    let mut registry = Registry::default();
    registry.register_collector(Box::new(SnapshotCollector::new(samples)));

    let mut buffer = String::new();
    prometheus_client::encoding::text::encode(&mut buffer, &registry)?;
    Ok(buffer)
}
