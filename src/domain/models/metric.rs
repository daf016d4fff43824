// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use std::time::Duration;

/// 指标类型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetricKind {
    Counter,
    Gauge,
}

/// 单个指标样本
#[derive(Debug, Clone, PartialEq)]
pub struct MetricSample {
    pub name: String,
    /// 标签，按插入顺序
    pub labels: Vec<(String, String)>,
    pub value: f64,
    pub kind: MetricKind,
}

impl MetricSample {
    pub fn gauge(name: impl Into<String>, value: f64) -> Self {
        Self {
            name: name.into(),
            labels: Vec::new(),
            value,
            kind: MetricKind::Gauge,
        }
    }

    pub fn counter(name: impl Into<String>, value: f64) -> Self {
        Self {
            name: name.into(),
            labels: Vec::new(),
            value,
            kind: MetricKind::Counter,
        }
    }

    /// 追加一个标签
    pub fn with_label(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.labels.push((key.into(), value.into()));
        self
    }

    /// 读取标签值
    pub fn label(&self, key: &str) -> Option<&str> {
        self.labels
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

/// 一次采集的完整结果
///
/// 不与其他采集结果合并，只代表单次抓取
#[derive(Debug, Clone)]
pub struct CollectionResult {
    pub samples: Vec<MetricSample>,
    pub success: bool,
    pub duration: Duration,
}

impl CollectionResult {
    /// 带有 core 标签的样本中出现的 core 名称（去重，按出现顺序）
    pub fn cores(&self) -> Vec<&str> {
        let mut cores: Vec<&str> = Vec::new();
        for core in self.samples.iter().filter_map(|s| s.label("core")) {
            if !cores.contains(&core) {
                cores.push(core);
            }
        }
        cores
    }

    /// 按名称查找样本
    pub fn find<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a MetricSample> + 'a {
        self.samples.iter().filter(move |s| s.name == name)
    }
}
