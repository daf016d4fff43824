// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use std::time::Duration;
use url::Url;

use crate::config::settings::SolrSettings;
use crate::domain::services::core_filter::CoreFilter;
use crate::utils::errors::ConfigError;

/// 抓取目标
///
/// 启动时根据配置构建一次，之后只读共享
#[derive(Debug, Clone)]
pub struct ScrapeTarget {
    /// Solr 地址与上下文路径拼接后的基础 URL，不以 '/' 结尾
    pub base_url: String,
    /// 整个采集的超时时间
    pub timeout: Duration,
    /// 已编译的 core 排除规则
    pub filter: CoreFilter,
    /// 是否采集 mbeans 统计
    pub collect_mbeans: bool,
}

impl ScrapeTarget {
    /// 根据 Solr 配置构建抓取目标
    ///
    /// # Returns
    ///
    /// * `Ok(ScrapeTarget)` - 校验通过的抓取目标
    /// * `Err(ConfigError)` - 地址、超时或排除正则无效
    pub fn from_settings(settings: &SolrSettings) -> Result<Self, ConfigError> {
        let timeout = parse_timeout(&settings.timeout)?;
        let filter = CoreFilter::new(&settings.excluded_core)?;
        let base_url = build_base_url(&settings.address, &settings.context_path)?;

        Ok(Self {
            base_url,
            timeout,
            filter,
            collect_mbeans: settings.mbeans,
        })
    }
}

fn parse_timeout(raw: &str) -> Result<Duration, ConfigError> {
    match humantime::parse_duration(raw.trim()) {
        Ok(timeout) if !timeout.is_zero() => Ok(timeout),
        _ => Err(ConfigError::InvalidTimeout(raw.to_string())),
    }
}

fn build_base_url(address: &str, context_path: &str) -> Result<String, ConfigError> {
    let url = Url::parse(address).map_err(|_| ConfigError::InvalidAddress(address.to_string()))?;
    if !matches!(url.scheme(), "http" | "https") || url.host_str().is_none() {
        return Err(ConfigError::InvalidAddress(address.to_string()));
    }

    let context = context_path.trim().trim_matches('/');
    let address = address.trim_end_matches('/');
    if context.is_empty() {
        Ok(address.to_string())
    } else {
        Ok(format!("{}/{}", address, context))
    }
}
