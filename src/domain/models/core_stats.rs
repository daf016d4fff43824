// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use std::collections::BTreeMap;

/// mbeans 统计的分类
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MBeanCategory {
    /// 查询处理器，例如 /select
    QueryHandler,
    /// 更新处理器
    UpdateHandler,
    /// 缓存，例如 filterCache
    Cache,
}

impl MBeanCategory {
    /// 根据 Solr 返回的分类名识别分类
    ///
    /// 不识别的分类返回 None
    pub fn from_solr(name: &str) -> Option<Self> {
        match name {
            "QUERYHANDLER" | "QUERY" => Some(MBeanCategory::QueryHandler),
            "UPDATEHANDLER" | "UPDATE" => Some(MBeanCategory::UpdateHandler),
            "CACHE" => Some(MBeanCategory::Cache),
            _ => None,
        }
    }
}

/// 单个 mbean 的统计值
#[derive(Debug, Clone, PartialEq)]
pub struct MBeanStats {
    pub category: MBeanCategory,
    /// mbean 名称，例如 "/select" 或 "filterCache"
    pub name: String,
    pub values: BTreeMap<String, f64>,
}

/// 一个 core 成功解析后的统计数据
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CoreStats {
    /// core STATUS 中的数值，例如 numDocs、uptime
    pub values: BTreeMap<String, f64>,
    /// mbeans 中的处理器与缓存统计
    pub mbeans: Vec<MBeanStats>,
}

/// 单个 core 的统计记录
///
/// 每个 core 独立解析，失败的 core 保留名称以便定位问题
#[derive(Debug, Clone, PartialEq)]
pub enum CoreStatRecord {
    /// 解析成功
    Parsed { core: String, stats: CoreStats },
    /// 该 core 的统计段无法解析
    Failed { core: String, reason: String },
}

impl CoreStatRecord {
    /// core 名称
    pub fn core(&self) -> &str {
        match self {
            CoreStatRecord::Parsed { core, .. } | CoreStatRecord::Failed { core, .. } => core,
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, CoreStatRecord::Failed { .. })
    }
}
