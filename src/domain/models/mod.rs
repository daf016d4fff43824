// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 领域模型模块
///
/// - core 统计（core_stats）：单个 core 的解析结果
/// - 指标（metric）：指标样本与单次采集结果
/// - 抓取目标（scrape_target）：Solr 地址、超时与过滤规则
pub mod core_stats;
pub mod metric;
pub mod scrape_target;
