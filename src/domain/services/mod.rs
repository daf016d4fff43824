// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 领域服务模块
///
/// 包含的服务：
/// - 采集器（collector）：一次抓取的完整流程，并保证同一时刻只有一次采集
/// - core 过滤（core_filter）：按正则排除 core
/// - 指标合成（metric_synthesizer）：把 Solr 统计映射为指标样本
/// - 统计解析（stats_parser）：解析 Solr 管理接口的 JSON 响应
pub mod collector;
pub mod core_filter;
pub mod metric_synthesizer;
pub mod stats_parser;
