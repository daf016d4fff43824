// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 领域层模块
///
/// 该模块包含导出器的核心逻辑，包括：
/// - 领域模型（models）：抓取目标、core 统计与指标样本
/// - 服务（services）：解析、过滤、指标合成与采集编排
///
/// 领域层只依赖 `StatsFetcher` 抽象，不关心具体的 HTTP 实现。
pub mod models;
pub mod services;
