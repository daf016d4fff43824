// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 基础设施层模块
///
/// 负责与外部系统交互的技术细节：
/// - 可观测性（observability）：Prometheus 文本渲染与 Solr 进程指标
pub mod observability;
