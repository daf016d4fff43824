// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 配置模块
///
/// 处理命令行参数、配置文件和环境变量
pub mod config;

/// 领域模块
///
/// 包含 Solr 统计解析、core 过滤、指标合成与采集编排
pub mod domain;

/// 引擎模块
///
/// 实现访问 Solr 管理接口的 HTTP 客户端
pub mod engines;

/// 基础设施模块
///
/// 提供 Prometheus 渲染和进程指标采集
pub mod infrastructure;

/// 表示层模块
///
/// 处理HTTP请求和响应，包括路由和处理器
pub mod presentation;

/// 工具模块
///
/// 提供错误类型和日志初始化
pub mod utils;
