// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// HTTP请求处理器模块
///
/// 每次抓取请求都会触发一次完整的 Solr 采集
pub mod metrics_handler;
