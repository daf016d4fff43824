// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 配置模块
///
/// 处理命令行参数与配置设置，包括监听地址、Solr 地址、超时等
pub mod args;
pub mod settings;
