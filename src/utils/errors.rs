// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use thiserror::Error;

/// 传输层错误类型
///
/// 由 HTTP 客户端适配器返回，在采集器边界被转换为失败的采集结果
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransportError {
    /// 请求在超时时间内未完成（连接 + 读取）
    #[error("Request timed out")]
    Timeout,

    /// 无法建立连接
    #[error("Connection refused: {0}")]
    ConnectionRefused(String),

    /// 非 2xx 响应
    #[error("Unexpected status code: {0}")]
    UnexpectedStatus(u16),

    /// 其他传输错误
    #[error("Transport error: {0}")]
    Other(String),
}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            TransportError::Timeout
        } else if err.is_connect() {
            TransportError::ConnectionRefused(err.to_string())
        } else if let Some(status) = err.status() {
            TransportError::UnexpectedStatus(status.as_u16())
        } else {
            TransportError::Other(err.to_string())
        }
    }
}

/// 统计数据解析错误
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// 顶层结构无法解析，无法枚举 core，整个采集失败
    #[error("Malformed top-level payload: {0}")]
    HardTopLevel(String),

    /// 单个 core 的统计段无法解析，只影响该 core
    #[error("Malformed statistics for core '{core}': {reason}")]
    SoftPerCore { core: String, reason: String },
}

/// 配置错误
///
/// 仅在启动时出现，进程必须拒绝启动
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("无效的 core 排除正则 '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("无效的超时时间 '{0}'")]
    InvalidTimeout(String),

    #[error("无效的 Solr 地址 '{0}'")]
    InvalidAddress(String),

    #[error("配置加载失败: {0}")]
    Load(#[from] config::ConfigError),
}

/// 进程指标采集错误
#[derive(Error, Debug)]
pub enum ProcessMetricsError {
    #[error("Can't read pid file: {0}")]
    PidFile(#[from] std::io::Error),

    #[error("Can't parse pid file: {0}")]
    InvalidPid(String),

    #[error("Process {0} not found")]
    ProcessNotFound(u32),
}
