// Copyright 2025 Kirky.X
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use crate::engines::traits::{StatsFetcher, TransportError};
use async_trait::async_trait;
use bytes::Bytes;
use std::time::{Duration, Instant};
use tracing::debug;

/// 基于 reqwest 的 Solr 管理接口客户端
///
/// 超时覆盖整个请求（连接 + 读取响应体）
pub struct ReqwestEngine {
    client: reqwest::Client,
    base_url: String,
}

impl ReqwestEngine {
    /// 创建新的客户端
    ///
    /// # 参数
    ///
    /// * `base_url` - Solr 地址加上下文路径，例如 `http://localhost:8080/solr`
    /// * `timeout` - 单次请求超时时间
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, TransportError> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("solr-exporter/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .connect_timeout(timeout)
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}/{}", self.base_url, path)
        }
    }
}

#[async_trait]
impl StatsFetcher for ReqwestEngine {
    /// 执行 HTTP GET
    ///
    /// # 返回值
    ///
    /// * `Ok(Bytes)` - 2xx 响应体
    /// * `Err(TransportError)` - 超时、连接失败或非 2xx 状态码
    async fn fetch(&self, path: &str) -> Result<Bytes, TransportError> {
        let url = self.url(path);
        let start = Instant::now();

        let response = self.client.get(&url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(TransportError::UnexpectedStatus(status.as_u16()));
        }

        let body = response.bytes().await?;
        debug!(
            url = %url,
            bytes = body.len(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Fetched Solr stats"
        );
        Ok(body)
    }

    fn name(&self) -> &'static str {
        "reqwest"
    }
}

#[cfg(test)]
#[path = "reqwest_engine_test.rs"]
mod tests;
