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

use async_trait::async_trait;
use bytes::Bytes;

pub use crate::utils::errors::TransportError;

/// Solr 统计数据获取特质
///
/// 每次调用只做一次网络请求，不重试，调用之间不保存状态
#[async_trait]
pub trait StatsFetcher: Send + Sync {
    /// 获取相对于 `{solr 地址}{上下文路径}` 的路径
    async fn fetch(&self, path: &str) -> Result<Bytes, TransportError>;

    /// 引擎名称
    fn name(&self) -> &'static str;
}
