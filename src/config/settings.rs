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

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::PathBuf;

use crate::config::args::Args;

/// 应用程序配置设置
///
/// 启动时加载一次，之后只读
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// 服务器配置
    pub server: ServerSettings,
    /// Solr 抓取配置
    pub solr: SolrSettings,
    /// 日志配置
    pub log: LogSettings,
}

/// 服务器配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    /// 监听的 unix socket 路径
    pub listen_address: String,
    /// 指标暴露路径
    pub metrics_path: String,
}

/// Solr 配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct SolrSettings {
    /// Solr 地址，例如 http://localhost:8080
    pub address: String,
    /// Solr webapp 上下文路径
    pub context_path: String,
    /// 排除 core 的正则，空字符串表示不排除
    pub excluded_core: String,
    /// 整个采集的超时时间 (humantime 格式，如 "5s")
    pub timeout: String,
    /// Solr pid 文件路径
    pub pid_file: Option<String>,
    /// 是否额外采集每个 core 的 mbeans 统计
    pub mbeans: bool,
}

/// 日志配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct LogSettings {
    /// 是否输出 JSON 格式日志
    pub json: bool,
}

impl SolrSettings {
    /// pid 文件路径，空字符串视为未配置
    pub fn pid_file(&self) -> Option<PathBuf> {
        self.pid_file
            .as_deref()
            .map(str::trim)
            .filter(|path| !path.is_empty())
            .map(PathBuf::from)
    }
}

impl Settings {
    /// 加载配置，命令行参数优先级最高
    ///
    /// # Returns
    ///
    /// * `Ok(Settings)` - 成功加载的配置
    /// * `Err(ConfigError)` - 配置加载失败
    pub fn load(args: &Args) -> Result<Self, ConfigError> {
        let env = std::env::var("APP_ENVIRONMENT").unwrap_or_else(|_| "default".to_string());
        let builder = Config::builder()
            // Start with default settings
            .set_default("server.listen_address", "/dev/shm/solr_detail_exporter.sock")?
            .set_default("server.metrics_path", "/metrics")?
            .set_default("solr.address", "http://localhost:8080")?
            .set_default("solr.context_path", "/solr")?
            .set_default("solr.excluded_core", "")?
            .set_default("solr.timeout", "5s")?
            .set_default("solr.mbeans", true)?
            .set_default("log.json", false)?
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", env)).required(false))
            .add_source(
                Environment::with_prefix("SOLR_EXPORTER")
                    .separator("__")
                    .try_parsing(true),
            )
            // Command line flags
            .set_override_option("server.listen_address", args.listen_address.clone())?
            .set_override_option("server.metrics_path", args.metrics_path.clone())?
            .set_override_option("solr.address", args.solr_address.clone())?
            .set_override_option("solr.context_path", args.solr_context_path.clone())?
            .set_override_option("solr.excluded_core", args.solr_excluded_core.clone())?
            .set_override_option("solr.timeout", args.solr_timeout.clone())?
            .set_override_option("solr.pid_file", args.solr_pid_file.clone())?
            .set_override_option("solr.mbeans", args.solr_mbeans)?
            .set_override_option("log.json", args.log_json)?;

        builder.build()?.try_deserialize()
    }
}

#[cfg(test)]
#[path = "settings_test.rs"]
mod tests;
