// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use clap::Parser;

const PID_FILE_HELP: &str = "Path to Solr pid file. If provided, the standard process metrics \
get exported for the Solr process, prefixed with 'solr_process_...'. The exporter needs read \
access to files owned by the Solr process. Depends on the availability of /proc.";

/// 命令行参数
///
/// 所有参数均为可选，未提供时使用配置文件/环境变量/默认值
#[derive(Parser, Debug, Default, Clone)]
#[command(name = "solr-exporter", version, about = "Solr detail exporter")]
pub struct Args {
    /// Address to listen on for unix sock access.
    #[arg(long = "unix-sock")]
    pub listen_address: Option<String>,

    /// Path under which to expose metrics.
    #[arg(long = "web.telemetry-path")]
    pub metrics_path: Option<String>,

    /// URI on which to scrape Solr.
    #[arg(long = "solr.address")]
    pub solr_address: Option<String>,

    /// Solr webapp context path.
    #[arg(long = "solr.context-path")]
    pub solr_context_path: Option<String>,

    /// Regex to exclude core from monitoring.
    #[arg(long = "solr.excluded-core")]
    pub solr_excluded_core: Option<String>,

    /// Timeout for trying to get stats from Solr (e.g. "5s", "500ms").
    #[arg(long = "solr.timeout")]
    pub solr_timeout: Option<String>,

    #[arg(long = "solr.pid-file", help = PID_FILE_HELP)]
    pub solr_pid_file: Option<String>,

    /// Also collect handler and cache statistics from each core's mbeans endpoint.
    #[arg(long = "solr.mbeans")]
    pub solr_mbeans: Option<bool>,

    /// Emit logs as JSON.
    #[arg(long = "log.json")]
    pub log_json: Option<bool>,
}
