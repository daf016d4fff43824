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

use clap::Parser;
use solr_exporter::config::args::Args;
use solr_exporter::config::settings::Settings;
use solr_exporter::domain::models::scrape_target::ScrapeTarget;
use solr_exporter::domain::services::collector::Collector;
use solr_exporter::engines::reqwest_engine::ReqwestEngine;
use solr_exporter::infrastructure::observability::process::ProcessCollector;
use solr_exporter::presentation::handlers::metrics_handler::MetricsState;
use solr_exporter::presentation::routes;
use solr_exporter::utils::telemetry;
use std::io::ErrorKind;
use std::path::Path;
use std::sync::Arc;
use tokio::net::UnixListener;
use tracing::info;

/// 主函数
///
/// 应用程序入口点，负责初始化所有组件并启动服务
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Load configuration
    let args = Args::parse();
    let settings = Settings::load(&args)?;

    // 2. Initialize logging
    telemetry::init_telemetry(settings.log.json);
    info!(version = env!("CARGO_PKG_VERSION"), "Starting solr-exporter...");

    // 3. Build the scrape pipeline
    let target = Arc::new(ScrapeTarget::from_settings(&settings.solr)?);
    let engine = Arc::new(ReqwestEngine::new(target.base_url.clone(), target.timeout)?);
    let collector = Arc::new(Collector::new(engine, target));

    let process = settings.solr.pid_file().map(|path| {
        info!(pid_file = %path.display(), "Solr process metrics enabled");
        Arc::new(ProcessCollector::new(path))
    });

    let app = routes::routes(
        &settings.server.metrics_path,
        MetricsState::new(collector, process),
    );

    // 4. Start HTTP server on the unix socket
    let socket_path = Path::new(&settings.server.listen_address);
    remove_stale_socket(socket_path)?;
    let listener = UnixListener::bind(socket_path)?;
    info!(
        socket = %socket_path.display(),
        metrics_path = %settings.server.metrics_path,
        "Server listening"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    remove_stale_socket(socket_path)?;
    info!("Server stopped");
    Ok(())
}

fn remove_stale_socket(path: &Path) -> std::io::Result<()> {
    match std::fs::remove_file(path) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
        Err(e) => Err(e),
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for ctrl-c");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    info!("Shutdown signal received");
}
