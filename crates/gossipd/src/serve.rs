//! `gossipd serve`.

use anyhow::Context;
use gossip_api::ApiConfig;
use gossip_core::{ExporterConfig, FileSource};
use gossip_metrics::PeerCollector;
use prometheus::Registry;
use tracing::{info, warn};

pub async fn run(config: ExporterConfig) -> anyhow::Result<()> {
    config.validate()?;
    let addr = config.listen_addr()?;
    let collect_timeout = config.collect_timeout()?;

    let collector = PeerCollector::new(FileSource::new(&config.snapshot.path))?
        .with_mode(config.snapshot.decode);
    let registry = Registry::new();
    registry.register(Box::new(collector))?;

    let router = gossip_api::build_router(
        registry,
        ApiConfig {
            metrics_path: config.server.metrics_path.clone(),
            collect_timeout,
        },
    );

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;

    info!(
        %addr,
        path = %config.server.metrics_path,
        snapshot = %config.snapshot.path.display(),
        decode = %config.snapshot.decode,
        "gossip exporter listening"
    );

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("gossip exporter stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "failed to install CTRL+C handler; running until killed");
        std::future::pending::<()>().await;
    }
    info!("shutdown signal received");
}
