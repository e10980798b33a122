mod cli;
mod telemetry;

use crate::cli::{StorageBackendArg, CLI};
use anyhow::Context;
use burrow_core::Backend;
use burrow_gateway::{App, AppState};
use burrow_lifecycle::{LifecycleSettings, MappingManager};
use burrow_storage::{InMemoryBackend, MySqlBackend, RedisBackend};
use clap::Parser;
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = CLI::parse();
    let _telemetry = telemetry::init(config.log_format, config.otlp_endpoint.as_deref())?;

    info!(
        listen_addr = %config.listen_addr,
        storage_backend = %config.storage,
        ttl_seconds = config.ttl_seconds,
        creation_path = %config.creation_path,
        "starting gateway server"
    );

    let settings = LifecycleSettings::builder()
        .ttl_seconds(config.ttl_seconds)
        .creation_path(config.creation_path.clone())
        .build();

    match config.storage {
        StorageBackendArg::InMemory => {
            run_server(config.listen_addr, InMemoryBackend::new(), settings).await?;
        }
        StorageBackendArg::Mysql => {
            let mysql_dsn = config
                .mysql_dsn
                .context("mysql dsn is required when storage backend is mysql")?;
            let backend = MySqlBackend::connect(&mysql_dsn)
                .await
                .context("failed to connect to mysql")?;
            if config.mysql_bootstrap_schema {
                backend
                    .bootstrap_schema()
                    .await
                    .context("failed to bootstrap mysql schema")?;
                info!("mysql schema ready");
            }
            run_server(config.listen_addr, backend, settings).await?;
        }
        StorageBackendArg::Redis => {
            let redis_url = config
                .redis_url
                .context("redis url is required when storage backend is redis")?;
            let backend = RedisBackend::connect(&redis_url, config.redis_key_prefix)
                .await
                .context("failed to connect to redis")?;
            run_server(config.listen_addr, backend, settings).await?;
        }
    }

    Ok(())
}

async fn run_server<B: Backend>(
    listen_addr: SocketAddr,
    backend: B,
    settings: LifecycleSettings,
) -> anyhow::Result<()> {
    let lifecycle = MappingManager::new(backend, settings);
    let app = App::router(AppState::new(Arc::new(lifecycle)));

    let listener = tokio::net::TcpListener::bind(listen_addr)
        .await
        .with_context(|| format!("failed to bind {listen_addr}"))?;
    info!(listen_addr = %listener.local_addr()?, "gateway listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("gateway server failed")
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("shutting down gateway server");
}
