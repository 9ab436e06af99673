//! wagemap-api - county prevailing-wage service
//!
//! Serves `/soc-index` and `/wages` (also under `/api`) from the FLAG wage
//! exports and Census/BLS reference files in the data directory.

use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tokio::signal;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use wagemap_api::{build_router, AppState};
use wagemap_common::config::{resolve_config_path, resolve_data_dir, DataSources, TomlConfig};

/// Command-line arguments for wagemap-api
#[derive(Parser, Debug)]
#[command(name = "wagemap-api")]
#[command(about = "County prevailing-wage map service")]
#[command(version)]
struct Args {
    /// Config file (defaults to WAGEMAP_CONFIG, then the platform config dir)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Directory holding the source tables (defaults to WAGEMAP_DATA_DIR, then config, then ./data)
    #[arg(short, long)]
    data_dir: Option<PathBuf>,

    /// Interface to bind
    #[arg(long, env = "WAGEMAP_HOST")]
    host: Option<String>,

    /// Port to listen on
    #[arg(short, long, env = "WAGEMAP_PORT")]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let config_path = resolve_config_path(args.config.as_deref());
    let config = TomlConfig::load(config_path.as_deref()).context("Failed to load config")?;

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.logging.level.clone().into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting wagemap-api v{}", env!("CARGO_PKG_VERSION"));
    match &config_path {
        Some(path) => info!("Config: {}", path.display()),
        None => info!("Config: built-in defaults"),
    }

    let data_dir = resolve_data_dir(args.data_dir.as_deref(), &config);
    info!("Data directory: {}", data_dir.display());
    if !data_dir.is_dir() {
        warn!("Data directory does not exist; requests will fail until it is populated");
    }

    let state = AppState::new(DataSources::new(data_dir, config.sources.clone()), &config);

    if config.preload {
        match state.references.run_blocking(|cache| cache.warm()).await {
            Ok(()) => info!("Reference tables preloaded"),
            Err(e) => warn!("Preload failed, tables will load on first request: {}", e),
        }
    }

    let app = build_router(state);

    let host = args.host.unwrap_or(config.host);
    let port = args.port.unwrap_or(config.port);
    let addr: SocketAddr = format!("{}:{}", host, port)
        .parse()
        .with_context(|| format!("Invalid listen address {}:{}", host, port))?;

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .context("Failed to bind to address")?;
    info!("Listening on http://{}", addr);
    info!("Health check: http://{}/health", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server shutdown complete");
    Ok(())
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, shutting down");
        },
        _ = terminate => {
            info!("Received terminate signal, shutting down");
        },
    }
}
