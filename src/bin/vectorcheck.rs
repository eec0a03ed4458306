//! Server binary for vectorcheck.
//!
//! A thin shim over the library crate that maps CLI flags to a
//! `ServiceConfig`, binds a listener, and serves the router until ctrl-c.

use anyhow::{Context, Result};
use clap::Parser;
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;
use vectorcheck::server::{router, AppState};
use vectorcheck::ServiceConfig;

#[derive(Debug, Parser)]
#[command(
    name = "vectorcheck",
    about = "HTTP service that classifies PDF pages as vector artwork versus plain text",
    version
)]
struct Args {
    /// Socket address to listen on.
    #[arg(long, env = "VECTORCHECK_BIND", default_value = "127.0.0.1:8080")]
    bind: SocketAddr,

    /// Maximum PDF download size in megabytes.
    #[arg(long, env = "VECTORCHECK_MAX_DOWNLOAD_MB", default_value_t = 50)]
    max_download_mb: u64,

    /// TCP/TLS connect timeout in seconds.
    #[arg(long, env = "VECTORCHECK_CONNECT_TIMEOUT_SECS", default_value_t = 10)]
    connect_timeout_secs: u64,

    /// Read timeout between body chunks in seconds.
    #[arg(long, env = "VECTORCHECK_READ_TIMEOUT_SECS", default_value_t = 30)]
    read_timeout_secs: u64,

    /// Maximum retries on transient download failures.
    #[arg(long, env = "VECTORCHECK_MAX_RETRIES", default_value_t = 3)]
    max_retries: u32,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    let config = ServiceConfig::builder()
        .max_download_bytes(args.max_download_mb * 1024 * 1024)
        .connect_timeout_secs(args.connect_timeout_secs)
        .read_timeout_secs(args.read_timeout_secs)
        .max_retries(args.max_retries)
        .build()
        .context("invalid service configuration")?;

    let state = Arc::new(AppState::new(&config).context("failed to initialise service state")?);
    let app = router(state);

    let listener = tokio::net::TcpListener::bind(args.bind)
        .await
        .with_context(|| format!("failed to bind {}", args.bind))?;
    info!(addr = %args.bind, "vectorcheck listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    info!("vectorcheck stopped");
    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("shutdown signal received");
    }
}
