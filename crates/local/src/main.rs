//! Local LDP server
//!
//! Keeps resources in memory, optionally seeded from a blueprint, and
//! serves them both directly and through the `/proxy?url=` endpoint.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use tokio::sync::watch;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};
use url::Url;

use common::ldp::{MemoryLdpStore, ResourceStore};
use common::seed::{Blueprint, SeedWriter};
use local::http::LocalState;

const FINAL_SHUTDOWN_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Address to listen on
    #[arg(long, default_value = "127.0.0.1:8111")]
    listen_addr: SocketAddr,

    /// URL clients reach this server at (defaults to http://{listen_addr}/)
    #[arg(long)]
    public_url: Option<Url>,

    /// Blueprint whose documents are loaded at startup
    #[arg(long)]
    blueprint: Option<PathBuf>,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    log_level: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize tracing
    let (non_blocking_writer, _guard) = tracing_appender::non_blocking(std::io::stdout());
    let log_level: tracing::Level = args.log_level.parse().unwrap_or(tracing::Level::INFO);
    let env_filter = EnvFilter::builder()
        .with_default_directive(log_level.into())
        .from_env_lossy();

    let stdout_layer = tracing_subscriber::fmt::layer()
        .compact()
        .with_writer(non_blocking_writer)
        .with_filter(env_filter);

    tracing_subscriber::registry().with(stdout_layer).init();

    let base_url = match args.public_url {
        Some(url) => url,
        None => Url::parse(&format!("http://{}/", args.listen_addr))?,
    };

    let resources = ResourceStore::new();
    if let Some(path) = &args.blueprint {
        let writer = SeedWriter::new(Blueprint::load(path)?);
        let store = MemoryLdpStore::with_resources(resources.clone());
        let published = writer.publish(&store).await?;
        tracing::info!("Loaded {} documents from {}", published, path.display());
    }

    let (shutdown_tx, shutdown_rx) = watch::channel(());
    let graceful_shutdown = async move {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("failed to listen for ctrl+c: {}", e);
            return;
        }
        tracing::info!("Received shutdown signal");
        let _ = shutdown_tx.send(());
    };
    tokio::spawn(graceful_shutdown);

    let listener = tokio::net::TcpListener::bind(args.listen_addr).await?;
    let state = LocalState::new(resources, base_url);
    let server = tokio::spawn(local::http::run(listener, state, shutdown_rx.clone()));

    let _ = shutdown_rx.clone().changed().await;

    match tokio::time::timeout(FINAL_SHUTDOWN_TIMEOUT, server).await {
        Ok(Ok(Err(e))) => tracing::error!("HTTP server error: {}", e),
        Ok(Err(e)) => tracing::error!("HTTP server task failed: {}", e),
        Err(_) => tracing::warn!("HTTP server did not stop in time"),
        Ok(Ok(Ok(()))) => {}
    }

    tracing::info!("Local server shutdown complete");
    Ok(())
}
