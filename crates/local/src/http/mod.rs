use axum::extract::DefaultBodyLimit;
use axum::routing::any;
use axum::Router;
use http::header::{ACCEPT, CONTENT_TYPE, ORIGIN};
use http::Method;
use tokio::net::TcpListener;
use tokio::sync::watch;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::{DefaultOnFailure, DefaultOnResponse, TraceLayer};
use tower_http::LatencyUnit;
use url::Url;

use common::ldp::ResourceStore;

mod handlers;
mod health;
mod resource;

pub use handlers::not_found_handler;

const STATUS_PREFIX: &str = "/_status";

/// Maximum upload size in bytes (50 MB)
pub const MAX_UPLOAD_SIZE_BYTES: usize = 50 * 1024 * 1024;

#[derive(Debug, Clone)]
pub struct LocalState {
    /// Every resource the server knows, keyed by absolute URI
    pub store: ResourceStore,
    /// Absolute URI that request paths are resolved against
    pub base_url: Url,
}

impl LocalState {
    pub fn new(store: ResourceStore, base_url: Url) -> Self {
        Self { store, base_url }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum HttpServerError {
    #[error("an error occurred running the HTTP server: {0}")]
    ServingFailed(#[from] std::io::Error),
}

pub fn router(state: LocalState) -> Router {
    let trace_layer = TraceLayer::new_for_http()
        .on_response(
            DefaultOnResponse::new()
                .include_headers(false)
                .level(tracing::Level::INFO)
                .latency_unit(LatencyUnit::Micros),
        )
        .on_failure(DefaultOnFailure::new().latency_unit(LatencyUnit::Micros));

    let cors_layer = CorsLayer::new()
        .allow_methods(vec![
            Method::GET,
            Method::HEAD,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
        ])
        .allow_headers(vec![ACCEPT, CONTENT_TYPE, ORIGIN])
        .allow_origin(Any)
        .allow_credentials(false);

    Router::new()
        .nest(STATUS_PREFIX, health::router())
        .route("/proxy", any(resource::proxy_handler))
        .fallback(resource::direct_handler)
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_SIZE_BYTES))
        .with_state(state)
        .layer(cors_layer)
        .layer(trace_layer)
}

/// Serve on `listener` until `shutdown_rx` fires.
pub async fn run(
    listener: TcpListener,
    state: LocalState,
    mut shutdown_rx: watch::Receiver<()>,
) -> Result<(), HttpServerError> {
    tracing::info!(addr = ?listener.local_addr()?, base = %state.base_url, "LDP server listening");

    axum::serve(listener, router(state))
        .with_graceful_shutdown(async move {
            let _ = shutdown_rx.changed().await;
        })
        .await?;

    Ok(())
}
