//! Request listener: the loopback HTTP surface over the task bridge.
//!
//! Three routes (`GET /ping`, `GET /state`, `POST /tool`) plus a JSON 404
//! fallback, all behind a shared-secret `X-Token` check that runs before any
//! routing. Bridge outcomes are always HTTP 200; operation failures are data
//! (`ok:false`), not transport failures.

mod routes;
pub mod types;

use std::sync::Arc;

use anyhow::Context;
use axum::middleware;
use axum::routing::{get, post};
use axum::Router;
use tower_http::trace::TraceLayer;

use crate::bridge::BridgeHandle;
use crate::config::Config;
use crate::tools::Registry;

/// Shared state for the listener.
pub struct AppState<H> {
    bridge: BridgeHandle<H>,
    registry: Arc<Registry<H>>,
    token: String,
}

impl<H> AppState<H> {
    pub fn new(bridge: BridgeHandle<H>, registry: Arc<Registry<H>>, token: String) -> Self {
        Self {
            bridge,
            registry,
            token,
        }
    }

    fn token_matches(&self, provided: Option<&str>) -> bool {
        provided == Some(self.token.as_str())
    }
}

/// Build the full router, auth middleware included.
pub fn router<H: Send + 'static>(state: Arc<AppState<H>>) -> Router {
    Router::new()
        .route("/ping", get(routes::get_ping))
        .route("/state", get(routes::get_state::<H>))
        .route("/tool", post(routes::post_tool::<H>))
        .fallback(routes::not_found)
        .layer(middleware::from_fn_with_state(
            state.clone(),
            routes::require_token::<H>,
        ))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Bind and serve until the process exits.
pub async fn serve<H: Send + 'static>(
    config: &Config,
    bridge: BridgeHandle<H>,
    registry: Arc<Registry<H>>,
) -> anyhow::Result<()> {
    // The /state route depends on this entry of the fixed table.
    registry
        .lookup("get_state")
        .context("registry must provide a 'get_state' handler")?;

    let state = Arc::new(AppState::new(bridge, registry, config.token.clone()));
    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;

    tracing::info!(%addr, "request listener started");
    axum::serve(listener, router(state)).await?;

    Ok(())
}
