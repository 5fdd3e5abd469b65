//! TodoMatic server
//!
//! Serves the task list page and JSON API on one port and Socket.IO on
//! another. All state lives in memory for the life of the process.

mod config;
mod error;
mod payload;
mod render;
mod routes;
mod session;
mod socket;
mod state;
mod view;

use anyhow::Context;
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::{ServerConfig, DEFAULT_LOG_FILTER};
use crate::socket::create_socket_layer;
use crate::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| DEFAULT_LOG_FILTER.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = ServerConfig::from_env()?;
    tracing::info!(?config, "Loaded configuration");

    let app_state = AppState::from_config(&config);
    tracing::info!(
        "Task list ready with {} tasks",
        app_state.tasks().read().await.len()
    );

    let socket_layer = create_socket_layer(app_state.clone());

    // Page + REST API server
    let http_app = Router::new()
        .merge(routes::health::router())
        .merge(routes::page::router())
        .merge(routes::task::router())
        .with_state(app_state)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http());

    // Socket.IO server
    // Layers are applied bottom-to-top, so CorsLayer is added last to be applied first
    let socket_app = Router::new()
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(socket_layer);

    let http_addr = config.http_addr();
    let socket_addr = config.socket_addr();

    let http_listener = tokio::net::TcpListener::bind(http_addr)
        .await
        .with_context(|| format!("Failed to bind {http_addr}"))?;
    let socket_listener = tokio::net::TcpListener::bind(socket_addr)
        .await
        .with_context(|| format!("Failed to bind {socket_addr}"))?;

    tracing::info!("TodoMatic listening on http://{}", http_addr);
    tracing::info!("Socket.IO listening on {}", socket_addr);

    let http_handle = tokio::spawn(async move { axum::serve(http_listener, http_app).await });
    let socket_handle = tokio::spawn(async move { axum::serve(socket_listener, socket_app).await });

    let (http_result, socket_result) = tokio::try_join!(http_handle, socket_handle)?;
    http_result.context("HTTP server failed")?;
    socket_result.context("Socket.IO server failed")?;
    Ok(())
}
