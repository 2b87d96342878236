//! HTTP server lifecycle.

use std::net::SocketAddr;
use std::time::Duration;

use axum::middleware;
use tokio::signal;
use tracing::{info, warn};
use trajview_core::api::HttpServerConfig;

use crate::http::{
    middleware::{create_middleware_stack, request_logger},
    routes::create_router,
    AppState,
};

/// Binds and serves until Ctrl+C, SIGTERM, or a send on `AppState::shutdown_tx`.
pub async fn start_server(config: &HttpServerConfig, state: AppState) -> anyhow::Result<()> {
    let app = create_router(state.clone())
        .layer(middleware::from_fn(request_logger))
        .layer(create_middleware_stack(Duration::from_secs(
            config.request_timeout_secs,
        )));

    let addr: SocketAddr = format!("{}:{}", config.host, config.port).parse()?;
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!(
        session_id = %state.session_id,
        source = state.loader.source_name(),
        "HTTP server listening on http://{}",
        listener.local_addr()?
    );

    let mut shutdown_rx = state.shutdown_tx.subscribe();
    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            tokio::select! {
                _ = signal::ctrl_c() => {
                    info!("Received Ctrl+C signal");
                }
                _ = shutdown_rx.recv() => {
                    info!("Received in-process shutdown signal");
                }
                _ = wait_for_sigterm() => {
                    info!("Received SIGTERM signal");
                }
            }
            info!("Starting graceful shutdown...");
        })
        .await?;

    info!("Server shutdown complete");
    Ok(())
}

/// Resolves on SIGTERM (Unix).
#[cfg(unix)]
async fn wait_for_sigterm() {
    use tokio::signal::unix::{signal, SignalKind};

    match signal(SignalKind::terminate()) {
        Ok(mut sigterm) => {
            sigterm.recv().await;
        }
        Err(e) => {
            warn!("Failed to install SIGTERM handler: {}", e);
            std::future::pending::<()>().await
        }
    }
}

/// No SIGTERM outside Unix; never resolves.
#[cfg(not(unix))]
async fn wait_for_sigterm() {
    std::future::pending::<()>().await
}
