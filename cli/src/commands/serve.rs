//! `trajview serve`: the local HTTP viewer.

use tokio::sync::broadcast;
use trajview_core::api::{AppConfig, CliError, Loader};
use uuid::Uuid;

use super::cli::ServeArgs;
use crate::http::{server, AppState};

/// Starts the server with a generated session id unless one is given, and
/// returns once it has shut down.
pub async fn handle_serve(args: ServeArgs, cfg: &AppConfig, loader: Loader) -> Result<(), CliError> {
    let session_id = args
        .session_id
        .unwrap_or_else(|| Uuid::new_v4().to_string());

    let (shutdown_tx, _) = broadcast::channel(1);
    let state = AppState::new(session_id.clone(), loader, shutdown_tx);

    tracing::info!(
        session_id = %session_id,
        host = %cfg.http_server.host,
        port = cfg.http_server.port,
        "starting trajectory viewer"
    );
    server::start_server(&cfg.http_server, state)
        .await
        .map_err(CliError::Serve)
}
