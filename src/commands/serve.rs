//! Serve command - Starts the HTTP server.

use std::sync::Arc;

use crate::api::{create_router, AppState};
use crate::cli::args::ServeArgs;
use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::infra::Database;

/// Execute the serve command
pub async fn execute(args: ServeArgs, config: Config) -> AppResult<()> {
    let config = match (args.host, args.port) {
        (None, None) => config,
        (host, port) => {
            let host = host.unwrap_or_else(|| config.server_host.clone());
            let port = port.unwrap_or(config.server_port);
            config.with_server(host, port)
        }
    };

    let app_state = if args.in_memory {
        tracing::warn!("Using in-memory storage; accounts are lost on shutdown");
        AppState::in_memory(&config)
    } else {
        let db = Arc::new(Database::connect(&config).await?);
        AppState::from_config(db, &config)
    };

    let app = create_router(app_state);

    let addr = config.server_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind to {}: {}", addr, e)))?;

    tracing::info!("Server running on http://{}", addr);

    axum::serve(listener, app)
        .await
        .map_err(|e| AppError::internal(format!("Server error: {}", e)))?;

    Ok(())
}
