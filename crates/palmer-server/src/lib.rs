//! Palmer dashboard server.
//!
//! Serves the dashboard page and a WebSocket endpoint for live input updates.
//!
//! # Architecture
//!
//! The server consists of:
//! - **Session**: One client's inputs and incremental view, created per connection
//! - **Protocol**: Defines client/server message types
//! - **Routes**: HTTP and WebSocket handlers
//!
//! # Features
//!
//! - `embedded-frontend` (default): Embeds the web UI for standalone use

#[cfg(feature = "embedded-frontend")]
pub mod embedded_frontend;
pub mod error;
pub mod protocol;
pub mod routes;
pub mod session;

use std::net::SocketAddr;
use std::sync::Arc;

use palmer_core::Dataset;

pub use error::{ServerError, ServerResult};
pub use protocol::{ClientMessage, ServerMessage};
pub use routes::{AppState, create_router};
pub use session::DashboardSession;

/// Server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Host address to bind to.
    pub host: String,
    /// Port to listen on.
    pub port: u16,
    /// Whether to open browser on start.
    pub open_browser: bool,
    /// Page title.
    pub title: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3000,
            open_browser: false,
            title: "Palmer Penguins".to_string(),
        }
    }
}

/// Start the dashboard server over a loaded dataset.
pub async fn serve(dataset: Arc<Dataset>, config: ServerConfig) -> ServerResult<()> {
    // Build address
    let addr: SocketAddr = format!("{}:{}", config.host, config.port)
        .parse()
        .map_err(|_| ServerError::Io {
            path: std::path::PathBuf::new(),
            message: format!("Invalid address: {}:{}", config.host, config.port),
        })?;

    let open_browser = config.open_browser;
    let state = Arc::new(AppState { dataset, config });
    let app = create_router(state);

    tracing::info!("Starting Palmer server at http://{}", addr);

    if open_browser {
        tracing::info!("Open http://{} in your browser", addr);
    }

    // Start server with graceful shutdown
    let listener = tokio::net::TcpListener::bind(addr).await?;

    // Create shutdown signal channel
    let (shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel::<()>();

    // Handle Ctrl+C for graceful shutdown
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::info!("Received shutdown signal");
            let _ = shutdown_tx.send(());
        }
    });

    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            let _ = shutdown_rx.await;
        })
        .await?;

    tracing::info!("Server shutdown complete");

    Ok(())
}
