//! HTTP and WebSocket routes for the Palmer server.

use std::sync::Arc;

use axum::{
    Router,
    extract::{
        State, WebSocketUpgrade,
        ws::{Message, WebSocket},
    },
    response::{IntoResponse, Json},
    routing::get,
};

#[cfg(feature = "embedded-frontend")]
use axum::extract::Path as AxumPath;

#[cfg(not(feature = "embedded-frontend"))]
use axum::response::Html;
use futures::stream::SplitSink;
use futures::{SinkExt, StreamExt};
use palmer_core::{Dataset, InputDef, InputRegistry};
use tower_http::cors::CorsLayer;

use crate::ServerConfig;
use crate::error::{ServerError, ServerResult};
use crate::protocol::{ClientMessage, ServerMessage};
use crate::session::DashboardSession;

#[cfg(feature = "embedded-frontend")]
use crate::embedded_frontend;

/// Application state shared across handlers.
///
/// Only immutable data lives here; every connection builds its own session.
pub struct AppState {
    /// The dataset, loaded once at startup.
    pub dataset: Arc<Dataset>,
    /// Server configuration.
    pub config: ServerConfig,
}

impl AppState {
    /// A fresh session with default inputs.
    pub fn new_session(&self) -> ServerResult<DashboardSession> {
        DashboardSession::new(Arc::clone(&self.dataset), self.config.title.clone())
    }
}

/// Create the router with all routes.
pub fn create_router(state: Arc<AppState>) -> Router {
    let router = Router::new()
        .route("/health", get(health_handler))
        .route("/ws", get(ws_handler))
        .route("/api/inputs", get(inputs_handler))
        .route("/api/state", get(state_handler));

    // Add frontend routes
    #[cfg(feature = "embedded-frontend")]
    let router = router
        .route("/", get(frontend_index_handler))
        .route("/static/{*path}", get(static_handler));

    #[cfg(not(feature = "embedded-frontend"))]
    let router = router.route("/", get(index_handler));

    router.layer(CorsLayer::permissive()).with_state(state)
}

/// Index page handler (fallback when embedded-frontend is disabled).
#[cfg(not(feature = "embedded-frontend"))]
async fn index_handler() -> Html<&'static str> {
    Html(
        r#"<!DOCTYPE html>
<html>
<head>
    <title>Palmer Penguins</title>
    <style>
        body { font-family: system-ui, sans-serif; margin: 2rem; }
        h1 { color: #159090; }
    </style>
</head>
<body>
    <h1>Palmer Dashboard Server</h1>
    <p>WebSocket endpoint: <code>/ws</code></p>
    <p>API endpoints:</p>
    <ul>
        <li><code>GET /health</code> - Health check</li>
        <li><code>GET /api/inputs</code> - Input definitions with defaults</li>
        <li><code>GET /api/state</code> - Dashboard state for the default inputs</li>
    </ul>
    <p><em>Note: The full UI is available with the <code>embedded-frontend</code> feature.</em></p>
    <script>
        const ws = new WebSocket(`ws://${location.host}/ws`);
        ws.onmessage = (e) => console.log('Server:', JSON.parse(e.data));
        ws.onopen = () => ws.send(JSON.stringify({ type: 'get_state' }));
    </script>
</body>
</html>"#,
    )
}

/// Serve the embedded frontend index.html.
#[cfg(feature = "embedded-frontend")]
async fn frontend_index_handler() -> impl IntoResponse {
    embedded_frontend::serve_index()
}

/// Serve static assets from the embedded frontend.
#[cfg(feature = "embedded-frontend")]
async fn static_handler(AxumPath(path): AxumPath<String>) -> impl IntoResponse {
    embedded_frontend::serve_static(path)
}

/// Health check handler.
async fn health_handler(State(state): State<Arc<AppState>>) -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "rows": state.dataset.len(),
    }))
}

/// Input definitions at their defaults.
async fn inputs_handler() -> Json<Vec<InputDef>> {
    Json(InputRegistry::new().definitions())
}

/// Dashboard state for the default inputs.
async fn state_handler(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    match state.new_session() {
        Ok(session) => Json(session.get_state()),
        Err(e) => Json(ServerMessage::Error {
            message: e.to_string(),
        }),
    }
}

/// WebSocket upgrade handler.
async fn ws_handler(ws: WebSocketUpgrade, State(state): State<Arc<AppState>>) -> impl IntoResponse {
    ws.on_upgrade(|socket| handle_websocket(socket, state))
}

/// Handle WebSocket connection.
async fn handle_websocket(socket: WebSocket, state: Arc<AppState>) {
    let (mut sender, mut receiver) = socket.split();

    let mut session = match state.new_session() {
        Ok(session) => session,
        Err(e) => {
            tracing::warn!("Failed to create session: {}", e);
            let _ = send_message(
                &mut sender,
                &ServerMessage::Error {
                    message: e.to_string(),
                },
            )
            .await;
            return;
        }
    };
    tracing::info!("Session {} opened", session.id());

    // Send initial state
    if let Err(e) = send_message(&mut sender, &session.get_state()).await {
        tracing::warn!("Session {}: {}", session.id(), e);
        return;
    }

    // Handle incoming client messages
    'connection: while let Some(result) = receiver.next().await {
        let replies = match result {
            Ok(Message::Text(text)) => match serde_json::from_str::<ClientMessage>(&text) {
                Ok(msg) => session.handle(msg),
                Err(e) => {
                    tracing::warn!("Failed to parse client message: {} (input: {})", e, text);
                    vec![ServerMessage::Error {
                        message: format!("Invalid message format: {}", e),
                    }]
                }
            },
            Ok(Message::Close(_)) => break,
            Err(e) => {
                tracing::warn!("WebSocket error: {}", e);
                break;
            }
            _ => continue,
        };

        for reply in &replies {
            if let Err(e) = send_message(&mut sender, reply).await {
                tracing::warn!("Session {}: {}", session.id(), e);
                break 'connection;
            }
        }
    }

    tracing::info!(
        "Session {} closed after {} recomputations",
        session.id(),
        session.recomputations()
    );
}

/// Send a server message through the WebSocket.
async fn send_message(
    sender: &mut SplitSink<WebSocket, Message>,
    msg: &ServerMessage,
) -> ServerResult<()> {
    let json = serde_json::to_string(msg)?;
    sender
        .send(Message::Text(json.into()))
        .await
        .map_err(|e| ServerError::WebSocket(e.to_string()))
}
