//! HTTP transport — axum server hosting the admin routes.

use std::sync::Arc;

use axum::{
    extract::Request,
    http::HeaderValue,
    middleware::{self, Next},
    response::Response,
    Router,
};
use tokio::signal;
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tracing::Instrument;

use agent_discovery::ProtocolRegistry;

use crate::routes::{features, health};
use crate::types::{AdminError, AdminResult};

/// Header carrying the per-request correlation ID.
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Shared state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub registry: Arc<dyn ProtocolRegistry>,
}

impl AppState {
    pub fn new(registry: Arc<dyn ProtocolRegistry>) -> Self {
        Self { registry }
    }
}

/// Build the admin Router with all routes and layers.
pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = features::register(Router::new());
    let app = health::register(app);

    app.layer(
        ServiceBuilder::new()
            .layer(middleware::from_fn(request_id_layer))
            .layer(cors),
    )
    .with_state(state)
}

/// Admin HTTP server.
pub struct AdminServer {
    state: AppState,
}

impl AdminServer {
    pub fn new(registry: Arc<dyn ProtocolRegistry>) -> Self {
        Self {
            state: AppState::new(registry),
        }
    }

    /// Run the HTTP server on the given address until Ctrl+C or SIGTERM.
    pub async fn run(&self, addr: &str) -> AdminResult<()> {
        let app = router(self.state.clone());

        let listener = tokio::net::TcpListener::bind(addr)
            .await
            .map_err(AdminError::Io)?;

        tracing::info!("Admin server listening on http://{addr}");

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await
            .map_err(|e| AdminError::Transport(e.to_string()))?;

        tracing::info!("Admin server stopped");
        Ok(())
    }
}

/// Tag each request with an ID and run it inside a tracing span.
async fn request_id_layer(request: Request, next: Next) -> Response {
    let request_id = request
        .headers()
        .get(REQUEST_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .filter(|v| !v.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| uuid::Uuid::new_v4().to_string());

    let span = tracing::info_span!(
        "request",
        method = %request.method(),
        uri = %request.uri(),
        request_id = %request_id,
    );

    let mut response = async move {
        let response = next.run(request).await;
        tracing::info!(status = %response.status(), "Handled request");
        response
    }
    .instrument(span)
    .await;

    if let Ok(value) = HeaderValue::from_str(&request_id) {
        response.headers_mut().insert(REQUEST_ID_HEADER, value);
    }
    response
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {e}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => tracing::info!("Received Ctrl+C, shutting down"),
        _ = terminate => tracing::info!("Received SIGTERM, shutting down"),
    }
}
