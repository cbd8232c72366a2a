//! Liveness probe: `GET /health`.

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};

use agent_discovery::MATCH_ALL;

use crate::transport::AppState;
use crate::types::{AdminResult, HealthStatus};

pub fn register(router: Router<AppState>) -> Router<AppState> {
    router.route("/health", get(handle_health))
}

async fn handle_health(State(state): State<AppState>) -> AdminResult<Json<HealthStatus>> {
    let protocols = state.registry.protocols_matching_query(MATCH_ALL)?.len();

    Ok(Json(HealthStatus {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        protocols,
    }))
}
