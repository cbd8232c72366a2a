//! Feature discovery admin route: `GET /features`.

use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};

use agent_discovery::ProtocolRegistry;

use crate::transport::AppState;
use crate::types::{AdminResult, FeatureQuery, QueryResult};

/// Add the feature discovery route to `router`.
pub fn register(router: Router<AppState>) -> Router<AppState> {
    router.route(
        "/features",
        get(query_features)
            .head(method_not_allowed)
            .fallback(method_not_allowed),
    )
}

/// Look up the protocols matching `query` (all of them when `None`).
pub fn query_registry(
    registry: &dyn ProtocolRegistry,
    query: &FeatureQuery,
) -> AdminResult<QueryResult> {
    let protocols = registry.protocols_matching_query(query.pattern())?;
    tracing::debug!(
        "Feature query {:?} matched {} protocols",
        query.pattern(),
        protocols.len()
    );
    Ok(QueryResult::from_protocols(protocols))
}

/// Query supported features.
async fn query_features(
    State(state): State<AppState>,
    params: Result<Query<FeatureQuery>, QueryRejection>,
) -> AdminResult<Json<QueryResult>> {
    let Query(query) = params?;
    let result = query_registry(state.registry.as_ref(), &query)?;
    Ok(Json(result))
}

/// Answer any verb other than GET, HEAD included.
async fn method_not_allowed() -> impl IntoResponse {
    (StatusCode::METHOD_NOT_ALLOWED, [(header::ALLOW, "GET")])
}
