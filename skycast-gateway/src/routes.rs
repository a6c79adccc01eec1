//! Router configuration for the gateway.

use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use serde_json::{Value, json};
use skycast_core::{Endpoint, client::PROXY_PATH};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::{error, warn};

use crate::{error::GatewayError, upstream::Upstream};

const ENDPOINT_PARAM: &str = "endpoint";

#[derive(Debug, Clone)]
pub struct AppState {
    pub upstream: Upstream,
}

impl AppState {
    pub fn new(upstream: Upstream) -> Self {
        Self { upstream }
    }
}

pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any);

    Router::new()
        .route("/health", get(health_check))
        .route(PROXY_PATH, get(proxy_weather))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

async fn health_check() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

/// `GET /api/weather?endpoint=/forecast.json&q=...`
async fn proxy_weather(
    State(state): State<AppState>,
    Query(params): Query<Vec<(String, String)>>,
) -> Result<Response, GatewayError> {
    let raw_endpoint = params
        .iter()
        .find(|(name, _)| name == ENDPOINT_PARAM)
        .map(|(_, value)| value.as_str())
        .filter(|value| !value.is_empty())
        .ok_or(GatewayError::MissingEndpoint)?;

    let endpoint = Endpoint::try_from(raw_endpoint)
        .map_err(|_| GatewayError::UnknownEndpoint(raw_endpoint.to_string()))?;

    let forwarded: Vec<(String, String)> =
        params.into_iter().filter(|(name, _)| name != ENDPOINT_PARAM).collect();

    let upstream = state.upstream.fetch(endpoint, &forwarded).await.map_err(|err| {
        let err = err.without_url();
        error!(%endpoint, error = %err, "upstream request failed");
        GatewayError::Upstream(err)
    })?;

    if !upstream.status.is_success() {
        warn!(%endpoint, status = %upstream.status, "upstream returned an error");
        return Ok((upstream.status, Json(upstream.body)).into_response());
    }

    Ok((StatusCode::OK, Json(upstream.body)).into_response())
}
