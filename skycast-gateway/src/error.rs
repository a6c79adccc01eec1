//! Error responses produced by the gateway itself.
//!
//! Upstream errors are not represented here: they are relayed verbatim.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    #[error("Missing endpoint")]
    MissingEndpoint,

    #[error("Unknown endpoint '{0}'")]
    UnknownEndpoint(String),

    /// Transport failure or a non-JSON upstream body. The source is logged,
    /// never returned: reqwest errors embed the request URL, key included.
    #[error("Server error fetching weather data")]
    Upstream(#[source] reqwest::Error),
}

impl GatewayError {
    pub fn status(&self) -> StatusCode {
        match self {
            GatewayError::MissingEndpoint | GatewayError::UnknownEndpoint(_) => StatusCode::BAD_REQUEST,
            GatewayError::Upstream(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        (self.status(), Json(json!({ "error": self.to_string() }))).into_response()
    }
}
