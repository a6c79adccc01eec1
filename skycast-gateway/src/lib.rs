//! Relay between skycast clients and WeatherAPI.com.
//!
//! Clients call `GET /api/weather?endpoint=<suffix>&...`; the gateway strips
//! `endpoint`, adds the server-side API key and forwards the rest. Upstream
//! status codes and JSON bodies are passed back unchanged.

pub mod config;
pub mod error;
pub mod routes;
pub mod upstream;

pub use config::GatewayConfig;
pub use error::GatewayError;
pub use routes::{AppState, create_router};
pub use upstream::Upstream;
