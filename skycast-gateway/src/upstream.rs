use std::sync::Arc;

use axum::http::StatusCode;
use reqwest::Client;
use serde_json::Value;
use skycast_core::Endpoint;
use tracing::debug;

/// Query parameter carrying the WeatherAPI.com key.
const KEY_PARAM: &str = "key";

#[derive(Debug)]
pub struct UpstreamResponse {
    pub status: StatusCode,
    pub body: Value,
}

/// WeatherAPI.com, reached with the server-side key.
#[derive(Clone)]
pub struct Upstream {
    http: Client,
    base_url: Arc<str>,
    api_key: Arc<str>,
}

impl std::fmt::Debug for Upstream {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Upstream").field("base_url", &self.base_url).finish_non_exhaustive()
    }
}

impl Upstream {
    pub fn new(base_url: &str, api_key: &str) -> Self {
        Self {
            http: Client::new(),
            base_url: base_url.trim_end_matches('/').into(),
            api_key: api_key.into(),
        }
    }

    /// Send `params` (already stripped of `endpoint`) to `endpoint`, keyed.
    /// Any status is returned as-is; only transport and decoding failures
    /// are errors.
    pub async fn fetch(
        &self,
        endpoint: Endpoint,
        params: &[(String, String)],
    ) -> Result<UpstreamResponse, reqwest::Error> {
        let url = format!("{}{}", self.base_url, endpoint);
        let query = keyed_params(params, &self.api_key);
        debug!(%url, params = params.len(), "forwarding to upstream");

        let res = self.http.get(&url).query(&query).send().await?;
        let status = res.status();
        let body = res.json::<Value>().await?;

        Ok(UpstreamResponse { status, body })
    }
}

/// Client parameters with any client-supplied key replaced by ours.
fn keyed_params<'a>(params: &'a [(String, String)], api_key: &'a str) -> Vec<(&'a str, &'a str)> {
    params
        .iter()
        .filter(|(name, _)| name != KEY_PARAM)
        .map(|(name, value)| (name.as_str(), value.as_str()))
        .chain(std::iter::once((KEY_PARAM, api_key)))
        .collect()
}
