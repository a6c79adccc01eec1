use std::{fmt, net::SocketAddr};

use anyhow::{Context, Result, anyhow};

pub const DEFAULT_UPSTREAM_BASE_URL: &str = "http://api.weatherapi.com/v1";
pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 8080;

/// Gateway settings, read from the environment:
///
/// - `WEATHER_API_KEY`: WeatherAPI.com key (required)
/// - `WEATHER_API_BASE_URL`: upstream base (default: `http://api.weatherapi.com/v1`)
/// - `HOST`: bind host (default: `0.0.0.0`)
/// - `PORT`: bind port (default: `8080`)
#[derive(Clone)]
pub struct GatewayConfig {
    pub api_key: String,
    pub upstream_base_url: String,
    pub addr: SocketAddr,
}

impl fmt::Debug for GatewayConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GatewayConfig")
            .field("api_key", &"<redacted>")
            .field("upstream_base_url", &self.upstream_base_url)
            .field("addr", &self.addr)
            .finish()
    }
}

impl GatewayConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let non_empty = |name: &str| lookup(name).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let api_key = non_empty("WEATHER_API_KEY").ok_or_else(|| {
            anyhow!(
                "WEATHER_API_KEY is not set.\n\
                 Hint: export WEATHER_API_KEY=<your WeatherAPI.com key> before starting the gateway."
            )
        })?;

        let upstream_base_url = non_empty("WEATHER_API_BASE_URL")
            .unwrap_or_else(|| DEFAULT_UPSTREAM_BASE_URL.to_string())
            .trim_end_matches('/')
            .to_string();

        let host = non_empty("HOST").unwrap_or_else(|| DEFAULT_HOST.to_string());
        let port = match non_empty("PORT") {
            Some(port) => port.parse::<u16>().with_context(|| format!("Invalid PORT value: {port}"))?,
            None => DEFAULT_PORT,
        };

        let addr = format!("{host}:{port}")
            .parse()
            .with_context(|| format!("Invalid bind address: {host}:{port}"))?;

        Ok(Self { api_key, upstream_base_url, addr })
    }
}
