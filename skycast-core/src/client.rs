//! Typed client for the skycast gateway.
//!
//! Requests never go to WeatherAPI.com directly: the gateway owns the API key
//! and selects the upstream resource from the `endpoint` query parameter.

use std::fmt::Debug;

use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::Client;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::{
    endpoint::Endpoint,
    model::{AstronomyData, CurrentWeatherData, ForecastData, WeatherApiError},
};

/// Route served by the gateway.
pub const PROXY_PATH: &str = "/api/weather";

pub const MIN_FORECAST_DAYS: u8 = 1;
pub const MAX_FORECAST_DAYS: u8 = 14;

type Query = Vec<(&'static str, String)>;

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("Days parameter must be between 1 and 14 (got {0})")]
    InvalidDays(u8),

    #[error("Hour parameter must be between 0 and 23 (got {0})")]
    InvalidHour(u8),

    #[error("Location is required to fetch weather data")]
    MissingLocation,

    /// The gateway relayed a structured upstream error.
    #[error("WeatherAPI Error: {message} (Code: {code})")]
    Api { status: u16, code: i64, message: String },

    #[error("Failed to fetch weather data")]
    Transport { detail: String },
}

impl ClientError {
    /// True for errors raised before any request was sent.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            ClientError::InvalidDays(_) | ClientError::InvalidHour(_) | ClientError::MissingLocation
        )
    }
}

#[derive(Debug, Clone, Default)]
pub struct CurrentOptions {
    pub aqi: Option<bool>,
    pub lang: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct ForecastOptions {
    pub aqi: Option<bool>,
    pub alerts: Option<bool>,
    pub hour: Option<u8>,
    pub lang: Option<String>,
}

/// The three weather operations the dashboard consumes.
#[async_trait]
pub trait WeatherSource: Send + Sync + Debug {
    async fn get_current_weather(
        &self,
        location: &str,
        options: &CurrentOptions,
    ) -> Result<CurrentWeatherData, ClientError>;

    async fn get_forecast(
        &self,
        location: &str,
        days: u8,
        options: &ForecastOptions,
    ) -> Result<ForecastData, ClientError>;

    async fn get_astronomy(
        &self,
        location: &str,
        date: Option<NaiveDate>,
    ) -> Result<AstronomyData, ClientError>;
}

#[derive(Debug, Clone)]
pub struct WeatherClient {
    gateway_url: String,
    http: Client,
}

impl WeatherClient {
    /// `gateway_url` is the origin of the gateway, e.g. `http://127.0.0.1:8080`.
    pub fn new(gateway_url: impl Into<String>) -> Self {
        Self::with_http(Client::new(), gateway_url)
    }

    pub fn with_http(http: Client, gateway_url: impl Into<String>) -> Self {
        let gateway_url = gateway_url.into().trim_end_matches('/').to_string();
        Self { gateway_url, http }
    }

    pub fn gateway_url(&self) -> &str {
        &self.gateway_url
    }

    async fn fetch<T: DeserializeOwned>(&self, query: Query) -> Result<T, ClientError> {
        let url = format!("{}{}", self.gateway_url, PROXY_PATH);
        debug!(%url, ?query, "requesting weather data");

        let res = self.http.get(&url).query(&query).send().await.map_err(transport)?;

        let status = res.status();
        let body = res.text().await.map_err(transport)?;

        if !status.is_success() {
            return match serde_json::from_str::<WeatherApiError>(&body) {
                Ok(envelope) => {
                    warn!(
                        status = status.as_u16(),
                        code = envelope.error.code,
                        message = %envelope.error.message,
                        "weather API returned an error"
                    );
                    Err(ClientError::Api {
                        status: status.as_u16(),
                        code: envelope.error.code,
                        message: envelope.error.message,
                    })
                }
                Err(_) => Err(ClientError::Transport {
                    detail: format!("status {}: {}", status, truncate_body(&body)),
                }),
            };
        }

        serde_json::from_str(&body).map_err(|e| ClientError::Transport {
            detail: format!("unparseable weather payload: {e}"),
        })
    }
}

#[async_trait]
impl WeatherSource for WeatherClient {
    async fn get_current_weather(
        &self,
        location: &str,
        options: &CurrentOptions,
    ) -> Result<CurrentWeatherData, ClientError> {
        self.fetch(current_query(location, options)?).await
    }

    async fn get_forecast(
        &self,
        location: &str,
        days: u8,
        options: &ForecastOptions,
    ) -> Result<ForecastData, ClientError> {
        self.fetch(forecast_query(location, days, options)?).await
    }

    async fn get_astronomy(
        &self,
        location: &str,
        date: Option<NaiveDate>,
    ) -> Result<AstronomyData, ClientError> {
        self.fetch(astronomy_query(location, date)?).await
    }
}

/// Query string for `/current.json`.
pub fn current_query(location: &str, options: &CurrentOptions) -> Result<Query, ClientError> {
    let mut query = base_query(Endpoint::Current, location)?;

    if let Some(aqi) = options.aqi {
        query.push(("aqi", yes_no(aqi)));
    }
    if let Some(lang) = non_empty(&options.lang) {
        query.push(("lang", lang.to_string()));
    }

    Ok(query)
}

/// Query string for `/forecast.json`; validates `days` and `hour` first.
pub fn forecast_query(
    location: &str,
    days: u8,
    options: &ForecastOptions,
) -> Result<Query, ClientError> {
    if !(MIN_FORECAST_DAYS..=MAX_FORECAST_DAYS).contains(&days) {
        return Err(ClientError::InvalidDays(days));
    }
    if let Some(hour) = options.hour {
        if hour > 23 {
            return Err(ClientError::InvalidHour(hour));
        }
    }

    let mut query = base_query(Endpoint::Forecast, location)?;
    query.push(("days", days.to_string()));

    if let Some(aqi) = options.aqi {
        query.push(("aqi", yes_no(aqi)));
    }
    if let Some(alerts) = options.alerts {
        query.push(("alerts", yes_no(alerts)));
    }
    if let Some(hour) = options.hour {
        query.push(("hour", hour.to_string()));
    }
    if let Some(lang) = non_empty(&options.lang) {
        query.push(("lang", lang.to_string()));
    }

    Ok(query)
}

/// Query string for `/astronomy.json`. Without a date upstream uses today.
pub fn astronomy_query(location: &str, date: Option<NaiveDate>) -> Result<Query, ClientError> {
    let mut query = base_query(Endpoint::Astronomy, location)?;
    if let Some(date) = date {
        query.push(("dt", date.format("%Y-%m-%d").to_string()));
    }
    Ok(query)
}

fn base_query(endpoint: Endpoint, location: &str) -> Result<Query, ClientError> {
    if location.trim().is_empty() {
        return Err(ClientError::MissingLocation);
    }
    Ok(vec![("endpoint", endpoint.as_str().to_string()), ("q", location.to_string())])
}

fn yes_no(flag: bool) -> String {
    let value = if flag { "yes" } else { "no" };
    value.to_string()
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

fn transport(err: reqwest::Error) -> ClientError {
    warn!(error = %err, "weather request failed");
    ClientError::Transport { detail: err.to_string() }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::fixtures;
    use serde_json::json;
    use wiremock::matchers::{any, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn server_expecting_no_requests() -> MockServer {
        let server = MockServer::start().await;
        Mock::given(any())
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;
        server
    }

    #[tokio::test]
    async fn forecast_returns_payload_unchanged() {
        let server = MockServer::start().await;
        let payload = fixtures::forecast(&[
            fixtures::forecast_day("2024-06-01", 1717180200, 28.0, 10),
            fixtures::forecast_day("2024-06-02", 1717266600, 26.0, 80),
        ]);

        Mock::given(method("GET"))
            .and(path("/api/weather"))
            .and(query_param("endpoint", "/forecast.json"))
            .and(query_param("q", "Pokhara"))
            .and(query_param("days", "2"))
            .respond_with(ResponseTemplate::new(200).set_body_json(payload.clone()))
            .expect(1)
            .mount(&server)
            .await;

        let client = WeatherClient::new(server.uri());
        let data = client
            .get_forecast("Pokhara", 2, &ForecastOptions::default())
            .await
            .expect("forecast should succeed");

        assert_eq!(serde_json::to_value(&data).expect("serializable"), payload);
    }

    #[tokio::test]
    async fn out_of_range_days_never_reach_the_network() {
        let server = server_expecting_no_requests().await;
        let client = WeatherClient::new(server.uri());

        for days in [0u8, 15, 30, 255] {
            let err = client
                .get_forecast("Paris", days, &ForecastOptions::default())
                .await
                .unwrap_err();
            assert!(matches!(err, ClientError::InvalidDays(d) if d == days));
            assert!(err.is_validation());
        }
    }

    #[tokio::test]
    async fn out_of_range_hour_never_reaches_the_network() {
        let server = server_expecting_no_requests().await;
        let client = WeatherClient::new(server.uri());

        for hour in [24u8, 99] {
            let options = ForecastOptions { hour: Some(hour), ..Default::default() };
            let err = client.get_forecast("Paris", 3, &options).await.unwrap_err();
            assert!(matches!(err, ClientError::InvalidHour(h) if h == hour));
        }
    }

    #[tokio::test]
    async fn blank_location_is_rejected_locally() {
        let server = server_expecting_no_requests().await;
        let client = WeatherClient::new(server.uri());

        let err = client
            .get_current_weather("   ", &CurrentOptions::default())
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Location is required to fetch weather data");
    }

    #[tokio::test]
    async fn forecast_serializes_all_options() {
        let server = MockServer::start().await;
        let payload = fixtures::forecast(&[fixtures::forecast_day("2024-06-01", 1717180200, 28.0, 10)]);

        Mock::given(method("GET"))
            .and(path("/api/weather"))
            .and(query_param("endpoint", "/forecast.json"))
            .and(query_param("q", "48.85,2.35"))
            .and(query_param("days", "3"))
            .and(query_param("aqi", "yes"))
            .and(query_param("alerts", "no"))
            .and(query_param("hour", "0"))
            .and(query_param("lang", "fr"))
            .respond_with(ResponseTemplate::new(200).set_body_json(payload))
            .expect(1)
            .mount(&server)
            .await;

        let options = ForecastOptions {
            aqi: Some(true),
            alerts: Some(false),
            hour: Some(0),
            lang: Some("fr".into()),
        };
        let client = WeatherClient::new(format!("{}/", server.uri()));
        client.get_forecast("48.85,2.35", 3, &options).await.expect("forecast should succeed");
    }

    #[tokio::test]
    async fn astronomy_sends_date() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/weather"))
            .and(query_param("endpoint", "/astronomy.json"))
            .and(query_param("dt", "2024-06-01"))
            .respond_with(ResponseTemplate::new(200).set_body_json(fixtures::astronomy()))
            .expect(1)
            .mount(&server)
            .await;

        let client = WeatherClient::new(server.uri());
        let date = NaiveDate::from_ymd_opt(2024, 6, 1);
        let data = client.get_astronomy("Pokhara", date).await.expect("astronomy should succeed");
        assert_eq!(data.astronomy.astro.moon_phase, "Waning Crescent");
    }

    #[tokio::test]
    async fn upstream_error_envelope_is_surfaced() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/weather"))
            .respond_with(ResponseTemplate::new(400).set_body_json(json!({
                "error": { "code": 1006, "message": "No matching location found." }
            })))
            .mount(&server)
            .await;

        let client = WeatherClient::new(server.uri());
        let err = client
            .get_current_weather("Atlantis", &CurrentOptions::default())
            .await
            .unwrap_err();

        assert!(matches!(err, ClientError::Api { status: 400, code: 1006, .. }));
        assert_eq!(err.to_string(), "WeatherAPI Error: No matching location found. (Code: 1006)");
    }

    #[tokio::test]
    async fn non_envelope_error_body_is_a_transport_error() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(400).set_body_json(json!({ "error": "Missing endpoint" })))
            .mount(&server)
            .await;

        let client = WeatherClient::new(server.uri());
        let err = client.get_astronomy("Pokhara", None).await.unwrap_err();
        assert!(matches!(err, ClientError::Transport { .. }));
        assert_eq!(err.to_string(), "Failed to fetch weather data");
    }

    #[tokio::test]
    async fn malformed_success_body_is_a_transport_error() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
            .mount(&server)
            .await;

        let client = WeatherClient::new(server.uri());
        let err = client
            .get_current_weather("Pokhara", &CurrentOptions::default())
            .await
            .unwrap_err();
        assert!(matches!(err, ClientError::Transport { .. }));
    }

    #[tokio::test]
    async fn unreachable_gateway_is_a_transport_error() {
        let client = WeatherClient::new("http://127.0.0.1:1");
        let err = client
            .get_current_weather("Pokhara", &CurrentOptions::default())
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Failed to fetch weather data");
    }

    #[test]
    fn current_query_only_carries_set_options() {
        let query = current_query("Paris", &CurrentOptions::default()).expect("valid query");
        assert_eq!(
            query,
            vec![("endpoint", "/current.json".to_string()), ("q", "Paris".to_string())]
        );

        let options = CurrentOptions { aqi: Some(false), lang: Some(String::new()) };
        let query = current_query("Paris", &options).expect("valid query");
        assert_eq!(query.last(), Some(&("aqi", "no".to_string())));
    }

    #[test]
    fn truncate_body_respects_char_boundaries() {
        let body = "é".repeat(300);
        let truncated = truncate_body(&body);
        assert!(truncated.ends_with("..."));
        assert_eq!(truncated.chars().count(), 203);
    }
}
