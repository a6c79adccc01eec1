//! The four dashboard views bound to the shared location.

use std::sync::Arc;

use tokio::sync::watch;
use tracing::info;

use crate::{
    client::{CurrentOptions, ForecastOptions, WeatherSource},
    model::{AstronomyData, CurrentWeatherData, ForecastData},
    resource::Resource,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DashboardSettings {
    /// Days fetched for the hourly strip; the window can cross midnight.
    pub hourly_days: u8,
    pub forecast_days: u8,
}

impl Default for DashboardSettings {
    fn default() -> Self {
        Self { hourly_days: 2, forecast_days: 7 }
    }
}

#[derive(Debug)]
pub struct Dashboard {
    source: Arc<dyn WeatherSource>,
    location: watch::Receiver<String>,
    settings: DashboardSettings,
    shown_for: Option<String>,
    current: Resource<CurrentWeatherData>,
    hourly: Resource<ForecastData>,
    astronomy: Resource<AstronomyData>,
    forecast: Resource<ForecastData>,
}

impl Dashboard {
    pub fn new(
        source: Arc<dyn WeatherSource>,
        location: watch::Receiver<String>,
        settings: DashboardSettings,
    ) -> Self {
        Self {
            source,
            location,
            settings,
            shown_for: None,
            current: Resource::new(),
            hourly: Resource::new(),
            astronomy: Resource::new(),
            forecast: Resource::new(),
        }
    }

    /// Refetch everything if the location changed since the last refresh (or
    /// nothing was fetched yet). Returns whether a refresh happened.
    pub async fn sync(&mut self) -> bool {
        // A closed channel means no further updates; keep what we have.
        let changed = self.location.has_changed().unwrap_or(false);
        if !changed && self.shown_for.is_some() {
            return false;
        }
        self.refresh().await;
        true
    }

    /// Refetch all four views for the current location.
    pub async fn refresh(&mut self) {
        let location = self.location.borrow_and_update().clone();
        info!(%location, "refreshing dashboard");

        let source = Arc::clone(&self.source);
        let DashboardSettings { hourly_days, forecast_days } = self.settings;
        let current_options = CurrentOptions { aqi: Some(true), ..Default::default() };
        let hourly_options = ForecastOptions { aqi: Some(true), ..Default::default() };
        let forecast_options =
            ForecastOptions { aqi: Some(false), alerts: Some(false), ..Default::default() };
        let q = location.as_str();

        tokio::join!(
            self.current.load(source.get_current_weather(q, &current_options)),
            self.hourly.load(source.get_forecast(q, hourly_days, &hourly_options)),
            self.astronomy.load(source.get_astronomy(q, None)),
            self.forecast.load(source.get_forecast(q, forecast_days, &forecast_options)),
        );

        self.shown_for = Some(location);
    }

    /// Location the displayed data was fetched for.
    pub fn shown_for(&self) -> Option<&str> {
        self.shown_for.as_deref()
    }

    pub fn settings(&self) -> DashboardSettings {
        self.settings
    }

    pub fn current(&self) -> &Resource<CurrentWeatherData> {
        &self.current
    }

    pub fn hourly(&self) -> &Resource<ForecastData> {
        &self.hourly
    }

    pub fn astronomy(&self) -> &Resource<AstronomyData> {
        &self.astronomy
    }

    pub fn forecast(&self) -> &Resource<ForecastData> {
        &self.forecast
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::ClientError;
    use crate::location::{DEFAULT_CITY, LocationResolver};
    use crate::model::fixtures;
    use crate::resource::ResourceState;
    use async_trait::async_trait;
    use chrono::NaiveDate;
    use std::sync::Mutex;

    /// Serves fixtures and records every call; "Atlantis" fails.
    #[derive(Debug, Default)]
    struct FakeSource {
        calls: Mutex<Vec<(String, String)>>,
    }

    impl FakeSource {
        fn record(&self, what: String, location: &str) -> Result<(), ClientError> {
            self.calls.lock().expect("not poisoned").push((what, location.to_string()));
            if location == "Atlantis" {
                return Err(ClientError::Api {
                    status: 400,
                    code: 1006,
                    message: "No matching location found.".into(),
                });
            }
            Ok(())
        }

        fn calls(&self) -> Vec<(String, String)> {
            self.calls.lock().expect("not poisoned").clone()
        }
    }

    #[async_trait]
    impl WeatherSource for FakeSource {
        async fn get_current_weather(
            &self,
            location: &str,
            _options: &CurrentOptions,
        ) -> Result<CurrentWeatherData, ClientError> {
            self.record("current".into(), location)?;
            Ok(serde_json::from_value(fixtures::current_weather()).expect("valid fixture"))
        }

        async fn get_forecast(
            &self,
            location: &str,
            days: u8,
            _options: &ForecastOptions,
        ) -> Result<ForecastData, ClientError> {
            self.record(format!("forecast:{days}"), location)?;
            let day = fixtures::forecast_day("2024-06-01", 1_717_200_000, 28.0, 20);
            Ok(serde_json::from_value(fixtures::forecast(&[day])).expect("valid fixture"))
        }

        async fn get_astronomy(
            &self,
            location: &str,
            _date: Option<NaiveDate>,
        ) -> Result<AstronomyData, ClientError> {
            self.record("astronomy".into(), location)?;
            Ok(serde_json::from_value(fixtures::astronomy()).expect("valid fixture"))
        }
    }

    fn setup() -> (Arc<FakeSource>, LocationResolver, Dashboard) {
        let source = Arc::new(FakeSource::default());
        let resolver = LocationResolver::new(DEFAULT_CITY);
        let dashboard =
            Dashboard::new(source.clone(), resolver.subscribe(), DashboardSettings::default());
        (source, resolver, dashboard)
    }

    #[tokio::test]
    async fn first_sync_fetches_all_views_once() {
        let (source, _resolver, mut dashboard) = setup();

        assert!(dashboard.sync().await);
        assert!(!dashboard.sync().await);

        let mut calls = source.calls();
        calls.sort();
        assert_eq!(
            calls,
            vec![
                ("astronomy".to_string(), "Pokhara".to_string()),
                ("current".to_string(), "Pokhara".to_string()),
                ("forecast:2".to_string(), "Pokhara".to_string()),
                ("forecast:7".to_string(), "Pokhara".to_string()),
            ]
        );
        assert_eq!(dashboard.shown_for(), Some("Pokhara"));
        assert!(matches!(dashboard.current().state(), ResourceState::Ready(_)));
    }

    #[tokio::test]
    async fn location_change_refetches_every_view_for_the_same_location() {
        let (source, resolver, mut dashboard) = setup();
        dashboard.sync().await;

        resolver.search("tokyo");
        assert!(dashboard.sync().await);

        let tokyo: Vec<_> = source.calls().into_iter().filter(|(_, loc)| loc == "Tokyo").collect();
        assert_eq!(tokyo.len(), 4);
        assert_eq!(dashboard.shown_for(), Some("Tokyo"));
    }

    #[tokio::test]
    async fn unmatched_search_does_not_refetch() {
        let (source, resolver, mut dashboard) = setup();
        dashboard.sync().await;

        resolver.search("Toky");
        assert!(!dashboard.sync().await);
        assert_eq!(source.calls().len(), 4);
    }

    #[tokio::test]
    async fn failed_refresh_shows_error_but_keeps_last_data() {
        let source = Arc::new(FakeSource::default());
        let resolver = LocationResolver::new(DEFAULT_CITY).with_known_cities(vec!["Atlantis".into()]);
        let mut dashboard =
            Dashboard::new(source.clone(), resolver.subscribe(), DashboardSettings::default());
        dashboard.sync().await;

        resolver.search("Atlantis");
        dashboard.sync().await;

        assert_eq!(
            dashboard.astronomy().state(),
            ResourceState::Failed("WeatherAPI Error: No matching location found. (Code: 1006)".into())
        );
        assert_eq!(
            dashboard.astronomy().data().map(|d| d.location.name.as_str()),
            Some("Pokhara")
        );
    }
}
