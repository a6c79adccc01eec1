//! The single "current location" shared by every dashboard view.
//!
//! [`LocationResolver`] is the only writer; views hold `watch` receivers and
//! refetch whenever the value changes. A location is either a city name or a
//! `"<lat>,<lon>"` pair, both of which upstream accepts as `q`.

use std::fmt::Debug;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::sync::watch;
use tracing::{debug, info, warn};

/// Used when neither the user nor the device supplies a location.
pub const DEFAULT_CITY: &str = "Pokhara";

/// Reference list for search. Matching is exact modulo case and surrounding
/// whitespace.
pub const KNOWN_CITIES: &[&str] = &[
    "Amsterdam",
    "Athens",
    "Auckland",
    "Bangkok",
    "Barcelona",
    "Beijing",
    "Berlin",
    "Bogota",
    "Buenos Aires",
    "Cairo",
    "Cape Town",
    "Chicago",
    "Delhi",
    "Dubai",
    "Dublin",
    "Hong Kong",
    "Istanbul",
    "Jakarta",
    "Kathmandu",
    "Lagos",
    "Lima",
    "Lisbon",
    "London",
    "Los Angeles",
    "Madrid",
    "Melbourne",
    "Mexico City",
    "Moscow",
    "Mumbai",
    "Nairobi",
    "New York",
    "Oslo",
    "Paris",
    "Pokhara",
    "Prague",
    "Rome",
    "San Francisco",
    "Santiago",
    "Sao Paulo",
    "Seoul",
    "Shanghai",
    "Singapore",
    "Stockholm",
    "Sydney",
    "Tokyo",
    "Toronto",
    "Vancouver",
    "Vienna",
    "Warsaw",
    "Zurich",
];

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    pub fn new(latitude: f64, longitude: f64) -> Option<Self> {
        let valid = (-90.0..=90.0).contains(&latitude) && (-180.0..=180.0).contains(&longitude);
        valid.then_some(Self { latitude, longitude })
    }

    /// Parse a `"<lat>,<lon>"` pair.
    pub fn parse(value: &str) -> Option<Self> {
        let (lat, lon) = value.split_once(',')?;
        Self::new(lat.trim().parse().ok()?, lon.trim().parse().ok()?)
    }

    /// Upstream `q` form.
    pub fn to_query(&self) -> String {
        format!("{},{}", self.latitude, self.longitude)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GeolocationError {
    #[error("Location permission denied")]
    PermissionDenied,
    #[error("Location unavailable")]
    Unavailable,
    #[error("Geolocation is not supported")]
    Unsupported,
}

impl GeolocationError {
    /// Text shown to the user when an explicit location request fails.
    pub fn alert_message(&self) -> &'static str {
        match self {
            GeolocationError::Unsupported => "Geolocation is not supported by this device.",
            GeolocationError::PermissionDenied | GeolocationError::Unavailable => {
                "Unable to get your location. Please search for a city manually."
            }
        }
    }
}

/// Device position capability.
#[async_trait]
pub trait Geolocator: Send + Sync + Debug {
    async fn request_location(&self) -> Result<Coordinates, GeolocationError>;
}

/// A device that always reports the same position.
#[derive(Debug, Clone, Copy)]
pub struct FixedGeolocator(pub Coordinates);

#[async_trait]
impl Geolocator for FixedGeolocator {
    async fn request_location(&self) -> Result<Coordinates, GeolocationError> {
        Ok(self.0)
    }
}

/// A device without positioning support.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnsupportedGeolocator;

#[async_trait]
impl Geolocator for UnsupportedGeolocator {
    async fn request_location(&self) -> Result<Coordinates, GeolocationError> {
        Err(GeolocationError::Unsupported)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolveOutcome {
    /// The shared location now holds this value.
    Updated(String),
    /// Nothing changed: unmatched search or same value as before.
    Unchanged,
    /// Location retained; the message must be shown to the user.
    Alert(String),
}

#[derive(Debug)]
pub struct LocationResolver {
    current: watch::Sender<String>,
    default_city: String,
    known_cities: Vec<String>,
}

impl LocationResolver {
    pub fn new(default_city: impl Into<String>) -> Self {
        let default_city = default_city.into();
        let (current, _) = watch::channel(default_city.clone());

        Self {
            current,
            default_city,
            known_cities: KNOWN_CITIES.iter().map(|c| c.to_string()).collect(),
        }
    }

    /// Extend the search reference list; duplicates (ignoring case) are skipped.
    pub fn with_known_cities(mut self, cities: impl IntoIterator<Item = String>) -> Self {
        for city in cities {
            let city = city.trim().to_string();
            if city.is_empty() || self.match_city(&city).is_some() {
                continue;
            }
            self.known_cities.push(city);
        }
        self
    }

    pub fn subscribe(&self) -> watch::Receiver<String> {
        self.current.subscribe()
    }

    pub fn current(&self) -> String {
        self.current.borrow().clone()
    }

    pub fn default_city(&self) -> &str {
        &self.default_city
    }

    pub fn known_cities(&self) -> &[String] {
        &self.known_cities
    }

    /// Startup resolution: an explicit location wins; otherwise the device
    /// position; otherwise the default city. Always reports `Updated` and
    /// notifies subscribers, even when the result equals the seeded default.
    pub async fn resolve_initial(
        &self,
        explicit: Option<&str>,
        geolocator: &dyn Geolocator,
    ) -> ResolveOutcome {
        if let Some(explicit) = explicit.map(str::trim).filter(|e| !e.is_empty()) {
            return self.announce(explicit.to_string());
        }

        match geolocator.request_location().await {
            Ok(coords) => self.announce(coords.to_query()),
            Err(err) => {
                info!(error = %err, default = %self.default_city, "falling back to default city");
                self.announce(self.default_city.clone())
            }
        }
    }

    /// Search submission. Unmatched queries leave the location untouched.
    pub fn search(&self, query: &str) -> ResolveOutcome {
        match self.match_city(query) {
            Some(city) => self.set(city.to_string()),
            None => {
                debug!(query, "search did not match a known city");
                ResolveOutcome::Unchanged
            }
        }
    }

    /// Canonical spelling of `query` in the reference list.
    pub fn match_city(&self, query: &str) -> Option<&str> {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return None;
        }
        self.known_cities
            .iter()
            .find(|city| city.to_lowercase() == needle)
            .map(String::as_str)
    }

    /// "Use my location": on failure the previous location stays in place.
    pub async fn use_device_location(&self, geolocator: &dyn Geolocator) -> ResolveOutcome {
        match geolocator.request_location().await {
            Ok(coords) => self.set(coords.to_query()),
            Err(err) => {
                warn!(error = %err, "device location request failed");
                ResolveOutcome::Alert(err.alert_message().to_string())
            }
        }
    }

    fn announce(&self, value: String) -> ResolveOutcome {
        self.current.send_modify(|current| current.clone_from(&value));
        info!(location = %value, "location resolved");
        ResolveOutcome::Updated(value)
    }

    fn set(&self, value: String) -> ResolveOutcome {
        let changed = self.current.send_if_modified(|current| {
            if *current == value {
                return false;
            }
            *current = value.clone();
            true
        });

        if changed {
            info!(location = %value, "location updated");
            ResolveOutcome::Updated(value)
        } else {
            ResolveOutcome::Unchanged
        }
    }
}
