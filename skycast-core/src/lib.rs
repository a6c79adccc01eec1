//! Core library for skycast, a terminal weather dashboard.
//!
//! This crate defines:
//! - The WeatherAPI.com payload model and the gateway client
//! - Location resolution shared by every view
//! - Pure presentation transforms (units, times, classification, summaries)
//! - The remote-resource state machine and the four-view dashboard
//! - Configuration handling
//!
//! It is used by `skycast-cli` and `skycast-gateway`.

pub mod client;
pub mod config;
pub mod dashboard;
pub mod endpoint;
pub mod location;
pub mod model;
pub mod present;
pub mod resource;

pub use client::{ClientError, CurrentOptions, ForecastOptions, WeatherClient, WeatherSource};
pub use config::Config;
pub use dashboard::{Dashboard, DashboardSettings};
pub use endpoint::Endpoint;
pub use location::{
    Coordinates, FixedGeolocator, GeolocationError, Geolocator, LocationResolver, ResolveOutcome,
    UnsupportedGeolocator,
};
pub use model::UnitSystem;
pub use resource::{Resource, ResourceState};
