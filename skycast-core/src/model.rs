//! Payloads exchanged with WeatherAPI.com (through the gateway).
//!
//! Field names follow the upstream JSON exactly. Every record keeps the fields
//! we do not read in `extra`, so re-serializing a payload yields the original
//! document up to number spelling: measurements are `f64`, so an integer such
//! as `"avghumidity": 80` comes back as `80.0`. Dual-unit fields are all
//! required: a payload that lacks either unit fails to deserialize.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Unknown upstream fields, carried through untouched.
pub type Extra = Map<String, Value>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub name: String,
    pub region: String,
    pub country: String,
    pub lat: f64,
    pub lon: f64,
    /// Location-local wall clock, `YYYY-MM-DD H:MM`.
    pub localtime: String,
    #[serde(flatten)]
    pub extra: Extra,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Condition {
    pub text: String,
    pub icon: String,
    #[serde(flatten)]
    pub extra: Extra,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentConditions {
    pub temp_c: f64,
    pub temp_f: f64,
    pub feelslike_c: f64,
    pub feelslike_f: f64,
    pub humidity: u8,
    pub wind_mph: f64,
    pub wind_kph: f64,
    pub wind_dir: String,
    pub vis_km: f64,
    pub vis_miles: f64,
    pub pressure_mb: f64,
    pub pressure_in: f64,
    pub uv: f64,
    pub cloud: u8,
    pub condition: Condition,
    #[serde(flatten)]
    pub extra: Extra,
}

/// Response of `/current.json`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentWeatherData {
    pub location: Location,
    pub current: CurrentConditions,
    #[serde(flatten)]
    pub extra: Extra,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HourRecord {
    pub time_epoch: i64,
    /// Location-local timestamp, `YYYY-MM-DD HH:MM`.
    pub time: String,
    pub temp_c: f64,
    pub temp_f: f64,
    pub feelslike_c: f64,
    pub feelslike_f: f64,
    pub humidity: u8,
    pub wind_mph: f64,
    pub wind_kph: f64,
    pub wind_dir: String,
    pub vis_km: f64,
    pub vis_miles: f64,
    pub pressure_mb: f64,
    pub pressure_in: f64,
    pub chance_of_rain: u8,
    pub cloud: u8,
    pub uv: f64,
    pub condition: Condition,
    #[serde(flatten)]
    pub extra: Extra,
}

/// Aggregate statistics for one forecast day (`forecastday[].day`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayStats {
    pub maxtemp_c: f64,
    pub maxtemp_f: f64,
    pub mintemp_c: f64,
    pub mintemp_f: f64,
    pub avghumidity: f64,
    pub maxwind_mph: f64,
    pub maxwind_kph: f64,
    pub avgvis_km: f64,
    pub avgvis_miles: f64,
    pub daily_chance_of_rain: u8,
    pub condition: Condition,
    #[serde(flatten)]
    pub extra: Extra,
}

/// Sun and moon times. Times are `hh:mm AM/PM` strings; upstream sends
/// placeholders such as `No moonrise` when an event does not occur.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Astro {
    pub sunrise: String,
    pub sunset: String,
    pub moonrise: String,
    pub moonset: String,
    pub moon_phase: String,
    pub moon_illumination: u8,
    #[serde(flatten)]
    pub extra: Extra,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastDay {
    /// `YYYY-MM-DD`
    pub date: String,
    pub day: DayStats,
    pub astro: Astro,
    /// One record per hour, in chronological order.
    pub hour: Vec<HourRecord>,
    #[serde(flatten)]
    pub extra: Extra,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Forecast {
    pub forecastday: Vec<ForecastDay>,
    #[serde(flatten)]
    pub extra: Extra,
}

/// Response of `/forecast.json`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastData {
    pub location: Location,
    pub current: CurrentConditions,
    pub forecast: Forecast,
    #[serde(flatten)]
    pub extra: Extra,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Astronomy {
    pub astro: Astro,
    #[serde(flatten)]
    pub extra: Extra,
}

/// Response of `/astronomy.json`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AstronomyData {
    pub location: Location,
    pub astronomy: Astronomy,
    #[serde(flatten)]
    pub extra: Extra,
}

/// Upstream error envelope: `{"error": {"code": 1006, "message": "..."}}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeatherApiError {
    pub error: ApiErrorBody,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiErrorBody {
    pub code: i64,
    pub message: String,
}

/// Which half of each dual-unit field is displayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnitSystem {
    Metric,
    #[default]
    Imperial,
}

impl UnitSystem {
    pub fn as_str(&self) -> &'static str {
        match self {
            UnitSystem::Metric => "metric",
            UnitSystem::Imperial => "imperial",
        }
    }

    pub const fn all() -> &'static [UnitSystem] {
        &[UnitSystem::Metric, UnitSystem::Imperial]
    }

    /// Select the variant of a dual-unit value. Never converts.
    pub fn pick<T>(&self, metric: T, imperial: T) -> T {
        match self {
            UnitSystem::Metric => metric,
            UnitSystem::Imperial => imperial,
        }
    }

    pub fn temperature_label(&self) -> &'static str {
        self.pick("°C", "°F")
    }

    pub fn speed_label(&self) -> &'static str {
        self.pick("km/h", "mph")
    }

    pub fn distance_label(&self) -> &'static str {
        self.pick("km", "mi")
    }

    pub fn pressure_label(&self) -> &'static str {
        self.pick("mb", "in")
    }
}

impl std::fmt::Display for UnitSystem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for UnitSystem {
    type Error = anyhow::Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().to_lowercase().as_str() {
            "metric" | "c" | "celsius" => Ok(UnitSystem::Metric),
            "imperial" | "f" | "fahrenheit" => Ok(UnitSystem::Imperial),
            _ => Err(anyhow::anyhow!(
                "Unknown unit system '{value}'. Supported: metric, imperial."
            )),
        }
    }
}
