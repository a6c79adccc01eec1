use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf};

use crate::{
    client::{MAX_FORECAST_DAYS, MIN_FORECAST_DAYS},
    location::{Coordinates, DEFAULT_CITY},
    model::UnitSystem,
    present::hourly::DEFAULT_HOURS_TO_SHOW,
};

pub const DEFAULT_GATEWAY_URL: &str = "http://127.0.0.1:8080";
pub const DEFAULT_FORECAST_DAYS: u8 = 7;

/// Dashboard settings stored on disk. Every field is optional; accessors
/// fill in defaults.
///
/// Example TOML:
/// ```toml
/// gateway_url = "http://127.0.0.1:8080"
/// default_city = "Pokhara"
/// unit = "metric"
/// known_cities = ["Bhaktapur"]
///
/// [home]
/// latitude = 28.2
/// longitude = 83.98
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Config {
    pub gateway_url: Option<String>,
    pub default_city: Option<String>,
    pub unit: Option<UnitSystem>,
    pub hours_to_show: Option<usize>,
    pub forecast_days: Option<u8>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub known_cities: Vec<String>,
    /// Position reported as the device location.
    pub home: Option<Coordinates>,
}

impl Config {
    pub fn gateway_url(&self) -> &str {
        self.gateway_url.as_deref().unwrap_or(DEFAULT_GATEWAY_URL)
    }

    pub fn default_city(&self) -> &str {
        self.default_city
            .as_deref()
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .unwrap_or(DEFAULT_CITY)
    }

    pub fn unit(&self) -> UnitSystem {
        self.unit.unwrap_or_default()
    }

    pub fn hours_to_show(&self) -> usize {
        self.hours_to_show.filter(|h| *h > 0).unwrap_or(DEFAULT_HOURS_TO_SHOW)
    }

    /// Forecast length, validated against what upstream serves.
    pub fn forecast_days(&self) -> Result<u8> {
        let days = self.forecast_days.unwrap_or(DEFAULT_FORECAST_DAYS);
        if !(MIN_FORECAST_DAYS..=MAX_FORECAST_DAYS).contains(&days) {
            return Err(anyhow!(
                "Configured forecast_days = {days} is out of range ({MIN_FORECAST_DAYS}..={MAX_FORECAST_DAYS}).\n\
                 Hint: run `skycast configure` or edit {}.",
                Self::config_file_path()
                    .map(|p| p.display().to_string())
                    .unwrap_or_else(|_| "the config file".to_string())
            ));
        }
        Ok(days)
    }

    /// Load config from disk, or return an empty default if it doesn't exist yet.
    pub fn load() -> Result<Self> {
        let path = Self::config_file_path()?;
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        Self::from_toml(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    pub fn from_toml(contents: &str) -> Result<Self> {
        toml::from_str(contents).context("Invalid skycast configuration")
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<PathBuf> {
        let path = Self::config_file_path()?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(&path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(path)
    }

    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "skycast", "skycast")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }
}
