use std::{convert::TryFrom, fmt};

/// Upstream resources reachable through the gateway.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    Current,
    Forecast,
    Astronomy,
}

impl Endpoint {
    /// Path suffix appended to the upstream base URL.
    pub fn as_str(&self) -> &'static str {
        match self {
            Endpoint::Current => "/current.json",
            Endpoint::Forecast => "/forecast.json",
            Endpoint::Astronomy => "/astronomy.json",
        }
    }

    pub const fn all() -> &'static [Endpoint] {
        &[Endpoint::Current, Endpoint::Forecast, Endpoint::Astronomy]
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for Endpoint {
    type Error = anyhow::Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Endpoint::all()
            .iter()
            .copied()
            .find(|e| e.as_str() == value)
            .ok_or_else(|| {
                anyhow::anyhow!(
                    "Unknown endpoint '{value}'. Supported endpoints: /current.json, /forecast.json, /astronomy.json."
                )
            })
    }
}
