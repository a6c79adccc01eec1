use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use skycast_core::{Config, Coordinates, UnitSystem};

use crate::{configure, session};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "skycast", version, about = "Terminal weather dashboard")]
pub struct Cli {
    /// Gateway base URL; overrides the configured one.
    #[arg(long, global = true)]
    pub gateway: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Interactively edit the gateway URL, default city and display settings.
    Configure,

    /// Print the dashboard once and exit.
    Show {
        /// City to show; must be one of the known cities.
        city: Option<String>,

        /// Use the device location instead of searching.
        #[arg(long, conflicts_with = "city")]
        here: bool,

        #[command(flatten)]
        session: SessionArgs,
    },

    /// Search cities and switch units in a prompt loop.
    Interactive {
        #[command(flatten)]
        session: SessionArgs,
    },
}

#[derive(Debug, Clone, Default, Args)]
pub struct SessionArgs {
    /// Start at this location ("<lat>,<lon>" or any name upstream accepts).
    #[arg(long, value_parser = parse_location)]
    pub at: Option<String>,

    /// Unit system: metric or imperial.
    #[arg(long, value_parser = parse_unit)]
    pub unit: Option<UnitSystem>,

    /// Hours shown in the hourly strip.
    #[arg(long)]
    pub hours: Option<usize>,

    /// Days shown in the forecast.
    #[arg(long)]
    pub days: Option<u8>,

    /// Expand every hour with wind, rain, humidity, visibility, pressure and UV.
    #[arg(long)]
    pub details: bool,
}

/// Anything that starts like a coordinate pair must be a valid one.
fn parse_location(value: &str) -> Result<String, String> {
    let value = value.trim();
    let looks_numeric = value
        .split_once(',')
        .is_some_and(|(lat, _)| lat.trim().parse::<f64>().is_ok());

    if !looks_numeric {
        return Ok(value.to_string());
    }
    Coordinates::parse(value).map(|c| c.to_query()).ok_or_else(|| {
        format!(
            "Invalid coordinates '{value}'. Expected <lat>,<lon> with latitude in -90..=90 \
             and longitude in -180..=180."
        )
    })
}

fn parse_unit(value: &str) -> Result<UnitSystem, String> {
    UnitSystem::try_from(value).map_err(|e| e.to_string())
}

impl Cli {
    pub async fn run(self) -> Result<()> {
        let mut config = Config::load()?;
        if let Some(gateway) = self.gateway {
            config.gateway_url = Some(gateway);
        }

        match self.command {
            Command::Configure => configure::run(config),
            Command::Show { city, here, session } => {
                session::show(config, &session, city.as_deref(), here).await
            }
            Command::Interactive { session } => session::interactive(config, &session).await,
        }
    }
}
