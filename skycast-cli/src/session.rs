//! One dashboard session: the shared location, the device, and the views.

use std::sync::Arc;

use anyhow::Result;
use chrono::{Local, Utc};
use inquire::{InquireError, Text};
use skycast_core::{
    Config, Dashboard, DashboardSettings, FixedGeolocator, Geolocator, LocationResolver,
    ResolveOutcome, UnitSystem, UnsupportedGeolocator, WeatherClient, WeatherSource,
};
use tracing::debug;

use crate::{
    cli::SessionArgs,
    render::{self, RenderOptions},
};

const PROMPT: &str = "Search for a city";
const PROMPT_HELP: &str =
    ":here uses your location, :metric / :imperial switch units, :details toggles hour details, :quit exits";

struct Session {
    resolver: LocationResolver,
    geolocator: Box<dyn Geolocator>,
    dashboard: Dashboard,
    unit: UnitSystem,
    hours: usize,
    details: bool,
}

impl Session {
    fn new(mut config: Config, args: &SessionArgs) -> Result<Self> {
        if let Some(days) = args.days {
            config.forecast_days = Some(days);
        }
        if let Some(hours) = args.hours {
            config.hours_to_show = Some(hours);
        }
        let forecast_days = config.forecast_days()?;

        let geolocator: Box<dyn Geolocator> = match config.home {
            Some(home) => Box::new(FixedGeolocator(home)),
            None => Box::new(UnsupportedGeolocator),
        };
        let source: Arc<dyn WeatherSource> = Arc::new(WeatherClient::new(config.gateway_url()));
        let resolver = LocationResolver::new(config.default_city())
            .with_known_cities(config.known_cities.iter().cloned());
        let settings = DashboardSettings { forecast_days, ..Default::default() };
        let dashboard = Dashboard::new(source, resolver.subscribe(), settings);

        Ok(Self {
            resolver,
            geolocator,
            dashboard,
            unit: args.unit.unwrap_or(config.unit()),
            hours: config.hours_to_show(),
            details: args.details,
        })
    }

    async fn start(&self, explicit: Option<&str>) {
        self.resolver.resolve_initial(explicit, self.geolocator.as_ref()).await;
    }

    async fn use_device_location(&self) {
        if let ResolveOutcome::Alert(message) =
            self.resolver.use_device_location(self.geolocator.as_ref()).await
        {
            eprintln!("{message}");
        }
    }

    fn render(&self) -> String {
        let opts = RenderOptions {
            unit: self.unit,
            hours: self.hours,
            details: self.details,
            now: Utc::now(),
            local_now: Local::now().naive_local(),
        };
        render::dashboard(&self.dashboard, &opts)
    }
}

pub async fn show(config: Config, args: &SessionArgs, city: Option<&str>, here: bool) -> Result<()> {
    let mut session = Session::new(config, args)?;
    session.start(args.at.as_deref()).await;

    if let Some(city) = city {
        session.resolver.search(city);
    }
    if here {
        session.use_device_location().await;
    }

    session.dashboard.sync().await;
    println!("{}", session.render());
    Ok(())
}

pub async fn interactive(config: Config, args: &SessionArgs) -> Result<()> {
    let mut session = Session::new(config, args)?;
    session.start(args.at.as_deref()).await;

    let mut redraw = false;
    loop {
        if session.dashboard.sync().await || redraw {
            println!("{}", session.render());
        }
        redraw = false;

        let Some(line) = prompt().await? else {
            break;
        };

        match Input::parse(&line) {
            Input::Quit => break,
            Input::Empty => {}
            Input::Here => session.use_device_location().await,
            Input::Unit(unit) => {
                redraw = session.unit != unit;
                session.unit = unit;
            }
            Input::Details => {
                session.details = !session.details;
                redraw = true;
            }
            Input::Search(query) => {
                if session.resolver.search(&query) == ResolveOutcome::Unchanged {
                    debug!(%query, "search left the location unchanged");
                }
            }
        }
    }

    Ok(())
}

/// `None` once the user cancels the prompt.
async fn prompt() -> Result<Option<String>> {
    let answer = tokio::task::spawn_blocking(|| {
        Text::new(PROMPT)
            .with_placeholder("Search for a city...")
            .with_help_message(PROMPT_HELP)
            .prompt()
    })
    .await?;

    match answer {
        Ok(line) => Ok(Some(line)),
        Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => Ok(None),
        Err(err) => Err(err.into()),
    }
}

#[derive(Debug, PartialEq, Eq)]
enum Input {
    Search(String),
    Here,
    Unit(UnitSystem),
    Details,
    Quit,
    Empty,
}

impl Input {
    fn parse(line: &str) -> Self {
        let line = line.trim();
        match line.to_lowercase().as_str() {
            "" => Input::Empty,
            ":here" => Input::Here,
            ":metric" => Input::Unit(UnitSystem::Metric),
            ":imperial" => Input::Unit(UnitSystem::Imperial),
            ":details" => Input::Details,
            ":quit" | ":q" => Input::Quit,
            _ => Input::Search(line.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_commands_case_insensitively() {
        assert_eq!(Input::parse(" :HERE "), Input::Here);
        assert_eq!(Input::parse(":metric"), Input::Unit(UnitSystem::Metric));
        assert_eq!(Input::parse(":Imperial"), Input::Unit(UnitSystem::Imperial));
        assert_eq!(Input::parse(":details"), Input::Details);
        assert_eq!(Input::parse(":q"), Input::Quit);
        assert_eq!(Input::parse("   "), Input::Empty);
    }

    #[test]
    fn anything_else_is_a_search() {
        assert_eq!(Input::parse("  New York "), Input::Search("New York".into()));
        assert_eq!(Input::parse(":unknown"), Input::Search(":unknown".into()));
    }

    #[test]
    fn session_applies_argument_overrides() {
        let config = Config { unit: Some(UnitSystem::Imperial), ..Default::default() };
        let args = SessionArgs {
            unit: Some(UnitSystem::Metric),
            hours: Some(6),
            days: Some(3),
            details: true,
            ..Default::default()
        };

        let session = Session::new(config, &args).expect("valid settings");
        assert_eq!(session.unit, UnitSystem::Metric);
        assert_eq!(session.hours, 6);
        assert!(session.details);
        assert_eq!(session.dashboard.settings().forecast_days, 3);
        assert_eq!(session.dashboard.settings().hourly_days, 2);
    }

    #[test]
    fn session_rejects_out_of_range_days() {
        let args = SessionArgs { days: Some(30), ..Default::default() };
        assert!(Session::new(Config::default(), &args).is_err());
    }

    #[tokio::test]
    async fn explicit_location_is_shared_with_the_dashboard() {
        let args = SessionArgs { at: Some("48.85,2.35".into()), ..Default::default() };
        let session = Session::new(Config::default(), &args).expect("valid settings");

        session.start(args.at.as_deref()).await;
        assert_eq!(session.resolver.current(), "48.85,2.35");
    }
}
