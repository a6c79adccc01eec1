//! Text panels for the four dashboard views.

use chrono::{DateTime, NaiveDateTime, Utc};
use skycast_core::{
    Dashboard, Resource, ResourceState, UnitSystem,
    model::{AstronomyData, CurrentWeatherData, ForecastData},
    present::{Stat, astronomy, current, forecast, hourly, time::location_now},
};

const RULE_WIDTH: usize = 48;

/// Everything besides the data that a render depends on.
#[derive(Debug, Clone, Copy)]
pub struct RenderOptions {
    pub unit: UnitSystem,
    pub hours: usize,
    /// Expand each hour and day with its secondary stats.
    pub details: bool,
    pub now: DateTime<Utc>,
    /// Wall clock used when a payload carries no location-local time.
    pub local_now: NaiveDateTime,
}

pub fn dashboard(dashboard: &Dashboard, opts: &RenderOptions) -> String {
    let panels = [
        current_panel(dashboard.current(), opts),
        hourly_panel(dashboard.hourly(), opts),
        astronomy_panel(dashboard.astronomy(), opts),
        forecast_panel(dashboard.forecast(), opts),
    ];

    match header(dashboard.shown_for()) {
        Some(header) => format!("{header}\n\n{}", panels.join("\n")),
        None => panels.join("\n"),
    }
}

/// The location every panel below was fetched for.
fn header(shown_for: Option<&str>) -> Option<String> {
    shown_for.map(|location| format!("Weather for {location}"))
}

pub fn current_panel(resource: &Resource<CurrentWeatherData>, opts: &RenderOptions) -> String {
    let state = resource.view(|data| current::project(data, opts.unit));
    panel("Current weather", state, "weather", |view| {
        let deg = view.unit.temperature_label();
        let mut lines = vec![
            format!(
                "📍 {}, {}, {} ({})",
                view.location_name, view.region, view.country, view.localtime
            ),
            format!("{} {}{deg}  {}", view.kind.symbol(), whole(view.temperature), view.condition),
            format!("   Feels like {}{deg}", whole(view.feels_like)),
        ];
        lines.extend(view.stats.iter().map(|stat| format!("   {}", stat_cell(stat, 12))));
        lines
    })
}

pub fn hourly_panel(resource: &Resource<ForecastData>, opts: &RenderOptions) -> String {
    let now_epoch = opts.now.timestamp();
    let state = resource.view(|data| hourly::project(data, opts.unit, now_epoch, opts.hours));
    panel("Hourly forecast", state, "hourly forecast", |view| {
        let Some(summary) = &view.summary else {
            return vec!["No hourly data available".to_string()];
        };

        let speed = view.unit.speed_label();
        let mut lines = Vec::new();
        for row in &view.rows {
            let label = if row.is_now { "Now" } else { row.time_label.as_str() };
            lines.push(format!(
                "   {:<6} {} {:>4}°  feels {}°  💧{:>3}%  {:>3} {speed}  {}",
                label,
                row.kind.symbol(),
                whole(row.temperature),
                whole(row.feels_like),
                row.chance_of_rain,
                whole(row.wind_speed),
                row.condition
            ));
            if opts.details {
                lines.push(format!("          {}", stat_row(&hourly::detail_stats(row, view.unit))));
            }
        }
        lines.push(format!(
            "   Avg temp {}°  Max rain {}%  Avg wind {} {speed}  Avg humidity {}%",
            whole(summary.avg_temperature),
            summary.max_chance_of_rain,
            whole(summary.avg_wind_speed),
            whole(summary.avg_humidity)
        ));
        lines
    })
}

pub fn astronomy_panel(resource: &Resource<AstronomyData>, opts: &RenderOptions) -> String {
    let state = resource.view(|data| {
        let now = location_now(&data.location).unwrap_or(opts.local_now).time();
        (astronomy::project_sun(data, now), astronomy::project_moon(data))
    });
    panel("Sun & moon", state, "astronomy", |(sun, moon)| {
        let phase = sun.phase.map(|p| p.label()).unwrap_or("Unknown");
        vec![
            format!("📍 {}", sun.location_name),
            format!("   ☀ Sunrise {}  Sunset {}  Current phase: {phase}", sun.sunrise, sun.sunset),
            format!(
                "   {} {}  {}% illuminated",
                moon.phase.symbol(),
                moon.phase_name,
                moon.illumination
            ),
            format!("   Moonrise {}  Moonset {}", moon.moonrise, moon.moonset),
        ]
    })
}

pub fn forecast_panel(resource: &Resource<ForecastData>, opts: &RenderOptions) -> String {
    let state = resource.view(|data| {
        let today = location_now(&data.location).unwrap_or(opts.local_now).date();
        forecast::project(data, opts.unit, today)
    });
    panel("Forecast", state, "forecast", |view| {
        let Some(summary) = &view.summary else {
            return vec!["No forecast data available".to_string()];
        };

        let speed = view.unit.speed_label();
        let distance = view.unit.distance_label();
        let mut lines = Vec::new();
        for day in &view.days {
            lines.push(format!(
                "   {:<10} {:<7} {} {:>4}° / {:>4}°  💧{:>3}%  {:>3} {speed}  {}",
                day.day_name,
                day.short_date,
                day.kind.symbol(),
                whole(day.max_temp),
                whole(day.min_temp),
                day.chance_of_rain,
                whole(day.wind_speed),
                day.condition
            ));
            lines.push(format!(
                "              Humidity {}%  Visibility {} {distance}  Sunrise {}  Sunset {}",
                whole(day.humidity),
                day.visibility,
                day.sunrise,
                day.sunset
            ));
        }
        lines.push(format!(
            "   Avg high {}°  Avg low {}°  Rainy days {}  Avg humidity {}%",
            whole(summary.avg_high),
            whole(summary.avg_low),
            summary.rainy_days,
            whole(summary.avg_humidity)
        ));
        lines
    })
}

fn panel<V>(
    title: &str,
    state: ResourceState<V>,
    noun: &str,
    body: impl FnOnce(V) -> Vec<String>,
) -> String {
    let rule = "─".repeat(RULE_WIDTH.saturating_sub(title.chars().count() + 4));
    let lines = match state {
        ResourceState::Idle => vec![format!("No {noun} data available")],
        ResourceState::Loading => vec![format!("Loading {noun} data...")],
        ResourceState::Failed(message) => vec![format!("Error: {message}")],
        ResourceState::Ready(view) => body(view),
    };
    format!("── {title} {rule}\n{}\n", lines.join("\n"))
}

fn stat_cell(stat: &Stat, label_width: usize) -> String {
    let label = format!("{:<label_width$}", stat.label);
    match &stat.sub_value {
        Some(sub) => format!("{label}{} ({sub})", stat.value),
        None => format!("{label}{}", stat.value),
    }
}

fn stat_row(stats: &[Stat]) -> String {
    stats
        .iter()
        .map(|stat| stat_cell(stat, stat.label.len() + 1))
        .collect::<Vec<_>>()
        .join("  ")
}

fn whole(value: f64) -> i64 {
    value.round() as i64
}
