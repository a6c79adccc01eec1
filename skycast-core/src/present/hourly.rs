use crate::model::{ForecastData, HourRecord, UnitSystem};

use super::{ConditionKind, Stat, classify_condition, format_hour_12h, is_current_hour, mean};

pub const DEFAULT_HOURS_TO_SHOW: usize = 24;

#[derive(Debug, Clone, PartialEq)]
pub struct HourRow {
    pub time_label: String,
    pub time_epoch: i64,
    pub is_now: bool,
    pub temperature: f64,
    pub feels_like: f64,
    pub condition: String,
    pub kind: ConditionKind,
    pub humidity: u8,
    pub wind_speed: f64,
    pub wind_dir: String,
    pub chance_of_rain: u8,
    pub visibility: f64,
    pub pressure: f64,
    pub cloud_cover: u8,
    pub uv_index: f64,
}

/// Statistics over the displayed window only.
#[derive(Debug, Clone, PartialEq)]
pub struct HourlySummary {
    pub avg_temperature: f64,
    pub max_chance_of_rain: u8,
    pub avg_wind_speed: f64,
    pub avg_humidity: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct HourlyView {
    pub location_name: String,
    pub unit: UnitSystem,
    pub rows: Vec<HourRow>,
    pub summary: Option<HourlySummary>,
}

/// All hours of all fetched days, from `now_epoch` on, at most `limit` of them.
pub fn upcoming_hours(data: &ForecastData, now_epoch: i64, limit: usize) -> Vec<&HourRecord> {
    data.forecast
        .forecastday
        .iter()
        .flat_map(|day| day.hour.iter())
        .filter(|hour| hour.time_epoch >= now_epoch)
        .take(limit)
        .collect()
}

pub fn project(data: &ForecastData, unit: UnitSystem, now_epoch: i64, limit: usize) -> HourlyView {
    let rows: Vec<HourRow> = upcoming_hours(data, now_epoch, limit)
        .into_iter()
        .map(|hour| project_hour(hour, unit, now_epoch))
        .collect();

    HourlyView {
        location_name: data.location.name.clone(),
        unit,
        summary: summarize(&rows),
        rows,
    }
}

fn project_hour(hour: &HourRecord, unit: UnitSystem, now_epoch: i64) -> HourRow {
    HourRow {
        time_label: format_hour_12h(&hour.time).unwrap_or_else(|| hour.time.clone()),
        time_epoch: hour.time_epoch,
        is_now: is_current_hour(hour.time_epoch, now_epoch),
        temperature: unit.pick(hour.temp_c, hour.temp_f),
        feels_like: unit.pick(hour.feelslike_c, hour.feelslike_f),
        condition: hour.condition.text.clone(),
        kind: classify_condition(&hour.condition.text),
        humidity: hour.humidity,
        wind_speed: unit.pick(hour.wind_kph, hour.wind_mph),
        wind_dir: hour.wind_dir.clone(),
        chance_of_rain: hour.chance_of_rain,
        visibility: unit.pick(hour.vis_km, hour.vis_miles),
        pressure: unit.pick(hour.pressure_mb, hour.pressure_in),
        cloud_cover: hour.cloud,
        uv_index: hour.uv,
    }
}

fn summarize(rows: &[HourRow]) -> Option<HourlySummary> {
    Some(HourlySummary {
        avg_temperature: mean(rows.iter().map(|r| r.temperature))?,
        max_chance_of_rain: rows.iter().map(|r| r.chance_of_rain).max()?,
        avg_wind_speed: mean(rows.iter().map(|r| r.wind_speed))?,
        avg_humidity: mean(rows.iter().map(|r| f64::from(r.humidity)))?,
    })
}

/// Expanded detail grid for one hour.
pub fn detail_stats(row: &HourRow, unit: UnitSystem) -> Vec<Stat> {
    vec![
        Stat::new("Wind", format!("{} {}", row.wind_speed.round(), unit.speed_label()))
            .with_sub_value(row.wind_dir.clone()),
        Stat::new("Rain", format!("{}%", row.chance_of_rain)),
        Stat::new("Humidity", format!("{}%", row.humidity)),
        Stat::new("Visibility", format!("{} {}", row.visibility, unit.distance_label())),
        Stat::new("Pressure", format!("{} {}", row.pressure, unit.pressure_label())),
        Stat::new("UV", row.uv_index.to_string()),
    ]
}
