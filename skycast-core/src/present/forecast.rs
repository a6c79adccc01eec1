use chrono::NaiveDate;

use crate::model::{ForecastData, ForecastDay, UnitSystem};

use super::{ConditionKind, classify_condition, day_label, mean, short_date, time::parse_date};

/// Days with a higher chance of rain than this count as rainy.
pub const RAINY_DAY_THRESHOLD: u8 = 50;

#[derive(Debug, Clone, PartialEq)]
pub struct DayRow {
    pub date: String,
    pub day_name: String,
    pub short_date: String,
    pub condition: String,
    pub kind: ConditionKind,
    pub max_temp: f64,
    pub min_temp: f64,
    pub humidity: f64,
    pub wind_speed: f64,
    pub visibility: f64,
    pub chance_of_rain: u8,
    pub sunrise: String,
    pub sunset: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ForecastSummary {
    pub avg_high: f64,
    pub avg_low: f64,
    pub rainy_days: usize,
    pub avg_humidity: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ForecastView {
    pub location_name: String,
    pub unit: UnitSystem,
    pub days: Vec<DayRow>,
    pub summary: Option<ForecastSummary>,
}

pub fn project(data: &ForecastData, unit: UnitSystem, today: NaiveDate) -> ForecastView {
    let days: Vec<DayRow> = data
        .forecast
        .forecastday
        .iter()
        .map(|day| project_day(day, unit, today))
        .collect();

    ForecastView {
        location_name: data.location.name.clone(),
        unit,
        summary: summarize(&days),
        days,
    }
}

fn project_day(day: &ForecastDay, unit: UnitSystem, today: NaiveDate) -> DayRow {
    let stats = &day.day;
    let (day_name, short) = match parse_date(&day.date) {
        Some(date) => (day_label(date, today), short_date(date)),
        None => (day.date.clone(), day.date.clone()),
    };

    DayRow {
        date: day.date.clone(),
        day_name,
        short_date: short,
        condition: stats.condition.text.clone(),
        kind: classify_condition(&stats.condition.text),
        max_temp: unit.pick(stats.maxtemp_c, stats.maxtemp_f),
        min_temp: unit.pick(stats.mintemp_c, stats.mintemp_f),
        humidity: stats.avghumidity,
        wind_speed: unit.pick(stats.maxwind_kph, stats.maxwind_mph),
        visibility: unit.pick(stats.avgvis_km, stats.avgvis_miles),
        chance_of_rain: stats.daily_chance_of_rain,
        sunrise: day.astro.sunrise.clone(),
        sunset: day.astro.sunset.clone(),
    }
}

fn summarize(days: &[DayRow]) -> Option<ForecastSummary> {
    Some(ForecastSummary {
        avg_high: mean(days.iter().map(|d| d.max_temp))?,
        avg_low: mean(days.iter().map(|d| d.min_temp))?,
        rainy_days: days.iter().filter(|d| d.chance_of_rain > RAINY_DAY_THRESHOLD).count(),
        avg_humidity: mean(days.iter().map(|d| d.humidity))?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::fixtures;

    fn week() -> ForecastData {
        let days: Vec<_> = [(1, 30.0, 10), (2, 28.0, 50), (3, 26.0, 51), (4, 24.0, 95)]
            .into_iter()
            .map(|(d, max, rain)| {
                fixtures::forecast_day(&format!("2024-06-{d:02}"), 1_717_200_000 + d * 86_400, max, rain)
            })
            .collect();
        serde_json::from_value(fixtures::forecast(&days)).expect("valid payload")
    }

    fn june(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, d).expect("valid date")
    }

    #[test]
    fn labels_days_and_picks_units() {
        let view = project(&week(), UnitSystem::Metric, june(1));

        let names: Vec<_> = view.days.iter().map(|d| d.day_name.as_str()).collect();
        assert_eq!(names, ["Today", "Tomorrow", "Monday", "Tuesday"]);
        assert_eq!(view.days[0].short_date, "Jun 1");
        assert_eq!(view.days[0].max_temp, 30.0);
        assert_eq!(view.days[0].min_temp, 20.0);
        assert_eq!(view.days[0].wind_speed, 15.1);
        assert_eq!(view.days[3].kind, ConditionKind::Rainy);
        assert_eq!(view.days[0].sunrise, "05:12 AM");
    }

    #[test]
    fn imperial_uses_fahrenheit_fields() {
        let view = project(&week(), UnitSystem::Imperial, june(1));
        assert_eq!(view.days[0].max_temp, 86.0);
        assert_eq!(view.days[0].wind_speed, 9.4);
        assert_eq!(view.days[0].visibility, 6.0);
    }

    #[test]
    fn rainy_days_need_more_than_half_chance() {
        let summary = project(&week(), UnitSystem::Metric, june(1)).summary.expect("non-empty");
        assert_eq!(summary.rainy_days, 2);
        assert_eq!(summary.avg_high, 27.0);
        assert_eq!(summary.avg_low, 17.0);
        assert_eq!(summary.avg_humidity, 65.0);
    }

    #[test]
    fn labels_are_relative_to_the_given_today() {
        let view = project(&week(), UnitSystem::Metric, june(3));
        assert_eq!(view.days[0].day_name, "Saturday");
        assert_eq!(view.days[2].day_name, "Today");
        assert_eq!(view.days[3].day_name, "Tomorrow");
    }
}
