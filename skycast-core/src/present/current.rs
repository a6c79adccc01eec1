use crate::model::{CurrentWeatherData, UnitSystem};

use super::{ConditionKind, Stat, classify_condition};

/// The "current conditions" card.
#[derive(Debug, Clone, PartialEq)]
pub struct CurrentView {
    pub location_name: String,
    pub region: String,
    pub country: String,
    pub localtime: String,
    pub unit: UnitSystem,
    pub temperature: f64,
    pub feels_like: f64,
    pub condition: String,
    pub kind: ConditionKind,
    pub stats: Vec<Stat>,
}

pub fn project(data: &CurrentWeatherData, unit: UnitSystem) -> CurrentView {
    let current = &data.current;

    let stats = vec![
        Stat::new(
            "Wind",
            format!("{} {}", unit.pick(current.wind_kph, current.wind_mph), unit.speed_label()),
        )
        .with_sub_value(current.wind_dir.clone()),
        Stat::new("Humidity", format!("{}%", current.humidity)),
        Stat::new(
            "Visibility",
            format!("{} {}", unit.pick(current.vis_km, current.vis_miles), unit.distance_label()),
        ),
        Stat::new(
            "Pressure",
            format!(
                "{} {}",
                unit.pick(current.pressure_mb, current.pressure_in),
                unit.pressure_label()
            ),
        ),
        Stat::new("UV Index", current.uv.to_string()),
        Stat::new("Cloud Cover", format!("{}%", current.cloud)),
    ];

    CurrentView {
        location_name: data.location.name.clone(),
        region: data.location.region.clone(),
        country: data.location.country.clone(),
        localtime: data.location.localtime.clone(),
        unit,
        temperature: unit.pick(current.temp_c, current.temp_f),
        feels_like: unit.pick(current.feelslike_c, current.feelslike_f),
        condition: current.condition.text.clone(),
        kind: classify_condition(&current.condition.text),
        stats,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::fixtures;

    fn data() -> CurrentWeatherData {
        serde_json::from_value(fixtures::current_weather()).expect("valid payload")
    }

    #[test]
    fn projects_metric_fields() {
        let view = project(&data(), UnitSystem::Metric);

        assert_eq!(view.location_name, "Pokhara");
        assert_eq!(view.temperature, 24.0);
        assert_eq!(view.feels_like, 26.1);
        assert_eq!(view.kind, ConditionKind::PartlyCloudy);

        let labels: Vec<_> = view.stats.iter().map(|s| s.label).collect();
        assert_eq!(labels, ["Wind", "Humidity", "Visibility", "Pressure", "UV Index", "Cloud Cover"]);
        assert_eq!(view.stats[0].value, "9 km/h");
        assert_eq!(view.stats[0].sub_value.as_deref(), Some("SSW"));
        assert_eq!(view.stats[3].value, "1008 mb");
    }

    #[test]
    fn projects_imperial_fields() {
        let view = project(&data(), UnitSystem::Imperial);

        assert_eq!(view.temperature, 75.2);
        assert_eq!(view.stats[0].value, "5.6 mph");
        assert_eq!(view.stats[2].value, "6 mi");
        assert_eq!(view.stats[3].value, "29.77 in");
        assert_eq!(view.stats[5].value, "25%");
    }

    #[test]
    fn projection_is_deterministic() {
        let data = data();
        assert_eq!(project(&data, UnitSystem::Metric), project(&data, UnitSystem::Metric));
    }
}
