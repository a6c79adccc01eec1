use chrono::NaiveTime;

use crate::model::AstronomyData;

use super::{MoonPhase, SunPhase};

#[derive(Debug, Clone, PartialEq)]
pub struct SunView {
    pub location_name: String,
    pub sunrise: String,
    pub sunset: String,
    /// `None` when upstream sent a placeholder instead of a time.
    pub phase: Option<SunPhase>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MoonView {
    pub location_name: String,
    pub phase_name: String,
    pub phase: MoonPhase,
    pub moonrise: String,
    pub moonset: String,
    pub illumination: u8,
}

pub fn project_sun(data: &AstronomyData, now: NaiveTime) -> SunView {
    let astro = &data.astronomy.astro;
    SunView {
        location_name: data.location.name.clone(),
        sunrise: astro.sunrise.clone(),
        sunset: astro.sunset.clone(),
        phase: SunPhase::infer(now, &astro.sunrise, &astro.sunset),
    }
}

pub fn project_moon(data: &AstronomyData) -> MoonView {
    let astro = &data.astronomy.astro;
    MoonView {
        location_name: data.location.name.clone(),
        phase_name: astro.moon_phase.clone(),
        phase: MoonPhase::from_description(&astro.moon_phase),
        moonrise: astro.moonrise.clone(),
        moonset: astro.moonset.clone(),
        illumination: astro.moon_illumination,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::fixtures;

    fn data() -> AstronomyData {
        serde_json::from_value(fixtures::astronomy()).expect("valid payload")
    }

    #[test]
    fn sun_view_infers_phase_from_now() {
        let data = data();
        let noon = NaiveTime::from_hms_opt(12, 0, 0).expect("valid time");
        let dusk = NaiveTime::from_hms_opt(18, 30, 0).expect("valid time");

        assert_eq!(project_sun(&data, noon).phase, Some(SunPhase::Daylight));
        assert_eq!(project_sun(&data, dusk).phase, Some(SunPhase::Sunset));
        assert_eq!(project_sun(&data, noon).sunrise, "05:12 AM");
    }

    #[test]
    fn moon_view_maps_phase() {
        let view = project_moon(&data());
        assert_eq!(view.phase, MoonPhase::WaningCrescent);
        assert_eq!(view.illumination, 31);
        assert_eq!(view.moonset, "03:05 PM");
    }
}
