use chrono::{NaiveDate, NaiveDateTime, NaiveTime, TimeDelta};
use serde::Serialize;

use crate::model::Location;

/// Upstream's location-local timestamp layout (`hour[].time`, `location.localtime`).
const LOCAL_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M";
const ASTRO_TIME_FORMAT: &str = "%I:%M %p";

pub fn parse_local_timestamp(value: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(value.trim(), LOCAL_TIMESTAMP_FORMAT).ok()
}

pub fn parse_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").ok()
}

/// Wall clock at the location itself, when upstream supplied one.
pub fn location_now(location: &Location) -> Option<NaiveDateTime> {
    parse_local_timestamp(&location.localtime)
}

/// `"2024-06-01 15:00"` → `"3 PM"`.
pub fn format_hour_12h(time: &str) -> Option<String> {
    parse_local_timestamp(time).map(|t| t.format("%-I %p").to_string())
}

/// Parse an astro time such as `"06:05 AM"` or `"6:05 PM"`.
pub fn parse_12_hour(time: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(time.trim(), ASTRO_TIME_FORMAT).ok()
}

/// `"6:05 PM"` → `"18:05"`, `"12:00 AM"` → `"00:00"`. `None` for placeholders
/// like `"No moonrise"`.
pub fn to_24_hour(time: &str) -> Option<String> {
    parse_12_hour(time).map(|t| t.format("%H:%M").to_string())
}

/// True when `now_epoch` falls inside the hour starting at `hour_epoch`.
pub fn is_current_hour(hour_epoch: i64, now_epoch: i64) -> bool {
    (hour_epoch..hour_epoch + 3600).contains(&now_epoch)
}

pub fn day_label(date: NaiveDate, today: NaiveDate) -> String {
    if date == today {
        "Today".to_string()
    } else if today.succ_opt() == Some(date) {
        "Tomorrow".to_string()
    } else {
        date.format("%A").to_string()
    }
}

/// `"Jun 1"`
pub fn short_date(date: NaiveDate) -> String {
    date.format("%b %-d").to_string()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SunPhase {
    Sunrise,
    Daylight,
    Sunset,
    Night,
}

impl SunPhase {
    /// Night outside `[sunrise, sunset)`; the first hour after sunrise and the
    /// last hour before sunset get their own phase.
    pub fn infer(now: NaiveTime, sunrise: &str, sunset: &str) -> Option<Self> {
        let sunrise = parse_12_hour(sunrise)?;
        let sunset = parse_12_hour(sunset)?;
        let window = TimeDelta::hours(1);

        if now < sunrise || now >= sunset {
            return Some(SunPhase::Night);
        }
        if now - sunrise <= window {
            return Some(SunPhase::Sunrise);
        }
        if sunset - now <= window {
            return Some(SunPhase::Sunset);
        }
        Some(SunPhase::Daylight)
    }

    pub fn label(&self) -> &'static str {
        match self {
            SunPhase::Sunrise => "Sunrise",
            SunPhase::Daylight => "Daylight",
            SunPhase::Sunset => "Sunset",
            SunPhase::Night => "Night",
        }
    }
}
