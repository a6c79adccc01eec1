//! Free-text condition and moon phase classification.
//!
//! Both are substring heuristics over upstream's English descriptions. The
//! checks run in a fixed order and the first hit wins; the keyword sets
//! overlap, so reordering them changes results.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ConditionKind {
    Sunny,
    PartlyCloudy,
    Cloudy,
    Rainy,
}

impl ConditionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ConditionKind::Sunny => "sunny",
            ConditionKind::PartlyCloudy => "partly-cloudy",
            ConditionKind::Cloudy => "cloudy",
            ConditionKind::Rainy => "rainy",
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            ConditionKind::Sunny => "☀",
            ConditionKind::PartlyCloudy => "⛅",
            ConditionKind::Cloudy => "☁",
            ConditionKind::Rainy => "🌧",
        }
    }
}

const CONDITION_KEYWORDS: &[(&[&str], ConditionKind)] = &[
    (&["sunny", "clear"], ConditionKind::Sunny),
    (&["partly", "partial"], ConditionKind::PartlyCloudy),
    (&["rain", "shower", "drizzle"], ConditionKind::Rainy),
];

/// Anything unrecognised is cloudy.
pub fn classify_condition(text: &str) -> ConditionKind {
    let text = text.to_lowercase();
    CONDITION_KEYWORDS
        .iter()
        .find(|(keywords, _)| keywords.iter().any(|k| text.contains(k)))
        .map(|(_, kind)| *kind)
        .unwrap_or(ConditionKind::Cloudy)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum MoonPhase {
    New,
    WaxingCrescent,
    FirstQuarter,
    WaxingGibbous,
    Full,
    WaningGibbous,
    LastQuarter,
    WaningCrescent,
    Unknown,
}

const MOON_PHASE_KEYWORDS: &[(&str, MoonPhase)] = &[
    ("new", MoonPhase::New),
    ("waxing crescent", MoonPhase::WaxingCrescent),
    ("first quarter", MoonPhase::FirstQuarter),
    ("waxing gibbous", MoonPhase::WaxingGibbous),
    ("full", MoonPhase::Full),
    ("waning gibbous", MoonPhase::WaningGibbous),
    ("last quarter", MoonPhase::LastQuarter),
    ("third quarter", MoonPhase::LastQuarter),
    ("waning crescent", MoonPhase::WaningCrescent),
];

impl MoonPhase {
    pub fn from_description(text: &str) -> Self {
        let text = text.to_lowercase();
        MOON_PHASE_KEYWORDS
            .iter()
            .find(|(keyword, _)| text.contains(keyword))
            .map(|(_, phase)| *phase)
            .unwrap_or(MoonPhase::Unknown)
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            MoonPhase::New => "🌑",
            MoonPhase::WaxingCrescent => "🌒",
            MoonPhase::FirstQuarter => "🌓",
            MoonPhase::WaxingGibbous => "🌔",
            MoonPhase::Full => "🌕",
            MoonPhase::WaningGibbous => "🌖",
            MoonPhase::LastQuarter => "🌗",
            MoonPhase::WaningCrescent => "🌘",
            MoonPhase::Unknown => "🌙",
        }
    }
}
