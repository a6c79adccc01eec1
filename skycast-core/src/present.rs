//! Pure projections from upstream payloads to display records.
//!
//! Nothing here performs I/O or reads the clock: callers pass the unit system
//! and "now" explicitly, so the same inputs always give the same output.

pub mod astronomy;
pub mod condition;
pub mod current;
pub mod forecast;
pub mod hourly;
pub mod time;

pub use condition::{ConditionKind, MoonPhase, classify_condition};
pub use time::{SunPhase, day_label, format_hour_12h, is_current_hour, short_date, to_24_hour};

/// One labelled figure in a view's detail grid.
#[derive(Debug, Clone, PartialEq)]
pub struct Stat {
    pub label: &'static str,
    pub value: String,
    pub sub_value: Option<String>,
}

impl Stat {
    pub fn new(label: &'static str, value: impl Into<String>) -> Self {
        Self { label, value: value.into(), sub_value: None }
    }

    pub fn with_sub_value(mut self, sub_value: impl Into<String>) -> Self {
        self.sub_value = Some(sub_value.into());
        self
    }
}

/// Arithmetic mean; `None` for an empty input.
pub(crate) fn mean(values: impl IntoIterator<Item = f64>) -> Option<f64> {
    let (sum, count) = values.into_iter().fold((0.0, 0usize), |(sum, n), v| (sum + v, n + 1));
    (count > 0).then(|| sum / count as f64)
}
