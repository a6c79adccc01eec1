use anyhow::{Context, Result};
use inquire::{CustomType, CustomUserError, Select, Text, validator::Validation};
use skycast_core::{
    Config, UnitSystem,
    client::{MAX_FORECAST_DAYS, MIN_FORECAST_DAYS},
    config::DEFAULT_FORECAST_DAYS,
};

/// Walk through every setting, prefilled with the current values, and save.
pub fn run(mut config: Config) -> Result<()> {
    let gateway_url = Text::new("Gateway URL:")
        .with_default(config.gateway_url())
        .prompt()
        .context("Failed to read gateway URL")?;

    let default_city = Text::new("Default city:")
        .with_default(config.default_city())
        .with_help_message("Shown when no location is given and the device position is unknown")
        .prompt()
        .context("Failed to read default city")?;

    let units = UnitSystem::all().to_vec();
    let cursor = units.iter().position(|u| *u == config.unit()).unwrap_or(0);
    let unit = Select::new("Units:", units)
        .with_starting_cursor(cursor)
        .prompt()
        .context("Failed to read unit system")?;

    let hours_to_show = CustomType::<usize>::new("Hours in the hourly forecast:")
        .with_default(config.hours_to_show())
        .with_validator(|hours: &usize| -> Result<Validation, CustomUserError> {
            Ok(if *hours > 0 {
                Validation::Valid
            } else {
                Validation::Invalid("Show at least one hour".into())
            })
        })
        .prompt()
        .context("Failed to read hours")?;

    let forecast_days = CustomType::<u8>::new("Days in the forecast:")
        .with_default(config.forecast_days.unwrap_or(DEFAULT_FORECAST_DAYS))
        .with_validator(|days: &u8| -> Result<Validation, CustomUserError> {
            Ok(if (MIN_FORECAST_DAYS..=MAX_FORECAST_DAYS).contains(days) {
                Validation::Valid
            } else {
                Validation::Invalid(
                    format!("Must be between {MIN_FORECAST_DAYS} and {MAX_FORECAST_DAYS}").into(),
                )
            })
        })
        .prompt()
        .context("Failed to read forecast days")?;

    config.gateway_url = Some(gateway_url.trim().to_string());
    config.default_city = Some(default_city.trim().to_string());
    config.unit = Some(unit);
    config.hours_to_show = Some(hours_to_show);
    config.forecast_days = Some(forecast_days);

    let path = config.save()?;
    println!("Saved configuration to {}", path.display());
    Ok(())
}
