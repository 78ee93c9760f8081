use std::sync::Arc;

use anyhow::{Context, bail};
use chrono::Local;
use clap::{Parser, Subcommand};
use forecast_core::{Config, ForecastPresenter, ForecastSlot, Units};
use inquire::{Password, PasswordDisplayMode, Select, Text};
use tracing::debug;

use crate::render;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "forecast", version, about = "Current weather forecast CLI")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Interactively set the API key, default city and units.
    Configure,

    /// Show the current weather for a city.
    Show {
        /// City name; falls back to the configured default city.
        city: Option<String>,

        /// Override configured units: "metric", "imperial" or "standard".
        #[arg(long)]
        units: Option<String>,

        /// Print the formatted forecast as JSON.
        #[arg(long)]
        json: bool,
    },
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command {
            Command::Configure => configure(),
            Command::Show { city, units, json } => show(city, units, json).await,
        }
    }
}

fn configure() -> anyhow::Result<()> {
    let mut config = Config::load()?;

    let api_key = Password::new("OpenWeatherMap API key:")
        .without_confirmation()
        .with_display_mode(PasswordDisplayMode::Masked)
        .with_help_message("Leave empty to keep the current key")
        .prompt()?;
    if !api_key.trim().is_empty() {
        config.api_key = Some(api_key.trim().to_string());
    }

    let mut city_prompt = Text::new("Default city:");
    if let Some(city) = config.default_city.as_deref() {
        city_prompt = city_prompt.with_default(city);
    }
    let city = city_prompt.prompt()?;
    config.default_city = Some(city.trim().to_string()).filter(|c| !c.is_empty());

    let cursor = Units::all()
        .iter()
        .position(|u| *u == config.units)
        .unwrap_or(0);
    config.units = Select::new("Units:", Units::all().to_vec())
        .with_starting_cursor(cursor)
        .prompt()?;

    config.save()?;
    let path = Config::config_file_path()?;
    println!("Configuration saved to {}", path.display());

    Ok(())
}

async fn show(city: Option<String>, units: Option<String>, json: bool) -> anyhow::Result<()> {
    let config = Config::load()?;
    let city = config.resolve_city(city)?;
    let units = units.as_deref().map(Units::try_from).transpose()?;

    let fetcher = config.fetcher(units)?;
    let units = fetcher.units();
    debug!(%city, %units, "showing current weather");

    let presenter = ForecastPresenter::new(city, Arc::new(fetcher));
    let Some(forecast) = first_update(&presenter).await? else {
        bail!(
            "No weather data available for {}.\n\
             Hint: check the city name and API key, or rerun with RUST_LOG=forecast_core=debug.",
            presenter.city()
        );
    };

    if json {
        println!("{}", render::json(&forecast)?);
    } else {
        print!("{}", render::human(&forecast, units, Local::now()));
    }

    Ok(())
}

/// Refreshes once and returns what the presenter published.
async fn first_update(presenter: &ForecastPresenter) -> anyhow::Result<ForecastSlot> {
    let mut updates = presenter.subscribe();

    presenter
        .refresh()
        .await
        .context("Forecast refresh task failed")?;
    updates
        .changed()
        .await
        .context("Forecast presenter closed before publishing")?;

    Ok(updates.borrow_and_update().clone())
}
