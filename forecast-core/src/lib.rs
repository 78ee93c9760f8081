//! Core library for the `forecast` CLI.
//!
//! This crate defines:
//! - Shared domain models (raw and display-ready forecasts)
//! - The forecast formatter and condition icon table
//! - An observable presenter that refreshes one city's forecast
//! - Abstraction over the weather source, with an OpenWeatherMap client
//! - Configuration & credentials handling
//!
//! It is used by `forecast-cli`, but any UI layer can own a presenter and
//! subscribe to it.

pub mod config;
pub mod fetcher;
pub mod format;
pub mod model;
pub mod presenter;

pub use config::Config;
pub use fetcher::{FetchError, Units, WeatherFetcher, openweather::OpenWeatherFetcher};
pub use format::{ConditionIcon, format_forecast};
pub use model::{Condition, Coordinate, FormattedForecast, MainMetrics, WeatherForecast};
pub use presenter::{ForecastPresenter, ForecastSlot};
