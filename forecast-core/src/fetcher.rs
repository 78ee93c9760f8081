use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::{convert::TryFrom, fmt::Debug};

use crate::model::WeatherForecast;

pub mod openweather;

/// Any reason a forecast could not be obtained.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("failed to reach weather service: {0}")]
    Request(#[from] reqwest::Error),

    #[error("weather service responded with status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("failed to decode weather response: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Source of current weather for a named city.
#[async_trait]
pub trait WeatherFetcher: Send + Sync + Debug {
    async fn current_forecast(&self, city: &str) -> Result<WeatherForecast, FetchError>;
}

/// Measurement system requested from the weather source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Units {
    /// Celsius.
    #[default]
    Metric,
    /// Fahrenheit.
    Imperial,
    /// Kelvin.
    Standard,
}

impl Units {
    pub fn as_str(&self) -> &'static str {
        match self {
            Units::Metric => "metric",
            Units::Imperial => "imperial",
            Units::Standard => "standard",
        }
    }

    pub fn temperature_suffix(&self) -> &'static str {
        match self {
            Units::Metric => "°C",
            Units::Imperial => "°F",
            Units::Standard => "K",
        }
    }

    pub const fn all() -> &'static [Units] {
        &[Units::Metric, Units::Imperial, Units::Standard]
    }
}

impl std::fmt::Display for Units {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for Units {
    type Error = anyhow::Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let lower = value.to_lowercase();

        match lower.as_str() {
            "metric" => Ok(Units::Metric),
            "imperial" => Ok(Units::Imperial),
            "standard" => Ok(Units::Standard),
            _ => Err(anyhow::anyhow!(
                "Unknown units '{value}'. Supported units: metric, imperial, standard."
            )),
        }
    }
}
