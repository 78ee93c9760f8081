use serde::{Deserialize, Serialize};

use crate::format::ConditionIcon;

/// Geographic position in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

/// One weather-condition entry as reported by the weather source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Condition {
    pub id: i32,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MainMetrics {
    pub temperature: f64,
    pub feels_like: f64,
    pub max_temperature: f64,
    pub min_temperature: f64,
    pub humidity_pct: u8,
}

/// Current weather for a single city, as returned by a [`crate::WeatherFetcher`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherForecast {
    pub city: String,
    pub coordinate: Coordinate,
    /// Ordered as reported; may be empty.
    pub conditions: Vec<Condition>,
    pub main: MainMetrics,
}

/// Display-ready rendition of a [`WeatherForecast`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormattedForecast {
    pub city: String,
    pub temperature: String,
    pub feels_like: String,
    pub max_temperature: String,
    pub min_temperature: String,
    pub humidity: String,
    pub description: String,
    pub icon: ConditionIcon,
    pub coordinate: Coordinate,
}

impl FormattedForecast {
    /// Icon token, e.g. `"rain"`.
    pub fn icon_id(&self) -> &'static str {
        self.icon.as_str()
    }
}
