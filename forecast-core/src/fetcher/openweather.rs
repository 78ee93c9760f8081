use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use crate::model::{Condition, Coordinate, MainMetrics, WeatherForecast};

use super::{FetchError, Units, WeatherFetcher};

pub const DEFAULT_BASE_URL: &str = "https://api.openweathermap.org";

/// OpenWeatherMap "current weather data" client.
#[derive(Debug, Clone)]
pub struct OpenWeatherFetcher {
    api_key: String,
    units: Units,
    base_url: String,
    http: Client,
}

impl OpenWeatherFetcher {
    pub fn new(api_key: String, units: Units) -> Self {
        Self {
            api_key,
            units,
            base_url: DEFAULT_BASE_URL.to_string(),
            http: Client::new(),
        }
    }

    /// Points the client at another host, e.g. a proxy or a test server.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn units(&self) -> Units {
        self.units
    }
}

#[derive(Debug, Deserialize)]
struct OwCoord {
    lat: f64,
    lon: f64,
}

#[derive(Debug, Deserialize)]
struct OwWeather {
    id: i32,
    description: String,
}

#[derive(Debug, Deserialize)]
struct OwMain {
    temp: f64,
    feels_like: f64,
    temp_min: f64,
    temp_max: f64,
    humidity: u8,
}

#[derive(Debug, Deserialize)]
struct OwCurrentResponse {
    name: String,
    coord: OwCoord,
    #[serde(default)]
    weather: Vec<OwWeather>,
    main: OwMain,
}

impl From<OwCurrentResponse> for WeatherForecast {
    fn from(parsed: OwCurrentResponse) -> Self {
        WeatherForecast {
            city: parsed.name,
            coordinate: Coordinate {
                latitude: parsed.coord.lat,
                longitude: parsed.coord.lon,
            },
            conditions: parsed
                .weather
                .into_iter()
                .map(|w| Condition {
                    id: w.id,
                    description: w.description,
                })
                .collect(),
            main: MainMetrics {
                temperature: parsed.main.temp,
                feels_like: parsed.main.feels_like,
                max_temperature: parsed.main.temp_max,
                min_temperature: parsed.main.temp_min,
                humidity_pct: parsed.main.humidity,
            },
        }
    }
}

#[async_trait]
impl WeatherFetcher for OpenWeatherFetcher {
    async fn current_forecast(&self, city: &str) -> Result<WeatherForecast, FetchError> {
        let url = format!("{}/data/2.5/weather", self.base_url);
        debug!(city, units = %self.units, "requesting current weather");

        let res = self
            .http
            .get(&url)
            .query(&[
                ("q", city),
                ("appid", self.api_key.as_str()),
                ("units", self.units.as_str()),
            ])
            .send()
            .await?;

        let status = res.status();
        let body = res.text().await?;

        if !status.is_success() {
            return Err(FetchError::Status {
                status: status.as_u16(),
                body: truncate_body(&body),
            });
        }

        let parsed: OwCurrentResponse = serde_json::from_str(&body)?;
        Ok(parsed.into())
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.len() <= MAX {
        return body.to_string();
    }

    let mut end = MAX;
    while !body.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}...", &body[..end])
}
