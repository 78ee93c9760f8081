//! Turns a [`WeatherForecast`] into display strings.
//!
//! Temperatures use `{:.1}`: the exact binary value of the `f64` is rounded to
//! one fractional digit, and exact ties go to the even digit. `21.45` is stored
//! as `21.4499…` and therefore renders as `"21.4"`; `0.25` renders as `"0.2"`.

use serde::{Deserialize, Serialize};

use crate::model::{FormattedForecast, WeatherForecast};

/// Icon shown for a weather condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConditionIcon {
    Storm,
    Drizzle,
    Rain,
    Snow,
    Fog,
    Clear,
    Cloud,
    /// No condition was reported.
    Unknown,
}

impl ConditionIcon {
    pub fn as_str(&self) -> &'static str {
        match self {
            ConditionIcon::Storm => "storm",
            ConditionIcon::Drizzle => "drizzle",
            ConditionIcon::Rain => "rain",
            ConditionIcon::Snow => "snow",
            ConditionIcon::Fog => "fog",
            ConditionIcon::Clear => "clear",
            ConditionIcon::Cloud => "cloud",
            ConditionIcon::Unknown => "unknown",
        }
    }

    pub const fn all() -> &'static [ConditionIcon] {
        &[
            ConditionIcon::Storm,
            ConditionIcon::Drizzle,
            ConditionIcon::Rain,
            ConditionIcon::Snow,
            ConditionIcon::Fog,
            ConditionIcon::Clear,
            ConditionIcon::Cloud,
            ConditionIcon::Unknown,
        ]
    }

    /// Maps an OpenWeatherMap condition id to its icon.
    ///
    /// 801..=804 intentionally shares the storm icon with 200..=232.
    pub fn from_condition_id(id: i32) -> Self {
        match id {
            200..=232 => ConditionIcon::Storm,
            300..=321 => ConditionIcon::Drizzle,
            500..=531 => ConditionIcon::Rain,
            600..=622 => ConditionIcon::Snow,
            701..=781 => ConditionIcon::Fog,
            800 => ConditionIcon::Clear,
            801..=804 => ConditionIcon::Storm,
            _ => ConditionIcon::Cloud,
        }
    }

    /// Icon for the first condition id, or [`ConditionIcon::Unknown`] when there is none.
    pub fn from_first(id: Option<i32>) -> Self {
        id.map_or(ConditionIcon::Unknown, Self::from_condition_id)
    }
}

impl std::fmt::Display for ConditionIcon {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Builds the display rendition of `forecast`. Never fails.
pub fn format_forecast(forecast: &WeatherForecast) -> FormattedForecast {
    let first = forecast.conditions.first();

    FormattedForecast {
        city: forecast.city.clone(),
        temperature: one_decimal(forecast.main.temperature),
        feels_like: one_decimal(forecast.main.feels_like),
        max_temperature: one_decimal(forecast.main.max_temperature),
        min_temperature: one_decimal(forecast.main.min_temperature),
        humidity: forecast.main.humidity_pct.to_string(),
        description: first.map(|c| c.description.clone()).unwrap_or_default(),
        icon: ConditionIcon::from_first(first.map(|c| c.id)),
        coordinate: forecast.coordinate,
    }
}

fn one_decimal(value: f64) -> String {
    format!("{value:.1}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Condition, Coordinate, MainMetrics};

    fn forecast_with(conditions: Vec<Condition>) -> WeatherForecast {
        WeatherForecast {
            city: "Cupertino".to_string(),
            coordinate: Coordinate {
                latitude: 37.32,
                longitude: -122.03,
            },
            conditions,
            main: MainMetrics {
                temperature: 21.45,
                feels_like: 20.0,
                max_temperature: 25.3,
                min_temperature: 18.0,
                humidity_pct: 55,
            },
        }
    }

    fn condition(id: i32, description: &str) -> Condition {
        Condition {
            id,
            description: description.to_string(),
        }
    }

    #[test]
    fn thunderstorm_and_broken_cloud_ranges_share_storm_icon() {
        for id in (200..=232).chain(801..=804) {
            assert_eq!(
                ConditionIcon::from_condition_id(id),
                ConditionIcon::Storm,
                "id {id}"
            );
        }
    }

    #[test]
    fn clear_sky_is_a_single_point() {
        assert_eq!(ConditionIcon::from_condition_id(800), ConditionIcon::Clear);
        assert_eq!(ConditionIcon::from_condition_id(799), ConditionIcon::Cloud);
        assert_eq!(ConditionIcon::from_condition_id(801), ConditionIcon::Storm);
    }

    #[test]
    fn range_boundaries() {
        let cases = [
            (199, ConditionIcon::Cloud),
            (233, ConditionIcon::Cloud),
            (300, ConditionIcon::Drizzle),
            (321, ConditionIcon::Drizzle),
            (322, ConditionIcon::Cloud),
            (500, ConditionIcon::Rain),
            (531, ConditionIcon::Rain),
            (600, ConditionIcon::Snow),
            (622, ConditionIcon::Snow),
            (700, ConditionIcon::Cloud),
            (701, ConditionIcon::Fog),
            (781, ConditionIcon::Fog),
            (805, ConditionIcon::Cloud),
        ];

        for (id, expected) in cases {
            assert_eq!(ConditionIcon::from_condition_id(id), expected, "id {id}");
        }
    }

    #[test]
    fn ids_outside_table_fall_back_to_cloud() {
        assert_eq!(ConditionIcon::from_condition_id(900), ConditionIcon::Cloud);
        assert_eq!(ConditionIcon::from_condition_id(-5), ConditionIcon::Cloud);
        assert_eq!(ConditionIcon::from_condition_id(0), ConditionIcon::Cloud);
    }

    #[test]
    fn light_rain_scenario() {
        let formatted = format_forecast(&forecast_with(vec![condition(500, "light rain")]));

        assert_eq!(formatted.city, "Cupertino");
        assert_eq!(formatted.temperature, "21.4");
        assert_eq!(formatted.feels_like, "20.0");
        assert_eq!(formatted.max_temperature, "25.3");
        assert_eq!(formatted.min_temperature, "18.0");
        assert_eq!(formatted.humidity, "55");
        assert_eq!(formatted.description, "light rain");
        assert_eq!(formatted.icon_id(), "rain");
        let expected = Coordinate {
            latitude: 37.32,
            longitude: -122.03,
        };
        assert_eq!(formatted.coordinate, expected);
    }

    #[test]
    fn empty_conditions_give_empty_description_and_unknown_icon() {
        let formatted = format_forecast(&forecast_with(vec![]));

        assert_eq!(formatted.description, "");
        assert_eq!(formatted.icon, ConditionIcon::Unknown);
        assert_eq!(formatted.icon_id(), "unknown");
    }

    #[test]
    fn only_first_condition_is_used() {
        let formatted = format_forecast(&forecast_with(vec![
            condition(800, "clear sky"),
            condition(500, "light rain"),
        ]));

        assert_eq!(formatted.description, "clear sky");
        assert_eq!(formatted.icon, ConditionIcon::Clear);
    }

    #[test]
    fn one_decimal_rounding() {
        assert_eq!(one_decimal(21.456), "21.5");
        assert_eq!(one_decimal(21.45), "21.4");
        assert_eq!(one_decimal(0.25), "0.2");
        assert_eq!(one_decimal(0.75), "0.8");
        assert_eq!(one_decimal(-3.0), "-3.0");
        assert_eq!(one_decimal(7.0), "7.0");
    }

    #[test]
    fn formatting_twice_is_identical() {
        let forecast = forecast_with(vec![condition(601, "snow")]);
        assert_eq!(format_forecast(&forecast), format_forecast(&forecast));
    }

    #[test]
    fn icon_tokens_are_distinct_and_serialize_as_tokens() {
        let mut tokens: Vec<_> = ConditionIcon::all().iter().map(|i| i.as_str()).collect();
        tokens.sort_unstable();
        tokens.dedup();
        assert_eq!(tokens.len(), ConditionIcon::all().len());

        for icon in ConditionIcon::all() {
            let json = serde_json::to_string(icon).expect("icon serializes");
            assert_eq!(json, format!("\"{icon}\""));
        }
    }
}
