use chrono::{DateTime, Local};
use forecast_core::{ConditionIcon, FormattedForecast, Units};

fn glyph(icon: ConditionIcon) -> &'static str {
    match icon {
        ConditionIcon::Storm => "⛈",
        ConditionIcon::Drizzle => "🌦",
        ConditionIcon::Rain => "🌧",
        ConditionIcon::Snow => "❄",
        ConditionIcon::Fog => "🌫",
        ConditionIcon::Clear => "☀",
        ConditionIcon::Cloud => "☁",
        ConditionIcon::Unknown => "?",
    }
}

/// Multi-line, human-friendly rendering.
pub fn human(forecast: &FormattedForecast, units: Units, updated: DateTime<Local>) -> String {
    let FormattedForecast {
        city,
        temperature: temp,
        feels_like: feels,
        max_temperature: high,
        min_temperature: low,
        humidity,
        description,
        icon,
        coordinate,
    } = forecast;
    let unit = units.temperature_suffix();
    let symbol = glyph(*icon);
    let (lat, lon) = (coordinate.latitude, coordinate.longitude);
    let updated = updated.format("%Y-%m-%d %H:%M");

    let mut lines = vec![format!("{symbol} {city} ({lat:.2}, {lon:.2})")];
    if !description.is_empty() {
        lines.push(format!("  {description}"));
    }
    lines.extend([
        format!("  Temperature: {temp}{unit} (feels like {feels}{unit})"),
        format!("  High / Low:  {high}{unit} / {low}{unit}"),
        format!("  Humidity:    {humidity}%"),
        format!("  Updated:     {updated}"),
    ]);

    lines.join("\n") + "\n"
}

pub fn json(forecast: &FormattedForecast) -> anyhow::Result<String> {
    Ok(serde_json::to_string_pretty(forecast)?)
}
