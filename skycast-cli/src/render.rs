//! Human-friendly output formatting for presenter views.

use chrono::NaiveDateTime;
use skycast_core::{UnitSystem, WeatherSnapshot, current_view, daily_view, hourly_view};

/// Full report: current conditions, the daily forecast, and the next hours.
pub fn report(snapshot: &WeatherSnapshot, units: UnitSystem, now: NaiveDateTime) -> String {
    let current = current_view(snapshot, units);

    let mut lines = vec![
        current.location,
        format!("  {}  feels like {}", current.temperature, current.feels_like),
        format!(
            "  humidity {}   wind {}   precipitation {}",
            current.humidity, current.wind, current.precipitation
        ),
    ];

    let daily = daily_view(snapshot, units);
    if !daily.is_empty() {
        lines.push(String::new());
        lines.push("Daily forecast:".to_string());
        for row in daily {
            lines.push(format!("  {:<4} {}", row.day, row.range));
        }
    }

    let hourly = hourly_view(snapshot, units, now);
    if !hourly.is_empty() {
        lines.push(String::new());
        lines.push("Next hours:".to_string());
        for row in hourly {
            lines.push(format!("  {:>5}  {}", row.hour, row.temperature));
        }
    }

    lines.join("\n")
}
