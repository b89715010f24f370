//! Pure presentation of a snapshot as display-ready rows.
//!
//! Everything here is stateless and synchronous: the same snapshot, unit
//! system and clock always produce the same output. Flipping the unit
//! preference just means calling these functions again.

use chrono::{NaiveDateTime, Timelike};

use crate::model::{UnitSystem, WeatherSnapshot};

const KMH_PER_MPH: f64 = 1.609;
const MM_PER_INCH: f64 = 25.4;

/// How many future hours the hourly view shows.
const HOURLY_WINDOW: usize = 12;

/// Display strings for the current-conditions panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrentView {
    pub location: String,
    pub temperature: String,
    pub feels_like: String,
    pub humidity: String,
    pub wind: String,
    pub precipitation: String,
}

/// One row of the daily forecast, e.g. `Wed` / `24°C / 13°C`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DailyRow {
    pub day: String,
    pub range: String,
}

/// One row of the hourly forecast, e.g. `14:00` / `20°C`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HourlyRow {
    pub hour: String,
    pub temperature: String,
}

fn c_to_f(temp_c: f64) -> f64 {
    temp_c * 9.0 / 5.0 + 32.0
}

/// Whole-degree temperature in the active unit system.
fn format_temp(temp_c: f64, units: UnitSystem) -> String {
    match units {
        UnitSystem::Metric => format!("{}°C", temp_c.round() as i64),
        UnitSystem::Imperial => format!("{}°F", c_to_f(temp_c).round() as i64),
    }
}

/// "Feels like" is a fixed offset from the actual temperature, not a real
/// heat-index model: one degree below in Celsius mode, two below in
/// Fahrenheit mode. Keep the offsets as they are.
fn format_feels_like(temp_c: f64, units: UnitSystem) -> String {
    match units {
        UnitSystem::Metric => format!("{}°C", (temp_c - 1.0).round() as i64),
        UnitSystem::Imperial => format!("{}°F", (c_to_f(temp_c) - 2.0).round() as i64),
    }
}

fn format_wind(wind_kmh: f64, units: UnitSystem) -> String {
    match units {
        UnitSystem::Metric => format!("{wind_kmh:.1} km/h"),
        UnitSystem::Imperial => format!("{:.1} mph", wind_kmh / KMH_PER_MPH),
    }
}

fn format_precipitation(precipitation_mm: f64, units: UnitSystem) -> String {
    match units {
        UnitSystem::Metric => format!("{precipitation_mm:.2} mm"),
        UnitSystem::Imperial => format!("{:.2} in", precipitation_mm / MM_PER_INCH),
    }
}

/// Current conditions, converted and rounded for display.
pub fn current_view(snapshot: &WeatherSnapshot, units: UnitSystem) -> CurrentView {
    CurrentView {
        location: snapshot.location.clone(),
        temperature: format_temp(snapshot.temperature_c, units),
        feels_like: format_feels_like(snapshot.temperature_c, units),
        humidity: format!("{}%", snapshot.humidity_pct),
        wind: format_wind(snapshot.wind_kmh, units),
        precipitation: format_precipitation(snapshot.precipitation_mm, units),
    }
}

/// One row per forecast day, in the snapshot's (ascending date) order.
pub fn daily_view(snapshot: &WeatherSnapshot, units: UnitSystem) -> Vec<DailyRow> {
    snapshot
        .daily
        .iter()
        .map(|entry| DailyRow {
            day: entry.date.format("%a").to_string(),
            range: format!(
                "{} / {}",
                format_temp(entry.max_temp_c, units),
                format_temp(entry.min_temp_c, units)
            ),
        })
        .collect()
}

/// The next [`HOURLY_WINDOW`] hours strictly after `now`, in input order.
///
/// `now` is the wall clock in the place's local time, matching the
/// snapshot's hourly timestamps. When fewer future entries remain, only
/// those are returned; there is no padding.
pub fn hourly_view(
    snapshot: &WeatherSnapshot,
    units: UnitSystem,
    now: NaiveDateTime,
) -> Vec<HourlyRow> {
    snapshot
        .hourly
        .iter()
        .filter(|entry| entry.time > now)
        .take(HOURLY_WINDOW)
        .map(|entry| HourlyRow {
            hour: format!("{}:00", entry.time.hour()),
            temperature: format_temp(entry.temp_c, units),
        })
        .collect()
}
