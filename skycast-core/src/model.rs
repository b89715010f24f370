use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// A resolved geocoding match.
///
/// Produced by [`crate::source::WeatherSource::resolve`], consumed by the
/// snapshot builder, and not retained afterwards.
#[derive(Debug, Clone)]
pub struct Place {
    pub name: String,
    pub country: String,
    pub latitude: f64,
    pub longitude: f64,
}

impl Place {
    /// Display label, e.g. "Berlin, Germany".
    pub fn label(&self) -> String {
        format!("{}, {}", self.name, self.country)
    }
}

/// One day of the daily forecast.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DailyEntry {
    pub date: NaiveDate,
    pub max_temp_c: f64,
    pub min_temp_c: f64,
}

/// One hour of the hourly forecast. Times are local to the place, as
/// reported by the forecast service with timezone auto-detection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HourlyEntry {
    pub time: NaiveDateTime,
    pub temp_c: f64,
}

/// Normalized weather data for one place.
///
/// All numeric fields are stored in metric units regardless of the display
/// preference; unit conversion is a display-time concern and is never
/// written back into the snapshot. A snapshot is replaced wholesale on each
/// successful search, never patched.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherSnapshot {
    /// Display label, e.g. "Berlin, Germany".
    pub location: String,
    pub temperature_c: f64,
    pub wind_kmh: f64,
    pub humidity_pct: u8,
    pub precipitation_mm: f64,
    /// Ordered by date ascending, one entry per forecast day.
    pub daily: Vec<DailyEntry>,
    /// Chronological, covering the full horizon returned by the service.
    pub hourly: Vec<HourlyEntry>,
}

/// Display unit preference, orthogonal to snapshot storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum UnitSystem {
    #[default]
    Metric,
    Imperial,
}

impl UnitSystem {
    pub fn as_str(&self) -> &'static str {
        match self {
            UnitSystem::Metric => "metric",
            UnitSystem::Imperial => "imperial",
        }
    }

    pub const fn all() -> &'static [UnitSystem] {
        &[UnitSystem::Metric, UnitSystem::Imperial]
    }

    /// The other unit system.
    pub fn toggle(self) -> Self {
        match self {
            UnitSystem::Metric => UnitSystem::Imperial,
            UnitSystem::Imperial => UnitSystem::Metric,
        }
    }
}

impl std::fmt::Display for UnitSystem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for UnitSystem {
    type Error = anyhow::Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let lower = value.to_lowercase();

        match lower.as_str() {
            "metric" => Ok(UnitSystem::Metric),
            "imperial" => Ok(UnitSystem::Imperial),
            _ => Err(anyhow::anyhow!(
                "Unknown unit system '{value}'. Supported values: metric, imperial."
            )),
        }
    }
}
