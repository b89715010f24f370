use async_trait::async_trait;
use chrono::{NaiveDate, NaiveDateTime};
use reqwest::Client;
use serde::Deserialize;

use crate::{
    error::WeatherError,
    model::{DailyEntry, HourlyEntry, Place, WeatherSnapshot},
};

use super::WeatherSource;

const GEOCODING_URL: &str = "https://geocoding-api.open-meteo.com/v1/search";
const FORECAST_URL: &str = "https://api.open-meteo.com/v1/forecast";

/// Hourly timestamps come back as "2024-05-01T14:00" (no seconds).
const HOURLY_TIME_FORMAT: &str = "%Y-%m-%dT%H:%M";

/// Client for the Open-Meteo geocoding and forecast services.
///
/// Both services are keyless, so unlike a typical provider there is no
/// credential to configure.
#[derive(Debug, Clone, Default)]
pub struct OpenMeteoSource {
    http: Client,
}

impl OpenMeteoSource {
    pub fn new() -> Self {
        Self { http: Client::new() }
    }
}

#[async_trait]
impl WeatherSource for OpenMeteoSource {
    async fn resolve(&self, place_name: &str) -> Result<Place, WeatherError> {
        let res = self
            .http
            .get(GEOCODING_URL)
            .query(&[("name", place_name), ("count", "1")])
            .send()
            .await
            .map_err(|e| WeatherError::FetchFailed(format!("geocoding request failed: {e}")))?;

        let status = res.status();
        let body = res
            .text()
            .await
            .map_err(|e| WeatherError::FetchFailed(format!("failed to read geocoding response: {e}")))?;

        if !status.is_success() {
            return Err(WeatherError::FetchFailed(format!(
                "geocoding request failed with status {status}: {}",
                truncate_body(&body),
            )));
        }

        let parsed: GeoResponse = serde_json::from_str(&body)
            .map_err(|e| WeatherError::FetchFailed(format!("failed to parse geocoding JSON: {e}")))?;

        place_from_response(parsed, place_name)
    }

    async fn build_snapshot(&self, place: &Place) -> Result<WeatherSnapshot, WeatherError> {
        let res = self
            .http
            .get(FORECAST_URL)
            .query(&[
                ("latitude", place.latitude.to_string()),
                ("longitude", place.longitude.to_string()),
                ("current_weather", "true".to_string()),
                (
                    "hourly",
                    "temperature_2m,relative_humidity_2m,precipitation,wind_speed_10m".to_string(),
                ),
                (
                    "daily",
                    "temperature_2m_max,temperature_2m_min,precipitation_sum".to_string(),
                ),
                ("timezone", "auto".to_string()),
            ])
            .send()
            .await
            .map_err(|e| WeatherError::FetchFailed(format!("forecast request failed: {e}")))?;

        let status = res.status();
        let body = res
            .text()
            .await
            .map_err(|e| WeatherError::FetchFailed(format!("failed to read forecast response: {e}")))?;

        if !status.is_success() {
            return Err(WeatherError::FetchFailed(format!(
                "forecast request failed with status {status}: {}",
                truncate_body(&body),
            )));
        }

        let parsed: ForecastResponse = serde_json::from_str(&body)
            .map_err(|e| WeatherError::FetchFailed(format!("failed to parse forecast JSON: {e}")))?;

        snapshot_from_response(place, parsed)
    }
}

#[derive(Debug, Deserialize)]
struct GeoResponse {
    #[serde(default)]
    results: Vec<GeoMatch>,
}

#[derive(Debug, Deserialize)]
struct GeoMatch {
    name: String,
    #[serde(default)]
    country: String,
    latitude: f64,
    longitude: f64,
}

#[derive(Debug, Deserialize)]
struct ForecastResponse {
    current_weather: CurrentBlock,
    hourly: HourlyBlock,
    daily: DailyBlock,
}

#[derive(Debug, Deserialize)]
struct CurrentBlock {
    temperature: f64,
    windspeed: f64,
}

#[derive(Debug, Deserialize)]
struct HourlyBlock {
    time: Vec<String>,
    temperature_2m: Vec<f64>,
    relative_humidity_2m: Vec<f64>,
    precipitation: Vec<f64>,
}

#[derive(Debug, Deserialize)]
struct DailyBlock {
    time: Vec<NaiveDate>,
    temperature_2m_max: Vec<f64>,
    temperature_2m_min: Vec<f64>,
}

/// Take the first (highest-relevance) match; the service orders by relevance
/// and we never disambiguate further.
fn place_from_response(parsed: GeoResponse, searched: &str) -> Result<Place, WeatherError> {
    parsed
        .results
        .into_iter()
        .next()
        .map(|m| Place {
            name: m.name,
            country: m.country,
            latitude: m.latitude,
            longitude: m.longitude,
        })
        .ok_or_else(|| WeatherError::NotFound(searched.to_string()))
}

/// Assemble a normalized snapshot from the parallel-array forecast payload.
///
/// "Now" humidity and precipitation are not part of the instantaneous
/// payload, so they are taken from the first element of the hourly series.
/// That makes them "start of the current hourly window" rather than true
/// instantaneous readings, which is the intended behavior.
fn snapshot_from_response(
    place: &Place,
    resp: ForecastResponse,
) -> Result<WeatherSnapshot, WeatherError> {
    let hourly = &resp.hourly;
    if hourly.time.len() != hourly.temperature_2m.len()
        || hourly.time.len() != hourly.relative_humidity_2m.len()
        || hourly.time.len() != hourly.precipitation.len()
    {
        return Err(WeatherError::FetchFailed(
            "forecast hourly arrays have mismatched lengths".to_string(),
        ));
    }

    let humidity_pct = hourly
        .relative_humidity_2m
        .first()
        .map(|h| h.round() as u8)
        .ok_or_else(|| WeatherError::FetchFailed("forecast hourly series is empty".to_string()))?;
    let precipitation_mm = hourly.precipitation[0];

    let mut hourly_entries = Vec::with_capacity(hourly.time.len());
    for (time, temp_c) in hourly.time.iter().zip(&hourly.temperature_2m) {
        let time = NaiveDateTime::parse_from_str(time, HOURLY_TIME_FORMAT).map_err(|e| {
            WeatherError::FetchFailed(format!("bad hourly timestamp '{time}': {e}"))
        })?;
        hourly_entries.push(HourlyEntry { time, temp_c: *temp_c });
    }

    let daily = &resp.daily;
    if daily.time.len() != daily.temperature_2m_max.len()
        || daily.time.len() != daily.temperature_2m_min.len()
    {
        return Err(WeatherError::FetchFailed(
            "forecast daily arrays have mismatched lengths".to_string(),
        ));
    }

    let daily_entries = daily
        .time
        .iter()
        .zip(daily.temperature_2m_max.iter().zip(&daily.temperature_2m_min))
        .map(|(date, (max, min))| DailyEntry {
            date: *date,
            max_temp_c: *max,
            min_temp_c: *min,
        })
        .collect();

    Ok(WeatherSnapshot {
        location: place.label(),
        temperature_c: resp.current_weather.temperature,
        wind_kmh: resp.current_weather.windspeed,
        humidity_pct,
        precipitation_mm,
        daily: daily_entries,
        hourly: hourly_entries,
    })
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.len() > MAX { format!("{}...", &body[..MAX]) } else { body.to_string() }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_place() -> Place {
        Place {
            name: "Berlin".to_string(),
            country: "Germany".to_string(),
            latitude: 52.52,
            longitude: 13.41,
        }
    }

    fn forecast_json() -> &'static str {
        r#"{
            "current_weather": { "temperature": 20.0, "windspeed": 10.0, "winddirection": 180 },
            "hourly": {
                "time": ["2024-05-01T13:00", "2024-05-01T14:00", "2024-05-01T15:00"],
                "temperature_2m": [19.5, 20.0, 20.5],
                "relative_humidity_2m": [62, 60, 58],
                "precipitation": [0.3, 0.0, 0.0],
                "wind_speed_10m": [9.0, 10.0, 11.0]
            },
            "daily": {
                "time": ["2024-05-01", "2024-05-02", "2024-05-03"],
                "temperature_2m_max": [21.0, 23.5, 18.0],
                "temperature_2m_min": [11.0, 12.5, 9.0],
                "precipitation_sum": [0.3, 0.0, 4.1]
            }
        }"#
    }

    #[test]
    fn snapshot_takes_now_humidity_and_precipitation_from_first_hourly_entry() {
        let parsed: ForecastResponse = serde_json::from_str(forecast_json()).unwrap();
        let snapshot = snapshot_from_response(&test_place(), parsed).unwrap();

        assert_eq!(snapshot.location, "Berlin, Germany");
        assert_eq!(snapshot.temperature_c, 20.0);
        assert_eq!(snapshot.wind_kmh, 10.0);
        assert_eq!(snapshot.humidity_pct, 62);
        assert_eq!(snapshot.precipitation_mm, 0.3);
    }

    #[test]
    fn snapshot_preserves_series_order_and_length() {
        let parsed: ForecastResponse = serde_json::from_str(forecast_json()).unwrap();
        let snapshot = snapshot_from_response(&test_place(), parsed).unwrap();

        assert_eq!(snapshot.hourly.len(), 3);
        assert!(snapshot.hourly.windows(2).all(|w| w[0].time < w[1].time));
        assert_eq!(snapshot.hourly[1].temp_c, 20.0);

        assert_eq!(snapshot.daily.len(), 3);
        assert!(snapshot.daily.windows(2).all(|w| w[0].date < w[1].date));
        assert_eq!(snapshot.daily[1].max_temp_c, 23.5);
        assert_eq!(snapshot.daily[1].min_temp_c, 12.5);
    }

    #[test]
    fn empty_hourly_series_is_a_fetch_failure() {
        let json = r#"{
            "current_weather": { "temperature": 20.0, "windspeed": 10.0 },
            "hourly": {
                "time": [], "temperature_2m": [],
                "relative_humidity_2m": [], "precipitation": []
            },
            "daily": { "time": [], "temperature_2m_max": [], "temperature_2m_min": [] }
        }"#;
        let parsed: ForecastResponse = serde_json::from_str(json).unwrap();

        let err = snapshot_from_response(&test_place(), parsed).unwrap_err();
        assert!(matches!(err, WeatherError::FetchFailed(_)));
    }

    #[test]
    fn mismatched_hourly_arrays_are_a_fetch_failure() {
        let json = r#"{
            "current_weather": { "temperature": 20.0, "windspeed": 10.0 },
            "hourly": {
                "time": ["2024-05-01T13:00", "2024-05-01T14:00"],
                "temperature_2m": [19.5],
                "relative_humidity_2m": [62, 60],
                "precipitation": [0.3, 0.0]
            },
            "daily": { "time": [], "temperature_2m_max": [], "temperature_2m_min": [] }
        }"#;
        let parsed: ForecastResponse = serde_json::from_str(json).unwrap();

        let err = snapshot_from_response(&test_place(), parsed).unwrap_err();
        assert!(err.to_string().contains("mismatched lengths"));
    }

    #[test]
    fn missing_forecast_block_fails_to_parse() {
        let json = r#"{ "current_weather": { "temperature": 20.0, "windspeed": 10.0 } }"#;
        assert!(serde_json::from_str::<ForecastResponse>(json).is_err());
    }

    #[test]
    fn bad_hourly_timestamp_is_a_fetch_failure() {
        let json = r#"{
            "current_weather": { "temperature": 20.0, "windspeed": 10.0 },
            "hourly": {
                "time": ["not-a-time"],
                "temperature_2m": [19.5],
                "relative_humidity_2m": [62],
                "precipitation": [0.3]
            },
            "daily": { "time": [], "temperature_2m_max": [], "temperature_2m_min": [] }
        }"#;
        let parsed: ForecastResponse = serde_json::from_str(json).unwrap();

        let err = snapshot_from_response(&test_place(), parsed).unwrap_err();
        assert!(err.to_string().contains("bad hourly timestamp"));
    }

    #[test]
    fn geocoding_takes_first_match() {
        let json = r#"{
            "results": [
                { "name": "Berlin", "country": "Germany", "latitude": 52.52, "longitude": 13.41 },
                { "name": "Berlin", "country": "United States", "latitude": 44.47, "longitude": -71.19 }
            ]
        }"#;
        let parsed: GeoResponse = serde_json::from_str(json).unwrap();

        let place = place_from_response(parsed, "berlin").unwrap();
        assert_eq!(place.name, "Berlin");
        assert_eq!(place.country, "Germany");
        assert_eq!(place.latitude, 52.52);
    }

    #[test]
    fn geocoding_without_results_is_not_found() {
        // The service omits the results key entirely on a miss.
        let parsed: GeoResponse = serde_json::from_str("{}").unwrap();

        let err = place_from_response(parsed, "atlantis").unwrap_err();
        match err {
            WeatherError::NotFound(name) => assert_eq!(name, "atlantis"),
            other => panic!("expected NotFound, got {other:?}"),
        }
    }
}
