use async_trait::async_trait;
use std::fmt::Debug;

use crate::{
    error::WeatherError,
    model::{Place, WeatherSnapshot},
};

pub mod open_meteo;

pub use open_meteo::OpenMeteoSource;

/// Seam between the core and the remote geocoding/forecast services.
#[async_trait]
pub trait WeatherSource: Send + Sync + Debug {
    /// Resolve a free-text place name into coordinates plus a display name.
    ///
    /// Takes the first (highest-relevance) match; returns
    /// [`WeatherError::NotFound`] when the service has none.
    async fn resolve(&self, place_name: &str) -> Result<Place, WeatherError>;

    /// Fetch forecast data for an already-resolved place and assemble a
    /// normalized snapshot.
    async fn build_snapshot(&self, place: &Place) -> Result<WeatherSnapshot, WeatherError>;
}

/// Resolve a place name and build its snapshot, in sequence.
///
/// The two calls cannot overlap: the forecast request needs the resolved
/// coordinates. On failure nothing is produced; the caller keeps whatever
/// snapshot it already held.
pub async fn search(
    source: &dyn WeatherSource,
    place_name: &str,
) -> Result<WeatherSnapshot, WeatherError> {
    let place = source.resolve(place_name).await?;
    source.build_snapshot(&place).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    struct FixedSource {
        resolve_to: Option<Place>,
    }

    #[async_trait]
    impl WeatherSource for FixedSource {
        async fn resolve(&self, place_name: &str) -> Result<Place, WeatherError> {
            self.resolve_to
                .clone()
                .ok_or_else(|| WeatherError::NotFound(place_name.to_string()))
        }

        async fn build_snapshot(&self, place: &Place) -> Result<WeatherSnapshot, WeatherError> {
            Ok(WeatherSnapshot {
                location: place.label(),
                temperature_c: 20.0,
                wind_kmh: 10.0,
                humidity_pct: 50,
                precipitation_mm: 0.0,
                daily: Vec::new(),
                hourly: Vec::new(),
            })
        }
    }

    #[tokio::test]
    async fn search_chains_resolve_and_build() {
        let source = FixedSource {
            resolve_to: Some(Place {
                name: "Lisbon".to_string(),
                country: "Portugal".to_string(),
                latitude: 38.72,
                longitude: -9.14,
            }),
        };

        let snapshot = search(&source, "lisbon").await.expect("search should succeed");
        assert_eq!(snapshot.location, "Lisbon, Portugal");
    }

    #[tokio::test]
    async fn search_propagates_not_found() {
        let source = FixedSource { resolve_to: None };

        let err = search(&source, "atlantis").await.unwrap_err();
        match err {
            WeatherError::NotFound(name) => assert_eq!(name, "atlantis"),
            other => panic!("expected NotFound, got {other:?}"),
        }
    }
}
