use thiserror::Error;

/// Errors surfaced by the resolver and the snapshot builder.
///
/// Neither variant is retried; both propagate to the caller of the
/// top-level search so the UI layer can display a message and keep the
/// prior snapshot (if any) active.
#[derive(Debug, Error)]
pub enum WeatherError {
    /// The geocoding service returned no match for the searched name.
    #[error("no location found for '{0}'")]
    NotFound(String),

    /// A service call failed: network error, non-success status, or a
    /// payload missing the expected data.
    #[error("weather fetch failed: {0}")]
    FetchFailed(String),
}
