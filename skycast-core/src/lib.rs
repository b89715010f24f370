//! Core library for the `skycast` CLI.
//!
//! This crate defines:
//! - The weather data model (places, snapshots, unit systems)
//! - Resolving place names and building snapshots from the Open-Meteo services
//! - Pure presentation of snapshots as display-ready rows
//! - Per-session state (active snapshot, unit preference, search generations)
//!
//! It is used by `skycast-cli`, but can also be reused by other binaries or services.

pub mod config;
pub mod error;
pub mod model;
pub mod present;
pub mod source;
pub mod state;

pub use config::Config;
pub use error::WeatherError;
pub use model::{DailyEntry, HourlyEntry, Place, UnitSystem, WeatherSnapshot};
pub use present::{CurrentView, DailyRow, HourlyRow, current_view, daily_view, hourly_view};
pub use source::{OpenMeteoSource, WeatherSource, search};
pub use state::AppState;
