use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf};

use crate::model::UnitSystem;

/// On-disk preferences. The weather services are keyless, so this holds
/// display defaults rather than credentials.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Preferred display units; metric when absent.
    pub units: Option<UnitSystem>,

    /// Place searched when `show` is run without an argument.
    pub default_place: Option<String>,
}

impl Config {
    pub fn units_or_default(&self) -> UnitSystem {
        self.units.unwrap_or_default()
    }

    /// Load config from disk, or return an empty default if it doesn't exist yet.
    pub fn load() -> Result<Self> {
        let path = Self::config_file_path()?;
        if !path.exists() {
            // First run: no config file, return empty.
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let cfg: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(cfg)
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        let path = Self::config_file_path()?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(&path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "skycast", "skycast-cli")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_config_defaults_to_metric() {
        let cfg = Config::default();
        assert_eq!(cfg.units_or_default(), UnitSystem::Metric);
        assert!(cfg.default_place.is_none());
    }

    #[test]
    fn config_round_trips_through_toml() {
        let cfg = Config {
            units: Some(UnitSystem::Imperial),
            default_place: Some("Lisbon".to_string()),
        };

        let serialized = toml::to_string_pretty(&cfg).expect("serialize should succeed");
        let parsed: Config = toml::from_str(&serialized).expect("parse should succeed");

        assert_eq!(parsed.units, Some(UnitSystem::Imperial));
        assert_eq!(parsed.default_place.as_deref(), Some("Lisbon"));
    }

    #[test]
    fn units_parse_from_lowercase_toml() {
        let cfg: Config = toml::from_str(r#"units = "imperial""#).expect("parse should succeed");
        assert_eq!(cfg.units_or_default(), UnitSystem::Imperial);
    }
}
