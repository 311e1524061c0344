use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf};

use crate::{display::TemperatureUnit, provider::DEFAULT_BASE_URL};

/// Client settings stored on disk.
///
/// Example TOML:
/// base_url = "http://localhost:3000/api"
/// unit = "fahrenheit"
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct Config {
    /// Root of the weather API; the local demo service when unset.
    pub base_url: Option<String>,

    /// Unit selected when a session starts.
    pub unit: Option<TemperatureUnit>,
}

impl Config {
    pub fn base_url(&self) -> &str {
        self.base_url.as_deref().unwrap_or(DEFAULT_BASE_URL)
    }

    pub fn unit(&self) -> TemperatureUnit {
        self.unit.unwrap_or_default()
    }

    /// Store a base URL; blank input resets to the default.
    pub fn set_base_url(&mut self, url: &str) {
        let url = url.trim();
        self.base_url = if url.is_empty() || url == DEFAULT_BASE_URL {
            None
        } else {
            Some(url.to_string())
        };
    }

    pub fn set_unit(&mut self, unit: TemperatureUnit) {
        self.unit = Some(unit);
    }

    /// Load config from disk, or return an empty default if it doesn't exist yet.
    pub fn load() -> Result<Self> {
        let path = Self::config_file_path()?;
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        Self::from_toml(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        let path = Self::config_file_path()?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml = self.to_toml()?;

        fs::write(&path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "weather-demo", "weather-cli")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }

    pub fn from_toml(contents: &str) -> Result<Self> {
        toml::from_str(contents).context("Invalid configuration TOML")
    }

    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_target_local_service_in_celsius() {
        let cfg = Config::default();

        assert_eq!(cfg.base_url(), "http://localhost:3000/api");
        assert_eq!(cfg.unit(), TemperatureUnit::Celsius);
    }

    #[test]
    fn set_base_url_trims_and_resets_on_blank() {
        let mut cfg = Config::default();

        cfg.set_base_url("  http://weather.lan:8080/api ");
        assert_eq!(cfg.base_url(), "http://weather.lan:8080/api");

        cfg.set_base_url("");
        assert_eq!(cfg.base_url, None);
    }

    #[test]
    fn toml_roundtrip_keeps_unit() {
        let mut cfg = Config::default();
        cfg.set_unit(TemperatureUnit::Fahrenheit);
        cfg.set_base_url("http://example.test/api");

        let text = cfg.to_toml().expect("serializes");
        assert!(text.contains("unit = \"fahrenheit\""));

        let parsed = Config::from_toml(&text).expect("parses");
        assert_eq!(parsed, cfg);
    }

    #[test]
    fn empty_file_is_default() {
        let parsed = Config::from_toml("").expect("parses");
        assert_eq!(parsed, Config::default());
    }

    #[test]
    fn unknown_unit_is_rejected() {
        let err = Config::from_toml("unit = \"kelvin\"").unwrap_err();
        assert!(err.to_string().contains("Invalid configuration TOML"));
    }
}
