use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf, time::Duration};
use tracing::info;

use crate::{
    provider::aviationweather::{DEFAULT_BASE_URL, DEFAULT_TIMEOUT},
    station::StationCode,
};

/// Top-level configuration stored on disk.
///
/// Example TOML:
/// ```toml
/// default_stations = ["KJFK", "EGLL"]
/// color = false
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Config {
    /// Stations shown when the command line names none.
    #[serde(default)]
    pub default_stations: Vec<String>,

    /// Override for the aviationweather.gov base URL.
    pub api_base_url: Option<String>,

    /// Request timeout in seconds.
    pub timeout_secs: Option<u64>,

    /// Colored output; on unless set to false.
    pub color: Option<bool>,
}

impl Config {
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

    pub fn from_toml(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents)?)
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

        info!(path = %path.display(), "configuration saved");
        Ok(())
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "metar", "metar-cli")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }

    /// Validate and store the default station list, normalized to uppercase.
    pub fn set_default_stations<S: AsRef<str>>(&mut self, codes: &[S]) -> Result<()> {
        let stations = StationCode::parse_all(codes)?;
        self.default_stations = stations.iter().map(ToString::to_string).collect();
        Ok(())
    }

    pub fn base_url(&self) -> &str {
        self.api_base_url.as_deref().unwrap_or(DEFAULT_BASE_URL)
    }

    pub fn timeout(&self) -> Duration {
        self.timeout_secs.map_or(DEFAULT_TIMEOUT, Duration::from_secs)
    }

    pub fn color_enabled(&self) -> bool {
        self.color.unwrap_or(true)
    }
}
