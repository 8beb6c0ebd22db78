//! Global prayercal configuration.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use config::{Config, File};
use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_CALCULATION_METHOD, DEFAULT_FETCH_DAYS};
use crate::error::{PrayerCalError, PrayerCalResult};
use crate::settings::{PrayerSettingOverride, PrayerSettings};

static DEFAULT_DATA_PATH: &str = "~/.local/share/prayercal";

fn default_data_dir() -> PathBuf {
    dirs::data_dir()
        .map(|d| d.join("prayercal"))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_PATH))
}

fn default_method() -> String {
    DEFAULT_CALCULATION_METHOD.to_string()
}

fn default_fetch_days() -> i64 {
    DEFAULT_FETCH_DAYS
}

/// Configuration at ~/.config/prayercal/config.toml
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct PrayerCalConfig {
    /// Where schedule, templates, groups and resolved events are stored
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,

    /// Aladhan calculation method id, or "auto" to let the API pick
    #[serde(default = "default_method")]
    pub method: String,

    /// Days fetched when `fetch` is run without an explicit range
    #[serde(default = "default_fetch_days")]
    pub fetch_days: i64,

    /// Per-prayer overrides, keyed by prayer name
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub prayers: HashMap<String, PrayerSettingOverride>,
}

impl Default for PrayerCalConfig {
    fn default() -> Self {
        PrayerCalConfig {
            data_dir: default_data_dir(),
            latitude: None,
            longitude: None,
            method: default_method(),
            fetch_days: default_fetch_days(),
            prayers: HashMap::new(),
        }
    }
}

impl PrayerCalConfig {
    pub fn config_path() -> PrayerCalResult<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| PrayerCalError::Config("Could not determine config directory".into()))?
            .join("prayercal");

        Ok(config_dir.join("config.toml"))
    }

    /// Load the global config, creating a commented default file on first use.
    pub fn load() -> PrayerCalResult<Self> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            Self::create_default_config(&config_path)?;
        }

        Self::load_from(&config_path)
    }

    pub fn load_from(path: &Path) -> PrayerCalResult<Self> {
        let config: PrayerCalConfig = Config::builder()
            .add_source(File::from(path.to_path_buf()).required(false))
            .build()
            .map_err(|e| PrayerCalError::Config(e.to_string()))?
            .try_deserialize()
            .map_err(|e| PrayerCalError::Config(e.to_string()))?;

        if config.fetch_days <= 0 {
            return Err(PrayerCalError::Config(format!(
                "fetch_days must be positive, got {}",
                config.fetch_days
            )));
        }

        Ok(config)
    }

    /// Data directory with `~` expanded.
    pub fn data_path(&self) -> PathBuf {
        let full_path_str = shellexpand::tilde(&self.data_dir.to_string_lossy()).into_owned();
        PathBuf::from(full_path_str)
    }

    pub fn prayer_settings(&self) -> PrayerSettings {
        PrayerSettings::with_overrides(&self.prayers)
    }

    /// Latitude and longitude, if both are configured.
    pub fn coordinates(&self) -> Option<(f64, f64)> {
        Some((self.latitude?, self.longitude?))
    }

    /// Write the config back to `path`.
    pub fn save_to(&self, path: &Path) -> PrayerCalResult<()> {
        let content =
            toml::to_string_pretty(self).map_err(|e| PrayerCalError::Config(e.to_string()))?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, content)
            .map_err(|e| PrayerCalError::Config(format!("Could not write config file: {e}")))?;

        Ok(())
    }

    /// Create a default config file with all options commented out.
    pub fn create_default_config(path: &Path) -> PrayerCalResult<()> {
        let contents = format!(
            "\
# prayercal configuration

# Where prayer data, templates and groups are stored:
# data_dir = \"{}\"

# Location used by `prayercal fetch`:
# latitude = 36.75
# longitude = 3.06

# Aladhan calculation method id (e.g. 2 = ISNA, 3 = Muslim World League), or \"auto\":
# method = \"{}\"

# Days fetched when no range is given:
# fetch_days = {}

# Per-prayer display settings:
# [prayers.Fajr]
# duration = 30
# color = \"#4A6FA5\"
# enabled = true
",
            DEFAULT_DATA_PATH, DEFAULT_CALCULATION_METHOD, DEFAULT_FETCH_DAYS
        );

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                PrayerCalError::Config(format!("Could not create config directory: {e}"))
            })?;
        }

        std::fs::write(path, contents)
            .map_err(|e| PrayerCalError::Config(format!("Could not write config file: {e}")))?;

        Ok(())
    }
}
