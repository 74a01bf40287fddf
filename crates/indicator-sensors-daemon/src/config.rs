//! Configuration management.

#![allow(dead_code)]

use anyhow::{Context, Result};
use indicator_sensors_hw::hwmon::HWMON_ROOT;
use indicator_sensors_hw::TemperatureScale;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Main configuration structure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Sensor poll interval in milliseconds
    #[serde(default = "default_poll")]
    pub poll: u64,

    /// hwmon configuration
    #[serde(default)]
    pub hwmon: HwmonConfig,

    /// Temperature display configuration
    #[serde(default)]
    pub temperature: TemperatureConfig,
}

/// hwmon backend configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HwmonConfig {
    /// hwmon class directory
    #[serde(default = "default_hwmon_root")]
    pub root: PathBuf,
}

impl Default for HwmonConfig {
    fn default() -> Self {
        Self {
            root: default_hwmon_root(),
        }
    }
}

/// Temperature display configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct TemperatureConfig {
    /// celsius, fahrenheit or kelvin
    #[serde(default)]
    pub scale: TemperatureScale,
}

// Default value functions
fn default_poll() -> u64 {
    2000
}

fn default_hwmon_root() -> PathBuf {
    PathBuf::from(HWMON_ROOT)
}

impl Config {
    /// Loads configuration from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content =
            std::fs::read_to_string(path.as_ref()).context("Failed to read configuration file")?;
        let config: Config = toml::from_str(&content).context("Failed to parse configuration")?;
        config.validate()?;
        Ok(config)
    }

    /// Loads configuration from `path` if it exists, defaults otherwise.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        if path.as_ref().exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Saves configuration to a TOML file.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = toml::to_string_pretty(self).context("Failed to serialize configuration")?;
        std::fs::write(path.as_ref(), content).context("Failed to write configuration file")?;
        Ok(())
    }

    fn validate(&self) -> Result<()> {
        anyhow::ensure!(self.poll > 0, "Poll interval must be greater than zero");
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            poll: default_poll(),
            hwmon: HwmonConfig::default(),
            temperature: TemperatureConfig::default(),
        }
    }
}
