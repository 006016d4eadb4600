//! Configuration management for flightplot.
//!
//! This module provides configuration loading and validation using figment,
//! supporting TOML config files, environment variables, and defaults.

use std::path::PathBuf;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "config.toml";

/// Default configuration directory name.
const CONFIG_DIR_NAME: &str = "flightplot";

/// Default flight log file, resolved against the working directory.
const DEFAULT_LOG_FILE: &str = "flight_log.json";

/// Default chart output file, resolved against the working directory.
const DEFAULT_OUTPUT_FILE: &str = "flight_data_plot_python.png";

/// Default smoothing window size.
const DEFAULT_WINDOW: usize = 5;

/// Default canvas edge length in pixels.
const DEFAULT_CANVAS_SIZE: u32 = 1200;

/// Application configuration.
///
/// Configuration is loaded from (in order of precedence, highest first):
/// 1. Environment variables (prefixed with `FLIGHTPLOT_`)
/// 2. TOML config file at `~/.config/flightplot/config.toml`
/// 3. Default values
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Input configuration.
    pub input: InputConfig,
    /// Plot configuration.
    pub plot: PlotConfig,
    /// Viewer hand-off configuration.
    pub viewer: ViewerConfig,
}

/// Input-related configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    /// Path to the flight log file.
    pub path: PathBuf,
}

/// Plot-related configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlotConfig {
    /// Path the rendered PNG is written to. Overwritten if present.
    pub output_path: PathBuf,
    /// Smoothing window size, in records.
    pub window: usize,
    /// Canvas width in pixels.
    pub width: u32,
    /// Canvas height in pixels.
    pub height: u32,
}

/// Viewer hand-off configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    /// Open the rendered chart with the desktop viewer after writing it.
    /// Skipped automatically when not attached to a terminal.
    pub enabled: bool,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from(DEFAULT_LOG_FILE),
        }
    }
}

impl Default for PlotConfig {
    fn default() -> Self {
        Self {
            output_path: PathBuf::from(DEFAULT_OUTPUT_FILE),
            window: DEFAULT_WINDOW,
            width: DEFAULT_CANVAS_SIZE,
            height: DEFAULT_CANVAS_SIZE,
        }
    }
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}

impl Config {
    /// Load configuration from all sources.
    ///
    /// Configuration is loaded in this order (later sources override earlier):
    /// 1. Default values
    /// 2. TOML config file (if exists)
    /// 3. Environment variables (prefixed with `FLIGHTPLOT_`)
    ///
    /// # Errors
    ///
    /// Returns an error if configuration loading or parsing fails.
    pub fn load() -> Result<Self> {
        Self::load_from(None)
    }

    /// Load configuration with an optional custom config path.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration loading or parsing fails.
    pub fn load_from(config_path: Option<PathBuf>) -> Result<Self> {
        let config_file = config_path.unwrap_or_else(Self::default_config_path);

        let figment = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Toml::file(&config_file))
            .merge(Env::prefixed("FLIGHTPLOT_").split("_"));

        let config: Config = figment.extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Get the default configuration file path.
    #[must_use]
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from(".config"))
            .join(CONFIG_DIR_NAME)
            .join(CONFIG_FILE_NAME)
    }

    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid.
    pub fn validate(&self) -> Result<()> {
        if self.plot.window == 0 {
            return Err(Error::ConfigValidation {
                message: "plot.window must be at least 1".to_string(),
            });
        }

        if self.plot.width == 0 || self.plot.height == 0 {
            return Err(Error::ConfigValidation {
                message: format!(
                    "plot canvas must be non-empty, got {}x{}",
                    self.plot.width, self.plot.height
                ),
            });
        }

        Ok(())
    }
}
