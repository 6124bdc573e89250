//! # Configuration Management
//!
//! This module handles loading and parsing configuration from the seven-seg.toml file.
//! It provides a centralized way to configure the digit's shape parameters, the style markers
//! handed to the controller, the demo animation timings and the terminal preview.
//!
//! Every section and field is optional in the file; anything missing takes the default
//! shown in [`Config::default`].

use crate::controller::{StyleMarkers, DEFAULT_OFF_MARKER, DEFAULT_ON_MARKER};
use crate::geometry::SegmentShapeParams;
use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::Path;
use thiserror::Error;

/// Default configuration file name, looked up in the working directory.
pub const CONFIG_FILE: &str = "seven-seg.toml";

/// Errors that can occur while reading or writing the configuration file.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// File could not be read or written
    #[error("config IO: {0}")]
    Io(#[from] io::Error),

    /// File contents are not a valid configuration
    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),

    /// Configuration could not be serialised
    #[error("config serialisation failed: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// Application configuration loaded from seven-seg.toml
#[derive(Clone, Debug, PartialEq, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    /// Geometry of the generated digit
    pub shape: SegmentShapeParams,
    /// Class names applied to lit and dark segments
    pub style: StyleConfig,
    /// Demo animation timings
    pub demo: DemoConfig,
    /// Terminal preview settings
    pub ascii: AsciiConfig,
}

/// On/off marker names
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct StyleConfig {
    pub on_class: String,
    pub off_class: String,
}

/// Timings of the demo animation, all in milliseconds
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct DemoConfig {
    /// Delay between digits while counting
    pub count_delay_ms: u64,
    /// Delay between random frames
    pub random_delay_ms: u64,
    /// How long the random segment phase runs
    pub random_segments_ms: u64,
    /// How long the random digit phase runs
    pub random_digits_ms: u64,
}

/// Terminal preview settings
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct AsciiConfig {
    /// Pixels per viewbox unit
    pub scale: f64,
}

impl Default for StyleConfig {
    fn default() -> Self {
        StyleConfig {
            on_class: DEFAULT_ON_MARKER.to_string(),
            off_class: DEFAULT_OFF_MARKER.to_string(),
        }
    }
}

impl Default for DemoConfig {
    fn default() -> Self {
        DemoConfig {
            count_delay_ms: 300,
            random_delay_ms: 100,
            random_segments_ms: 4000,
            random_digits_ms: 2000,
        }
    }
}

impl Default for AsciiConfig {
    fn default() -> Self {
        AsciiConfig { scale: 2.0 }
    }
}

impl StyleConfig {
    pub fn markers(&self) -> StyleMarkers {
        StyleMarkers {
            on: self.on_class.clone(),
            off: self.off_class.clone(),
        }
    }
}

impl Config {
    /// Load configuration from specified path
    /// Falls back to default configuration if file doesn't exist or is invalid
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref();
        match Self::try_load_from_path(path) {
            Ok(config) => {
                info!("Loaded configuration from {}", path.display());
                config
            }
            Err(ConfigError::Io(e)) if e.kind() == io::ErrorKind::NotFound => {
                info!("No config file at {}, using defaults", path.display());
                Self::default()
            }
            Err(e) => {
                warn!("Ignoring config file {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Load configuration from specified path, reporting any failure
    pub fn try_load_from_path<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path)?;
        Ok(toml::from_str(&contents)?)
    }

    /// Save current configuration to specified path
    pub fn save_to_path<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let contents = toml::to_string_pretty(self)?;
        fs::write(&path, contents)?;
        info!("Configuration saved to {}", path.as_ref().display());
        Ok(())
    }
}
