//! Backend configuration loaded from an optional TOML file.

use std::{fs, path::Path, time::Duration};

use serde::Deserialize;
use thiserror::Error;

/// Errors produced while loading a backend configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    /// The configuration file held invalid TOML.
    #[error("failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Tunable presentation parameters for the macroquad backend.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BackendConfig {
    /// Integer scale factor applied to the 128-pixel logical screen.
    pub scale: f32,
    /// Minimum wall-clock duration of one frame in milliseconds. The frame
    /// loop sleeps out the remainder, pacing the game at the cadence of the
    /// small display it imitates.
    pub min_frame_ms: u64,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            scale: 4.0,
            min_frame_ms: 100,
        }
    }
}

impl BackendConfig {
    /// Loads a configuration from the TOML file at `path`.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path)?;
        Ok(toml::from_str(&contents)?)
    }

    /// Minimum frame duration as a [`Duration`].
    #[must_use]
    pub const fn frame_budget(&self) -> Duration {
        Duration::from_millis(self.min_frame_ms)
    }
}
