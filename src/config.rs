//! World configuration files.
//!
//! A world is described by a JSON document whose sections mirror the library
//! config structs. Every key is optional; missing ones take the defaults.
//!
//! ```json
//! {
//!   "terrain": { "seed": 42, "octave_count": 4 },
//!   "erosion": { "iterations": 200 },
//!   "diag_chunks": 3,
//!   "mode": "contiguous"
//! }
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::erosion::ErosionConfig;
use crate::terrain::TerrainConfig;
use crate::world::{ErosionMode, WorldError, WorldLayout};

/// Errors that can occur while reading a configuration file.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Config parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    pub terrain: TerrainConfig,
    pub erosion: ErosionConfig,
    /// Chunks per side of the square world.
    pub diag_chunks: usize,
    pub mode: ErosionMode,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            terrain: TerrainConfig::default(),
            erosion: ErosionConfig::default(),
            diag_chunks: 1,
            mode: ErosionMode::default(),
        }
    }
}

impl WorldConfig {
    /// Reads a config from a JSON file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Writes the config as pretty JSON.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        fs::write(path, self.to_json()?)?;
        Ok(())
    }

    pub fn layout(&self) -> Result<WorldLayout, WorldError> {
        WorldLayout::new(self.diag_chunks, self.terrain.chunk_size)
    }

    /// Validates every section.
    ///
    /// Seeding and rain share one retention fraction, so `terrain.retention`
    /// and `erosion.retention` must be equal.
    pub fn validate(&self) -> Result<(), WorldError> {
        self.terrain.validate()?;
        self.erosion.validate()?;
        self.layout()?;
        if self.terrain.retention != self.erosion.retention {
            return Err(WorldError::InconsistentConfig(format!(
                "terrain.retention ({}) differs from erosion.retention ({})",
                self.terrain.retention, self.erosion.retention
            )));
        }
        Ok(())
    }

    /// Sets the retention used both for seeding and for rain.
    pub fn set_retention(&mut self, retention: f64) {
        self.terrain.retention = retention;
        self.erosion.retention = retention;
    }
}
