//! Terrain seeding configuration.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Largest accepted octave count. Octave `o` allocates `(2^o + 2)²`
/// gradients per chunk.
pub const MAX_OCTAVES: u32 = 16;

/// Errors raised while building terrain.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TerrainError {
    #[error("Invalid terrain configuration: {0}")]
    InvalidConfiguration(String),
}

/// Parameters for seeding a chunk from noise.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TerrainConfig {
    /// Cells per chunk side; a chunk holds `chunk_size²` cells.
    pub chunk_size: usize,
    /// Number of noise octaves summed into altitude.
    pub octave_count: u32,
    /// Fraction of precipitation that lands as standing water (0-1).
    pub retention: f64,
    /// World seed for the gradient lattice.
    pub seed: u64,
    /// Multiplier applied to summed noise before the bias.
    pub altitude_scale: f64,
    /// Offset added after scaling; centers altitude in the display range.
    pub altitude_bias: f64,
}

impl Default for TerrainConfig {
    fn default() -> Self {
        Self {
            chunk_size: 16,
            octave_count: 3,
            retention: 0.2,
            seed: 0,
            altitude_scale: 1.0,
            altitude_bias: 0.5,
        }
    }
}

impl TerrainConfig {
    /// Creates the default configuration with the given seed.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            seed,
            ..Default::default()
        }
    }

    /// Rougher terrain: more octaves and a wider altitude spread.
    pub fn rugged(seed: u64) -> Self {
        Self {
            octave_count: 5,
            altitude_scale: 1.4,
            seed,
            ..Default::default()
        }
    }

    /// Checks every field, returning the first problem found.
    pub fn validate(&self) -> Result<(), TerrainError> {
        if self.chunk_size == 0 {
            return Err(TerrainError::InvalidConfiguration(
                "chunk_size must be positive".to_string(),
            ));
        }
        if self.octave_count == 0 || self.octave_count > MAX_OCTAVES {
            return Err(TerrainError::InvalidConfiguration(format!(
                "octave_count must be in 1..={}, got {}",
                MAX_OCTAVES, self.octave_count
            )));
        }
        if !(0.0..=1.0).contains(&self.retention) {
            return Err(TerrainError::InvalidConfiguration(format!(
                "retention must be in [0, 1], got {}",
                self.retention
            )));
        }
        if !self.altitude_scale.is_finite() || !self.altitude_bias.is_finite() {
            return Err(TerrainError::InvalidConfiguration(
                "altitude_scale and altitude_bias must be finite".to_string(),
            ));
        }
        Ok(())
    }
}
