//! Erosion configuration.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Water depth at which a cell is drawn as shallow water; twice this is deep.
pub const DEFAULT_WATER_LEVEL: f64 = 1.0;

/// Errors raised before an erosion run starts.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ErosionError {
    #[error("Invalid erosion configuration: {0}")]
    InvalidConfiguration(String),
    #[error("Grid of {len} cells cannot be laid out with width {width}")]
    GridShape { len: usize, width: usize },
}

/// Parameters for grid-based hydraulic erosion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ErosionConfig {
    /// Number of ticks per erosion run.
    pub iterations: u32,
    /// Rain falls on every tick whose index is a multiple of this.
    pub rain_cycle: u32,
    /// Fraction of a cell's precipitation added as water per rain (0-1).
    pub retention: f64,
    /// Sediment a unit of flowing water can carry.
    pub carrying_capacity: f64,
    /// Fraction of excess or stranded sediment that settles per tick (0-1).
    pub deposition_rate: f64,
    /// How readily flowing water picks up ground.
    pub soil_softness: f64,
    /// Fraction of standing water lost per tick (0-1).
    pub evaporation: f64,
    /// Depth threshold for the water color buckets.
    pub water_level: f64,
}

impl Default for ErosionConfig {
    fn default() -> Self {
        Self {
            iterations: 150,
            rain_cycle: 15,
            retention: 0.2,
            carrying_capacity: 0.1,
            deposition_rate: 0.1,
            soil_softness: 0.3,
            evaporation: 0.1,
            water_level: DEFAULT_WATER_LEVEL,
        }
    }
}

impl ErosionConfig {
    /// Light weathering: fewer ticks, harder soil.
    pub fn gentle() -> Self {
        Self {
            iterations: 60,
            soil_softness: 0.1,
            ..Default::default()
        }
    }

    /// Heavy rain on soft soil; carves deeper channels.
    pub fn aggressive() -> Self {
        Self {
            iterations: 300,
            rain_cycle: 5,
            soil_softness: 0.5,
            carrying_capacity: 0.2,
            evaporation: 0.05,
            ..Default::default()
        }
    }

    /// Checks every field, returning the first problem found.
    pub fn validate(&self) -> Result<(), ErosionError> {
        if self.rain_cycle == 0 {
            return Err(ErosionError::InvalidConfiguration(
                "rain_cycle must be positive".to_string(),
            ));
        }
        let unit = [
            ("retention", self.retention),
            ("evaporation", self.evaporation),
            ("deposition_rate", self.deposition_rate),
        ];
        for (name, value) in unit {
            if !(0.0..=1.0).contains(&value) {
                return Err(ErosionError::InvalidConfiguration(format!(
                    "{} must be in [0, 1], got {}",
                    name, value
                )));
            }
        }
        let non_negative = [
            ("carrying_capacity", self.carrying_capacity),
            ("soil_softness", self.soil_softness),
            ("water_level", self.water_level),
        ];
        for (name, value) in non_negative {
            if !value.is_finite() || value < 0.0 {
                return Err(ErosionError::InvalidConfiguration(format!(
                    "{} must be finite and non-negative, got {}",
                    name, value
                )));
            }
        }
        Ok(())
    }
}
