//! Hydraulic erosion.
//!
//! Rain, downhill flow with sediment transport, and evaporation on a flat
//! hex grid. Works on a single chunk or on a flattened world alike.

mod config;
mod hydraulic;

pub use config::{ErosionConfig, ErosionError, DEFAULT_WATER_LEVEL};
pub use hydraulic::{classify_colors, erode, ErosionSimulator, WaterLedger};
