//! Procedural hexagonal terrain generator.
//!
//! This crate seeds square chunks of hex cells from deterministic gradient
//! noise, erodes them with a grid-based rain and sediment model, and
//! classifies the result into color buckets. Chunks can be assembled into a
//! larger world that erodes as one contiguous grid.

pub mod biomes;
pub mod config;
pub mod erosion;
pub mod export;
pub mod geometry;
pub mod noise;
pub mod terrain;
pub mod world;

pub use biomes::Biome;
pub use config::{ConfigError, WorldConfig};
pub use erosion::{classify_colors, erode, ErosionConfig, ErosionError, ErosionSimulator};
pub use geometry::{CubeCoord, GridShape, OffsetCoord};
pub use noise::GradientField;
pub use terrain::{generate_chunk, CellSnapshot, Chunk, HexCell, TerrainConfig, TerrainError};
pub use world::{ErosionMode, World, WorldError, WorldLayout};
