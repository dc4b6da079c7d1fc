//! Terrain module.
//!
//! Hex cells, fixed-size chunks and their seeding from gradient noise.

mod cell;
mod chunk;
mod config;
mod heightmap;
mod stats;

pub use cell::{CellSnapshot, HexCell};
pub use chunk::Chunk;
pub use config::{TerrainConfig, TerrainError, MAX_OCTAVES};
pub use heightmap::{build_chunk, generate_chunk, sample_position, seed_chunk};
pub use stats::GridStats;
