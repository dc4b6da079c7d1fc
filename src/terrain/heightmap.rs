//! Chunk seeding from multi-octave gradient noise.

use rayon::prelude::*;

use super::cell::HexCell;
use super::chunk::Chunk;
use super::config::{TerrainConfig, TerrainError};
use crate::noise::{sample, sample_octaves, GradientField};

/// Builds and seeds the chunk at noise-lattice position `chunk_pos`.
///
/// Cells get chunk-local offsets; the world layout re-addresses them later.
/// The configuration is validated before anything is allocated.
pub fn generate_chunk(
    chunk_pos: (i32, i32),
    seed: u64,
    config: &TerrainConfig,
) -> Result<Chunk, TerrainError> {
    config.validate()?;

    let field = GradientField::build(chunk_pos, config.octave_count, seed);
    let mut chunk = Chunk::new(chunk_pos, config.chunk_size);
    seed_chunk(&mut chunk, &field, config);

    log::debug!(
        "seeded chunk {:?}: {} cells, {} octaves, seed {}",
        chunk_pos,
        chunk.len(),
        config.octave_count,
        seed
    );
    Ok(chunk)
}

/// [`generate_chunk`] with the seed taken from `config`.
pub fn build_chunk(chunk_pos: (i32, i32), config: &TerrainConfig) -> Result<Chunk, TerrainError> {
    generate_chunk(chunk_pos, config.seed, config)
}

/// Noise sample position of local cell `(i, j)` in a chunk of `size` cells.
///
/// Odd `i` is pushed a further half cell along x; y is offset a third of a
/// cell. The stagger keys on `i` (offset `x`), whereas [`hex_center`] and the
/// color preview stagger on the parity of `y`. Every generated world depends
/// on this placement, so neither side should change alone.
///
/// [`hex_center`]: crate::geometry::hex_center
pub fn sample_position(i: usize, j: usize, size: usize) -> (f64, f64) {
    let cell = 1.0 / size as f64;
    let x0 = if i % 2 == 0 {
        cell * i as f64 + cell / 2.0
    } else {
        cell * i as f64 + cell
    };
    let y0 = cell * j as f64 + cell / 3.0;
    (x0, y0)
}

/// Seeds altitude, precipitation and initial water for every cell.
///
/// Overwrites any previous state and leaves sediment and scratch at zero.
/// Colors are left alone until the grid is classified.
pub fn seed_chunk(chunk: &mut Chunk, field: &GradientField, config: &TerrainConfig) {
    let size = chunk.size;
    chunk.cells.par_iter_mut().enumerate().for_each(|(index, cell)| {
        let (x0, y0) = sample_position(index / size, index % size, size);
        seed_cell(cell, field, x0, y0, config);
    });
}

fn seed_cell(cell: &mut HexCell, field: &GradientField, x0: f64, y0: f64, config: &TerrainConfig) {
    let noise = sample_octaves(field, x0, y0);
    cell.altitude = noise * config.altitude_scale + config.altitude_bias;
    cell.precipitation = (sample(field, x0, y0, 0) + 0.5).max(0.0);
    cell.water = cell.precipitation * config.retention;
    cell.sediment = 0.0;
    cell.clear_scratch();
}
