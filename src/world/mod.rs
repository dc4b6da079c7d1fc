//! Multi-chunk worlds.
//!
//! Chunks are generated independently, then moved into one flattened grid
//! that erosion can treat as a single space.

mod layout;

pub use layout::{flatten_chunks, gather_chunk, scatter_chunk, WorldLayout};

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::WorldConfig;
use crate::erosion::{classify_colors, erode, ErosionConfig, ErosionError, WaterLedger};
use crate::geometry::OffsetCoord;
use crate::terrain::{generate_chunk, CellSnapshot, Chunk, GridStats, HexCell, TerrainError};

/// Errors that can occur while building or eroding a world.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum WorldError {
    #[error("Terrain error: {0}")]
    Terrain(#[from] TerrainError),
    #[error("Erosion error: {0}")]
    Erosion(#[from] ErosionError),
    #[error("Invalid world layout: {0}")]
    InvalidLayout(String),
    #[error("Inconsistent world configuration: {0}")]
    InconsistentConfig(String),
}

/// How a world's grid is handed to the erosion simulator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ErosionMode {
    /// The whole flattened grid erodes at once; water crosses chunk seams.
    #[default]
    Contiguous,
    /// Each chunk erodes on its own, with its border as a hard edge.
    PerChunk,
}

/// A square world of chunks flattened into one grid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct World {
    layout: WorldLayout,
    seed: u64,
    cells: Vec<HexCell>,
}

impl World {
    /// Generates every chunk of the configured layout and flattens them.
    ///
    /// The whole config is validated first, erosion section included.
    pub fn generate(config: &WorldConfig) -> Result<Self, WorldError> {
        config.validate()?;
        let layout = config.layout()?;
        let seed = config.terrain.seed;

        log::info!(
            "generating {}x{} chunks of {} cells (seed {})",
            layout.diag_chunks,
            layout.diag_chunks,
            layout.chunk_size,
            seed
        );

        let chunks = (0..layout.chunk_count())
            .into_par_iter()
            .map(|k| generate_chunk(layout.chunk_position(k), seed, &config.terrain))
            .collect::<Result<Vec<_>, _>>()?;

        Self::from_chunks(layout, seed, chunks)
    }

    /// Flattens already built chunks, `chunks[k]` going to layout cell `k`.
    pub fn from_chunks(
        layout: WorldLayout,
        seed: u64,
        chunks: Vec<Chunk>,
    ) -> Result<Self, WorldError> {
        let cells = flatten_chunks(&layout, chunks)?;
        Ok(Self { layout, seed, cells })
    }

    pub fn layout(&self) -> WorldLayout {
        self.layout
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Stride of the flattened grid.
    pub fn width(&self) -> usize {
        self.layout.width()
    }

    pub fn cells(&self) -> &[HexCell] {
        &self.cells
    }

    pub fn cells_mut(&mut self) -> &mut [HexCell] {
        &mut self.cells
    }

    /// Cell at world offset `c`, if inside the world.
    pub fn cell(&self, c: OffsetCoord) -> Option<&HexCell> {
        self.layout.shape().try_index(c).map(|i| &self.cells[i])
    }

    /// Runs `config.iterations` erosion ticks, then recolors the grid.
    pub fn erode(
        &mut self,
        config: &ErosionConfig,
        mode: ErosionMode,
    ) -> Result<WaterLedger, WorldError> {
        let width = self.width();
        let ledger = match mode {
            ErosionMode::Contiguous => erode(&mut self.cells, width, config.iterations, config)?,
            ErosionMode::PerChunk => {
                let size = self.layout.chunk_size;
                let mut total = WaterLedger::default();
                for k in 0..self.layout.chunk_count() {
                    let mut chunk = gather_chunk(&self.layout, &self.cells, k);
                    let ledger = erode(&mut chunk, size, config.iterations, config)?;
                    scatter_chunk(&self.layout, &mut self.cells, k, chunk);
                    total.rained += ledger.rained;
                    total.evaporated += ledger.evaporated;
                }
                total
            }
        };

        log::info!(
            "eroded world ({:?}, {} ticks): rained {:.3}, evaporated {:.3}",
            mode,
            config.iterations,
            ledger.rained,
            ledger.evaporated
        );
        Ok(ledger)
    }

    /// Recolors every cell without eroding.
    pub fn classify(&mut self, water_level: f64) {
        classify_colors(&mut self.cells, water_level);
    }

    pub fn stats(&self, water_level: f64) -> GridStats {
        GridStats::of(&self.cells, water_level)
    }

    pub fn snapshots(&self) -> Vec<CellSnapshot> {
        self.cells.iter().map(HexCell::snapshot).collect()
    }
}
