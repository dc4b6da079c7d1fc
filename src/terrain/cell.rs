//! Per-cell terrain state.

use serde::{Deserialize, Serialize};

use crate::biomes::{classify, Biome};
use crate::geometry::{CubeCoord, OffsetCoord};

/// One terrain sample on the hex grid.
///
/// The four `*_water` / `*_delta` accumulators are scratch space for a single
/// erosion tick; they are zero whenever a tick is not in progress.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct HexCell {
    /// Offset address, chunk-local or world-global after flattening.
    pub offset: OffsetCoord,
    /// Cube address matching `offset`.
    pub cube: CubeCoord,
    /// Ground elevation; nominally [0, 1], erosion can push it outside.
    pub altitude: f64,
    /// Rainfall potential, fixed at seeding.
    pub precipitation: f64,
    /// Standing water depth.
    pub water: f64,
    /// Suspended sediment mass.
    pub sediment: f64,
    pub incoming_water: f64,
    pub outgoing_water: f64,
    pub altitude_delta: f64,
    pub sediment_delta: f64,
    /// Display color derived from `altitude` and `water`.
    pub color: [f64; 3],
}

/// Read-only view of a cell for geometry building and rendering.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CellSnapshot {
    pub offset: (i32, i32),
    pub altitude: f64,
    pub water: f64,
    pub color: [f64; 3],
}

impl HexCell {
    /// A dry, flat cell at `offset`.
    pub fn new(offset: OffsetCoord) -> Self {
        Self {
            offset,
            cube: offset.to_cube(),
            ..Default::default()
        }
    }

    /// Moves the cell to a new offset address, keeping cube coordinates in sync.
    pub fn readdress(&mut self, offset: OffsetCoord) {
        self.offset = offset;
        self.cube = offset.to_cube();
    }

    /// Height of the water surface: ground plus standing water.
    #[inline]
    pub fn water_level(&self) -> f64 {
        self.water + self.altitude
    }

    /// True when every per-tick accumulator is zero.
    pub fn scratch_is_clear(&self) -> bool {
        self.incoming_water == 0.0
            && self.outgoing_water == 0.0
            && self.altitude_delta == 0.0
            && self.sediment_delta == 0.0
    }

    pub fn clear_scratch(&mut self) {
        self.incoming_water = 0.0;
        self.outgoing_water = 0.0;
        self.altitude_delta = 0.0;
        self.sediment_delta = 0.0;
    }

    pub fn biome(&self, water_level: f64) -> Biome {
        classify(self.altitude, self.water, water_level)
    }

    /// Recomputes `color` from the current altitude and water.
    pub fn classify(&mut self, water_level: f64) {
        self.color = self.biome(water_level).rgb();
    }

    pub fn snapshot(&self) -> CellSnapshot {
        CellSnapshot {
            offset: self.offset.into(),
            altitude: self.altitude,
            water: self.water,
            color: self.color,
        }
    }
}
