//! Fixed-size square chunk of hex cells.

use serde::{Deserialize, Serialize};

use super::cell::{CellSnapshot, HexCell};
use crate::geometry::{GridShape, OffsetCoord};

/// `size × size` cells in row-major offset order: local offset `(x, y)` is
/// stored at index `x * size + y`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chunk {
    /// Chunk position on the noise lattice.
    pub position: (i32, i32),
    /// Cells per side.
    pub size: usize,
    pub cells: Vec<HexCell>,
}

impl Chunk {
    /// Allocates a dry, flat chunk with chunk-local offsets.
    pub fn new(position: (i32, i32), size: usize) -> Self {
        let shape = GridShape::square(size);
        let cells = (0..shape.len())
            .map(|i| HexCell::new(shape.offset_of(i)))
            .collect();
        Self {
            position,
            size,
            cells,
        }
    }

    pub fn shape(&self) -> GridShape {
        GridShape::square(self.size)
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Cell at chunk-local offset `(x, y)`, if inside the chunk.
    pub fn cell(&self, x: i32, y: i32) -> Option<&HexCell> {
        self.shape()
            .try_index(OffsetCoord::new(x, y))
            .map(|i| &self.cells[i])
    }

    pub fn cell_mut(&mut self, x: i32, y: i32) -> Option<&mut HexCell> {
        self.shape()
            .try_index(OffsetCoord::new(x, y))
            .map(move |i| &mut self.cells[i])
    }

    pub fn snapshots(&self) -> Vec<CellSnapshot> {
        self.cells.iter().map(HexCell::snapshot).collect()
    }

    /// Hands the cells over to a layout that will re-address them.
    pub fn into_cells(self) -> Vec<HexCell> {
        self.cells
    }
}
