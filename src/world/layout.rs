//! Arrangement of chunks on a square world grid.

use serde::{Deserialize, Serialize};

use super::WorldError;
use crate::geometry::{GridShape, OffsetCoord};
use crate::terrain::{Chunk, HexCell};

/// A `diag_chunks × diag_chunks` square of chunks, each `chunk_size` cells a side.
///
/// Chunk `k` sits at layout row `k / diag_chunks`, column `k % diag_chunks`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorldLayout {
    pub diag_chunks: usize,
    pub chunk_size: usize,
}

impl WorldLayout {
    pub fn new(diag_chunks: usize, chunk_size: usize) -> Result<Self, WorldError> {
        if diag_chunks == 0 || chunk_size == 0 {
            return Err(WorldError::InvalidLayout(format!(
                "{} chunks per side of {} cells",
                diag_chunks, chunk_size
            )));
        }
        Ok(Self {
            diag_chunks,
            chunk_size,
        })
    }

    pub fn chunk_count(&self) -> usize {
        self.diag_chunks * self.diag_chunks
    }

    /// Cells per side of the whole world; the stride of the flattened grid.
    pub fn width(&self) -> usize {
        self.diag_chunks * self.chunk_size
    }

    pub fn cell_count(&self) -> usize {
        self.width() * self.width()
    }

    pub fn shape(&self) -> GridShape {
        GridShape::square(self.width())
    }

    /// Layout `(row, col)` of chunk `k`.
    pub fn chunk_cell(&self, k: usize) -> (usize, usize) {
        (k / self.diag_chunks, k % self.diag_chunks)
    }

    /// Noise-lattice position of chunk `k`, centered on the origin.
    pub fn chunk_position(&self, k: usize) -> (i32, i32) {
        let (row, col) = self.chunk_cell(k);
        let half = (self.diag_chunks / 2) as i32;
        (row as i32 - half, col as i32 - half)
    }

    /// Flattened index of local cell `j` of chunk `k`.
    pub fn flat_index(&self, k: usize, j: usize) -> usize {
        let (row, col) = self.chunk_cell(k);
        let size = self.chunk_size;
        row * size * size * self.diag_chunks
            + col * size
            + (j / size) * size * self.diag_chunks
            + j % size
    }

    /// World offset of local cell `j` of chunk `k`.
    pub fn global_offset(&self, k: usize, j: usize) -> OffsetCoord {
        let (row, col) = self.chunk_cell(k);
        let size = self.chunk_size;
        OffsetCoord::new(
            (row * size + j / size) as i32,
            (col * size + j % size) as i32,
        )
    }
}

/// Moves every chunk's cells into one world grid of stride `layout.width()`.
///
/// `chunks[k]` is placed at [`WorldLayout::chunk_cell`]`(k)` and each cell is
/// re-addressed to its world offset.
pub fn flatten_chunks(layout: &WorldLayout, chunks: Vec<Chunk>) -> Result<Vec<HexCell>, WorldError> {
    if chunks.len() != layout.chunk_count() {
        return Err(WorldError::InvalidLayout(format!(
            "expected {} chunks, got {}",
            layout.chunk_count(),
            chunks.len()
        )));
    }

    let mut slots: Vec<Option<HexCell>> = vec![None; layout.cell_count()];
    for (k, chunk) in chunks.into_iter().enumerate() {
        if chunk.size != layout.chunk_size {
            return Err(WorldError::InvalidLayout(format!(
                "chunk {} has size {}, layout expects {}",
                k, chunk.size, layout.chunk_size
            )));
        }
        for (j, mut cell) in chunk.into_cells().into_iter().enumerate() {
            cell.readdress(layout.global_offset(k, j));
            slots[layout.flat_index(k, j)] = Some(cell);
        }
    }

    // Every slot is written exactly once since `flat_index` is a bijection.
    Ok(slots.into_iter().flatten().collect())
}

/// Copies chunk `k` back out of a flattened grid, keeping world offsets.
pub fn gather_chunk(layout: &WorldLayout, cells: &[HexCell], k: usize) -> Vec<HexCell> {
    let n = layout.chunk_size * layout.chunk_size;
    (0..n).map(|j| cells[layout.flat_index(k, j)].clone()).collect()
}

/// Writes chunk `k`'s cells back into a flattened grid.
pub fn scatter_chunk(layout: &WorldLayout, cells: &mut [HexCell], k: usize, chunk: Vec<HexCell>) {
    for (j, cell) in chunk.into_iter().enumerate() {
        cells[layout.flat_index(k, j)] = cell;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_flat_index_is_bijection() {
        let layout = WorldLayout::new(3, 4).unwrap();
        let mut seen = HashSet::new();
        for k in 0..layout.chunk_count() {
            for j in 0..16 {
                let i = layout.flat_index(k, j);
                assert!(i < layout.cell_count());
                assert!(seen.insert(i));
            }
        }
        assert_eq!(seen.len(), layout.cell_count());
    }

    #[test]
    fn test_flat_index_matches_global_offset() {
        let layout = WorldLayout::new(4, 5).unwrap();
        let shape = layout.shape();
        for k in 0..layout.chunk_count() {
            for j in 0..25 {
                assert_eq!(shape.index(layout.global_offset(k, j)), layout.flat_index(k, j));
            }
        }
    }

    #[test]
    fn test_flat_index_formula() {
        // 2x2 chunks of 2x2 cells: chunk 1 is top-right, chunk 2 bottom-left.
        let layout = WorldLayout::new(2, 2).unwrap();
        assert_eq!(layout.flat_index(0, 0), 0);
        assert_eq!(layout.flat_index(0, 3), 5);
        assert_eq!(layout.flat_index(1, 0), 2);
        assert_eq!(layout.flat_index(1, 2), 6);
        assert_eq!(layout.flat_index(2, 0), 8);
        assert_eq!(layout.flat_index(3, 3), 15);
    }

    #[test]
    fn test_chunk_positions_are_centered() {
        let layout = WorldLayout::new(3, 8).unwrap();
        assert_eq!(layout.chunk_position(0), (-1, -1));
        assert_eq!(layout.chunk_position(4), (0, 0));
        assert_eq!(layout.chunk_position(8), (1, 1));
        assert_eq!(WorldLayout::new(1, 8).unwrap().chunk_position(0), (0, 0));
    }

    #[test]
    fn test_flatten_readdresses_cells() {
        let layout = WorldLayout::new(2, 3).unwrap();
        let chunks = (0..4)
            .map(|k| Chunk::new(layout.chunk_position(k), 3))
            .collect();
        let cells = flatten_chunks(&layout, chunks).unwrap();
        let shape = layout.shape();
        assert_eq!(cells.len(), 36);
        for (i, c) in cells.iter().enumerate() {
            assert_eq!(c.offset, shape.offset_of(i));
            assert_eq!(c.cube, c.offset.to_cube());
        }
    }

    #[test]
    fn test_gather_scatter() {
        let layout = WorldLayout::new(2, 2).unwrap();
        let chunks = (0..4).map(|k| Chunk::new(layout.chunk_position(k), 2)).collect();
        let mut cells = flatten_chunks(&layout, chunks).unwrap();

        let mut chunk = gather_chunk(&layout, &cells, 3);
        assert_eq!(chunk[0].offset, OffsetCoord::new(2, 2));
        for c in &mut chunk {
            c.water = 1.0;
        }
        scatter_chunk(&layout, &mut cells, 3, chunk);
        let wet: Vec<usize> = (0..16).filter(|&i| cells[i].water == 1.0).collect();
        assert_eq!(wet, vec![10, 11, 14, 15]);
    }

    #[test]
    fn test_flatten_rejects_mismatch() {
        let layout = WorldLayout::new(2, 3).unwrap();
        assert!(flatten_chunks(&layout, vec![Chunk::new((0, 0), 3)]).is_err());
        let wrong_size = (0..4).map(|_| Chunk::new((0, 0), 2)).collect();
        assert!(flatten_chunks(&layout, wrong_size).is_err());
        assert!(WorldLayout::new(0, 3).is_err());
    }
}
