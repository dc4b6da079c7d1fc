//! Bounded neighbor lookup on a flat hex grid.
//!
//! Cells are stored in a single slice with stride `width`: the cell at
//! offset `(x, y)` lives at index `x * width + y`. This is the layout shared
//! by a single chunk and by the flattened world grid, so erosion can run on
//! either without knowing which one it has.

use super::hex::{neighbors_offset, OffsetCoord};

/// Dimensions of a flat hex grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridShape {
    /// `x` extent (`len / width`). Each `x` is one contiguous run of storage,
    /// which is a hex column, not a hex row.
    pub rows: usize,
    /// `y` extent, and the storage stride.
    pub width: usize,
}

/// Up to six in-bounds neighbor indices of one cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Neighbors {
    indices: [usize; 6],
    len: usize,
}

impl Neighbors {
    pub fn as_slice(&self) -> &[usize] {
        &self.indices[..self.len]
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

impl GridShape {
    pub const fn new(rows: usize, width: usize) -> Self {
        Self { rows, width }
    }

    /// Square grid of `side × side` cells.
    pub const fn square(side: usize) -> Self {
        Self::new(side, side)
    }

    pub const fn len(&self) -> usize {
        self.rows * self.width
    }

    pub const fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Offset coordinate of the cell stored at `index`.
    pub fn offset_of(&self, index: usize) -> OffsetCoord {
        debug_assert!(index < self.len());
        OffsetCoord::new((index / self.width) as i32, (index % self.width) as i32)
    }

    pub fn contains(&self, c: OffsetCoord) -> bool {
        c.x >= 0 && c.y >= 0 && (c.x as usize) < self.rows && (c.y as usize) < self.width
    }

    /// Index of an offset coordinate, or `None` if it lies outside the grid.
    pub fn try_index(&self, c: OffsetCoord) -> Option<usize> {
        self.contains(c)
            .then(|| c.x as usize * self.width + c.y as usize)
    }

    /// Index of an offset coordinate that is known to be inside the grid.
    ///
    /// # Panics
    /// Panics with a coordinate-out-of-range message otherwise; reaching that
    /// means a coordinate conversion produced an impossible cell.
    pub fn index(&self, c: OffsetCoord) -> usize {
        match self.try_index(c) {
            Some(i) => i,
            None => panic!(
                "coordinate out of range: {:?} not in {}x{} grid",
                c, self.rows, self.width
            ),
        }
    }

    /// In-bounds hex neighbors of the cell at `index`, in cube-direction order.
    pub fn neighbors(&self, index: usize) -> Neighbors {
        let c = self.offset_of(index);
        let mut out = Neighbors {
            indices: [0; 6],
            len: 0,
        };
        for n in neighbors_offset(c.x, c.y) {
            if let Some(i) = self.try_index(n) {
                out.indices[out.len] = i;
                out.len += 1;
            }
        }
        out
    }
}
