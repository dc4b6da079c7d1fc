//! Offset and cube coordinates for a pointy-top hex grid.
//!
//! Offset coordinates `(x, y)` address a cell by column and row, with odd
//! rows (odd `y`) pushed half a cell to the right. Cube coordinates
//! `(q, r, s)` carry one redundant axis so that neighbor and distance math
//! becomes plain vector arithmetic.

use serde::{Deserialize, Serialize};

/// Row/column address of a hex cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct OffsetCoord {
    pub x: i32,
    pub y: i32,
}

impl OffsetCoord {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Converts to cube coordinates.
    pub fn to_cube(self) -> CubeCoord {
        offset_to_cube(self.x, self.y)
    }
}

impl From<(i32, i32)> for OffsetCoord {
    fn from((x, y): (i32, i32)) -> Self {
        Self { x, y }
    }
}

impl From<OffsetCoord> for (i32, i32) {
    fn from(c: OffsetCoord) -> Self {
        (c.x, c.y)
    }
}

/// Three-axis hex address. `q + r + s == 0` for every value built through
/// this module.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct CubeCoord {
    pub q: i32,
    pub r: i32,
    pub s: i32,
}

/// The six unit steps between adjacent hexes, counter-clockwise from east-north-east.
pub const CUBE_DIRECTIONS: [CubeCoord; 6] = [
    CubeCoord { q: 1, r: -1, s: 0 },
    CubeCoord { q: 1, r: 0, s: -1 },
    CubeCoord { q: 0, r: 1, s: -1 },
    CubeCoord { q: -1, r: 1, s: 0 },
    CubeCoord { q: -1, r: 0, s: 1 },
    CubeCoord { q: 0, r: -1, s: 1 },
];

impl CubeCoord {
    /// Builds a cube coordinate from the two independent axes.
    pub const fn from_axial(q: i32, r: i32) -> Self {
        Self { q, r, s: -q - r }
    }

    pub const fn is_valid(self) -> bool {
        self.q + self.r + self.s == 0
    }

    /// Converts back to offset coordinates.
    pub fn to_offset(self) -> OffsetCoord {
        cube_to_offset(self.q, self.r, self.s)
    }

    /// Returns the neighbor one step along `CUBE_DIRECTIONS[direction]`.
    ///
    /// # Panics
    /// Panics if `direction >= 6`.
    pub fn neighbor(self, direction: usize) -> Self {
        let d = CUBE_DIRECTIONS[direction];
        Self {
            q: self.q + d.q,
            r: self.r + d.r,
            s: self.s + d.s,
        }
    }

    /// Hex distance (number of steps) between two cells.
    pub fn distance(self, other: Self) -> i32 {
        ((self.q - other.q).abs() + (self.r - other.r).abs() + (self.s - other.s).abs()) / 2
    }
}

impl From<(i32, i32, i32)> for CubeCoord {
    fn from((q, r, s): (i32, i32, i32)) -> Self {
        Self { q, r, s }
    }
}

impl From<CubeCoord> for (i32, i32, i32) {
    fn from(c: CubeCoord) -> Self {
        (c.q, c.r, c.s)
    }
}

/// Converts an offset coordinate to cube coordinates.
///
/// The row parity uses `rem_euclid`, so rows left of or above the world
/// origin (negative `y`) map correctly.
pub fn offset_to_cube(x: i32, y: i32) -> CubeCoord {
    let m = y.rem_euclid(2);
    let q = x - (y - m) / 2;
    CubeCoord::from_axial(q, y)
}

/// Converts a cube coordinate to offset coordinates. Inverse of [`offset_to_cube`].
///
/// `s` is implied by `q` and `r` and only checked in debug builds.
pub fn cube_to_offset(q: i32, r: i32, s: i32) -> OffsetCoord {
    debug_assert_eq!(q + r + s, 0, "cube coordinate off the q+r+s=0 plane");
    let m = r.rem_euclid(2);
    OffsetCoord {
        x: q + (r - m) / 2,
        y: r,
    }
}

/// The six cube neighbors of `(q, r, s)`, in `CUBE_DIRECTIONS` order.
pub fn neighbors_cube(q: i32, r: i32, s: i32) -> [CubeCoord; 6] {
    let c = CubeCoord { q, r, s };
    std::array::from_fn(|i| c.neighbor(i))
}

/// The six neighbors of an offset coordinate, expressed as offset coordinates.
pub fn neighbors_offset(x: i32, y: i32) -> [OffsetCoord; 6] {
    let c = offset_to_cube(x, y);
    neighbors_cube(c.q, c.r, c.s).map(CubeCoord::to_offset)
}
