//! Hex grid geometry.
//!
//! Offset/cube coordinate conversions, bounded neighbor lookup on flat grids
//! and planar hexagon placement.

mod hex;
mod layout;
pub mod neighbors;

pub use hex::{
    cube_to_offset, neighbors_cube, neighbors_offset, offset_to_cube, CubeCoord, OffsetCoord,
    CUBE_DIRECTIONS,
};
pub use layout::{chunk_scale, hex_center, hex_corners, offset_at_point, HEX_HEIGHT, HEX_WIDTH, ROW_SPACING};
pub use neighbors::{GridShape, Neighbors};
