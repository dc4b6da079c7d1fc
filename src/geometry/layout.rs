//! Planar placement of pointy-top hexagons.
//!
//! Unit hexagons have circumradius 1, so a cell is `√3` wide and `2` tall and
//! rows are spaced `1.5` apart. These are the positions a renderer needs to
//! place one instance per cell.

use glam::DVec2;

use super::hex::{CubeCoord, OffsetCoord};

/// Horizontal distance between adjacent cell centers in a row.
pub const HEX_WIDTH: f64 = 1.732_050_807_568_877_2;
/// Height of a unit hexagon, corner to corner.
pub const HEX_HEIGHT: f64 = 2.0;
/// Vertical distance between row centers.
pub const ROW_SPACING: f64 = 0.75 * HEX_HEIGHT;

/// Center of the hexagon at `offset`. Odd rows are shifted half a cell right.
pub fn hex_center(offset: OffsetCoord) -> DVec2 {
    let stagger = offset.y.rem_euclid(2) as f64;
    DVec2::new(
        HEX_WIDTH * offset.x as f64 + HEX_WIDTH / 2.0 * stagger,
        ROW_SPACING * offset.y as f64,
    )
}

/// Uniform scale that fits one chunk of `chunk_size` cells per row into a
/// span of 2 units.
pub fn chunk_scale(chunk_size: usize) -> f64 {
    2.0 / (chunk_size as f64 * HEX_WIDTH)
}

/// The six corners of a unit hexagon around the origin, counter-clockwise
/// starting at 30°.
pub fn hex_corners() -> [DVec2; 6] {
    use std::f64::consts::PI;
    [
        PI / 6.0,
        PI / 2.0,
        5.0 * PI / 6.0,
        -5.0 * PI / 6.0,
        -PI / 2.0,
        -PI / 6.0,
    ]
    .map(|a| DVec2::new(a.cos(), a.sin()))
}

/// Offset coordinate of the hexagon containing the planar point `p`.
pub fn offset_at_point(p: DVec2) -> OffsetCoord {
    let q = HEX_WIDTH / 3.0 * p.x - p.y / 3.0;
    let r = 2.0 / 3.0 * p.y;
    cube_round(q, r, -q - r).to_offset()
}

/// Rounds fractional cube coordinates to the nearest cell.
fn cube_round(q: f64, r: f64, s: f64) -> CubeCoord {
    let mut rq = q.round();
    let mut rr = r.round();
    let rs = s.round();

    let dq = (rq - q).abs();
    let dr = (rr - r).abs();
    let ds = (rs - s).abs();

    // Recompute the axis with the largest rounding error from the other two.
    if dq > dr && dq > ds {
        rq = -rr - rs;
    } else if dr > ds {
        rr = -rq - rs;
    }
    CubeCoord::from_axial(rq as i32, rr as i32)
}
