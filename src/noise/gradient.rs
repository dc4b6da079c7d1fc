//! Per-chunk lattice of unit gradient vectors.
//!
//! Every lattice point owns a gradient that is a pure function of its global
//! coordinate and the world seed. Neighboring chunks build their own tables
//! but agree exactly on the lattice points they share, which is what keeps
//! terrain continuous across chunk borders.

use std::f64::consts::TAU;

use glam::DVec2;

/// Gradient at a global lattice coordinate.
///
/// The key `"x{gx}y{gy}s{seed}"` is hashed with MD5 and the first digest byte
/// picks one of 256 evenly spaced directions.
pub fn lattice_gradient(gx: i64, gy: i64, seed: u64) -> DVec2 {
    let key = format!("x{}y{}s{}", gx, gy, seed);
    let digest = md5::compute(key.as_bytes());
    let angle = f64::from(digest.0[0]) / 256.0 * TAU;
    DVec2::new(angle.cos(), angle.sin())
}

/// Gradients for one octave of one chunk.
#[derive(Debug, Clone, PartialEq)]
struct OctaveTable {
    /// Global lattice coordinate of local index `(0, 0)`.
    origin: (i64, i64),
    /// Table side: `2^octave + 2`.
    side: usize,
    /// Row-major by the x axis: entry `i * side + j` is local `(i, j)`.
    vectors: Vec<DVec2>,
}

impl OctaveTable {
    fn build(chunk_pos: (i32, i32), octave: u32, seed: u64) -> Self {
        let cells = lattice_cells(octave);
        let side = cells as usize + 2;
        let origin = (i64::from(chunk_pos.0) * cells, i64::from(chunk_pos.1) * cells);

        let mut vectors = Vec::with_capacity(side * side);
        for i in 0..side as i64 {
            for j in 0..side as i64 {
                vectors.push(lattice_gradient(origin.0 + i, origin.1 + j, seed));
            }
        }

        Self { origin, side, vectors }
    }

    fn get(&self, i: i64, j: i64) -> Option<DVec2> {
        let side = self.side as i64;
        if (0..side).contains(&i) && (0..side).contains(&j) {
            Some(self.vectors[(i * side + j) as usize])
        } else {
            None
        }
    }
}

/// Highest octave whose lattice coordinates fit in `i64` for any chunk position.
pub const MAX_LATTICE_OCTAVE: u32 = 30;

/// Lattice cells per chunk side at `octave`.
fn lattice_cells(octave: u32) -> i64 {
    assert!(
        octave <= MAX_LATTICE_OCTAVE,
        "octave {} out of range (max {})",
        octave,
        MAX_LATTICE_OCTAVE
    );
    1i64 << octave
}

/// Gradient tables for every octave of one chunk.
///
/// Built fresh for each chunk and passed explicitly to the sampler; nothing
/// is cached between chunks.
#[derive(Debug, Clone, PartialEq)]
pub struct GradientField {
    chunk_pos: (i32, i32),
    seed: u64,
    octaves: Vec<OctaveTable>,
}

impl GradientField {
    /// Builds tables for octaves `0..octave_count` of the chunk at `chunk_pos`.
    ///
    /// Octave `o` covers `(2^o + 2)²` lattice points, enough for every
    /// interpolation corner a sample inside the chunk can touch.
    pub fn build(chunk_pos: (i32, i32), octave_count: u32, seed: u64) -> Self {
        debug_assert!(octave_count <= MAX_LATTICE_OCTAVE + 1, "octave count {} overflows the lattice", octave_count);
        let octaves = (0..octave_count)
            .map(|o| OctaveTable::build(chunk_pos, o, seed))
            .collect();
        Self {
            chunk_pos,
            seed,
            octaves,
        }
    }

    pub fn chunk_pos(&self) -> (i32, i32) {
        self.chunk_pos
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn octave_count(&self) -> u32 {
        self.octaves.len() as u32
    }

    /// Side length of the table for `octave`.
    pub fn table_side(octave: u32) -> usize {
        (1usize << octave) + 2
    }

    /// Gradient at local lattice index `(i, j)` of `octave`.
    ///
    /// Indices outside the precomputed table, or octaves beyond the ones
    /// built, are hashed on demand and give the same vector the neighboring
    /// chunk's table holds.
    ///
    /// # Panics
    /// Panics if `octave` exceeds [`MAX_LATTICE_OCTAVE`].
    pub fn gradient(&self, octave: u32, i: i64, j: i64) -> DVec2 {
        if let Some(v) = self.octaves.get(octave as usize).and_then(|t| t.get(i, j)) {
            return v;
        }
        let cells = lattice_cells(octave);
        lattice_gradient(
            i64::from(self.chunk_pos.0) * cells + i,
            i64::from(self.chunk_pos.1) * cells + j,
            self.seed,
        )
    }

    /// Global lattice coordinate of local index `(0, 0)` for `octave`.
    pub fn origin(&self, octave: u32) -> (i64, i64) {
        match self.octaves.get(octave as usize) {
            Some(t) => t.origin,
            None => {
                let cells = lattice_cells(octave);
                (i64::from(self.chunk_pos.0) * cells, i64::from(self.chunk_pos.1) * cells)
            }
        }
    }
}
