//! Deterministic gradient noise for terrain seeding.
//!
//! Gradient tables are built per chunk from a hash of global lattice
//! coordinates, then sampled with quintic interpolation.

mod fractal;
mod gradient;
mod perlin;

pub use fractal::sample_octaves;
pub use gradient::{lattice_gradient, GradientField, MAX_LATTICE_OCTAVE};
pub use perlin::{fade, sample};
