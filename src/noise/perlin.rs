//! Single-octave gradient noise evaluation.

use std::f64::consts::FRAC_1_SQRT_2;

use glam::DVec2;

use super::gradient::GradientField;

/// Quintic smoothstep `6t^5 - 15t^4 + 10t^3`.
#[inline]
pub fn fade(t: f64) -> f64 {
    t * t * t * (t * (t * 6.0 - 15.0) + 10.0)
}

#[inline]
fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

/// Samples octave `octave` of `field` at lattice-space position `(x, y)`.
///
/// The four surrounding lattice corners contribute the dot product of their
/// gradient with the offset from the corner to the sample point; the corner
/// values are blended with [`fade`] along each axis. The raw extreme of
/// two-dimensional gradient noise is `√2/2`, so the result is scaled by
/// `1/√2` and lies in `[-0.5, 0.5]`.
///
/// Positions are chunk-local: `x, y` in `[0, 2^octave]` stay inside the
/// precomputed table. Anything else is still valid and falls back to hashing.
///
/// # Panics
/// Panics if `octave` exceeds [`MAX_LATTICE_OCTAVE`](super::MAX_LATTICE_OCTAVE).
pub fn sample(field: &GradientField, x: f64, y: f64, octave: u32) -> f64 {
    let fx = x.floor();
    let fy = y.floor();
    let x0 = fx as i64;
    let y0 = fy as i64;
    let dx = x - fx;
    let dy = y - fy;

    let corner = |i: i64, j: i64, offset: DVec2| field.gradient(octave, i, j).dot(offset);

    let n00 = corner(x0, y0, DVec2::new(dx, dy));
    let n10 = corner(x0 + 1, y0, DVec2::new(dx - 1.0, dy));
    let n01 = corner(x0, y0 + 1, DVec2::new(dx, dy - 1.0));
    let n11 = corner(x0 + 1, y0 + 1, DVec2::new(dx - 1.0, dy - 1.0));

    let u = fade(dx);
    let v = fade(dy);
    let bottom = lerp(n00, n10, u);
    let top = lerp(n01, n11, u);

    lerp(bottom, top, v) * FRAC_1_SQRT_2
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{Rng, SeedableRng};
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_fade_endpoints() {
        assert_eq!(fade(0.0), 0.0);
        assert_eq!(fade(1.0), 1.0);
        assert!((fade(0.5) - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_zero_at_lattice_points() {
        let field = GradientField::build((0, 0), 3, 17);
        for o in 0..3 {
            let cells = 1 << o;
            for i in 0..=cells {
                for j in 0..=cells {
                    let v = sample(&field, i as f64, j as f64, o);
                    assert!(v.abs() < 1e-12, "octave {} ({}, {}) = {}", o, i, j, v);
                }
            }
        }
    }

    #[test]
    fn test_noise_range() {
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        for seed in 0..8u64 {
            let field = GradientField::build((rng.gen_range(-20..20), rng.gen_range(-20..20)), 4, seed);
            for _ in 0..2000 {
                let o = rng.gen_range(0..4u32);
                let extent = (1u32 << o) as f64;
                let x = rng.gen_range(0.0..=extent);
                let y = rng.gen_range(0.0..=extent);
                let v = sample(&field, x, y, o);
                assert!(
                    (-0.5 - 1e-9..=0.5 + 1e-9).contains(&v),
                    "noise {} at ({}, {}) octave {} out of range",
                    v,
                    x,
                    y,
                    o
                );
            }
        }
    }

    #[test]
    fn test_noise_reproducibility() {
        let a = GradientField::build((5, 5), 3, 12345);
        let b = GradientField::build((5, 5), 3, 12345);
        for k in 0..50 {
            let x = k as f64 * 0.037;
            let y = k as f64 * 0.051;
            assert_eq!(sample(&a, x, y, 2), sample(&b, x, y, 2));
        }
    }

    #[test]
    fn test_seamless_across_chunk_border() {
        let seed = 77;
        let left = GradientField::build((0, 0), 3, seed);
        let right = GradientField::build((1, 0), 3, seed);
        for o in 0..3 {
            let cells = (1u32 << o) as f64;
            for k in 0..16 {
                let y = k as f64 / 16.0 * cells;
                // Points just past the left chunk's far edge are the right
                // chunk's first column.
                assert_eq!(
                    sample(&left, cells + 0.25, y, o),
                    sample(&right, 0.25, y, o)
                );
                assert_eq!(sample(&left, cells, y, o), sample(&right, 0.0, y, o));
            }
        }
    }

    #[test]
    fn test_noise_is_continuous() {
        let field = GradientField::build((0, 0), 2, 3);
        let mut prev = sample(&field, 0.0, 0.3, 1);
        for k in 1..=400 {
            let x = k as f64 * 0.005;
            let v = sample(&field, x, 0.3, 1);
            assert!((v - prev).abs() < 0.02, "jump at x={}: {} -> {}", x, prev, v);
            prev = v;
        }
    }

    #[test]
    fn test_highest_octave_samples_by_hash() {
        let field = GradientField::build((-3, 4), 2, 8);
        let v = sample(&field, 0.25, 0.75, crate::noise::MAX_LATTICE_OCTAVE);
        assert!((-0.5..=0.5).contains(&v));
    }

    #[test]
    #[should_panic(expected = "octave 64 out of range")]
    fn test_octave_beyond_lattice_panics() {
        let field = GradientField::build((0, 0), 1, 0);
        sample(&field, 0.5, 0.5, 64);
    }
}
