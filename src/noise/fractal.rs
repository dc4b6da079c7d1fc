//! Multi-octave accumulation of gradient noise.

use super::gradient::GradientField;
use super::perlin::sample;

/// Sums every octave of `field` at chunk-local position `(x0, y0)`.
///
/// Octave `o` is evaluated at `(x0, y0) * 2^o` and contributes with weight
/// `1 / 2^o`, so the result lies in `[-1, 1)` for any number of octaves.
///
/// # Arguments
/// * `field` - Gradient tables of the chunk being sampled
/// * `x0`, `y0` - Position in chunk units, `[0, 1]` across one chunk
pub fn sample_octaves(field: &GradientField, x0: f64, y0: f64) -> f64 {
    let mut total = 0.0;
    for octave in 0..field.octave_count() {
        let multiplier = (1u64 << octave) as f64;
        total += sample(field, multiplier * x0, multiplier * y0, octave) / multiplier;
    }
    total
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_octave_matches_sampler() {
        let field = GradientField::build((0, 0), 1, 9);
        assert_eq!(sample_octaves(&field, 0.3, 0.7), sample(&field, 0.3, 0.7, 0));
    }

    #[test]
    fn test_octaves_accumulate() {
        let field = GradientField::build((1, 1), 3, 9);
        let expected = sample(&field, 0.4, 0.6, 0)
            + sample(&field, 0.8, 1.2, 1) / 2.0
            + sample(&field, 1.6, 2.4, 2) / 4.0;
        assert!((sample_octaves(&field, 0.4, 0.6) - expected).abs() < 1e-15);
    }

    #[test]
    fn test_fractal_range() {
        let field = GradientField::build((-2, 3), 6, 1);
        for i in 0..=32 {
            for j in 0..=32 {
                let v = sample_octaves(&field, i as f64 / 32.0, j as f64 / 32.0);
                assert!((-1.0..=1.0).contains(&v));
            }
        }
    }

    #[test]
    fn test_no_octaves_is_zero() {
        let field = GradientField::build((0, 0), 0, 9);
        assert_eq!(sample_octaves(&field, 0.5, 0.5), 0.0);
    }
}
