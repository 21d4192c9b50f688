//! The escape-time iteration.
//!
//! Note that the orbit starts at `z₁ = c`, not at `z₀ = 0`: the first
//! value tested against the radius is `z₂ = c² + c`.  This shifts every
//! escape count by one compared with the textbook Mandelbrot definition
//! and never tests `c` itself, which changes the rendered set boundary.
//! Rendered output depends on it, so it stays.

use crate::complex::Complex;

/// Iterates `z ← z² + c` from `z = c` and returns the iteration number
/// `n` (counting from 2) at which `|z|²` first exceeds `radius²`.
///
/// Returns `max_iterations` when the orbit never escapes, which is also
/// the result for every point when `max_iterations` is 1.  An escape on
/// the final step is indistinguishable from a bounded orbit.
#[inline]
pub fn escape_time(c: Complex, radius: f64, max_iterations: usize) -> usize {
    let limit = radius * radius;
    let mut z = c;
    for n in 2..=max_iterations {
        z = z * z + c;
        if z.squared_magnitude() > limit {
            return n;
        }
    }
    max_iterations
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;

    #[test]
    fn origin_never_escapes() {
        for &radius in [0.001, 0.5, 2.0, 4.0, 1000.0].iter() {
            for &max in [1, 2, 3, 100, 5000].iter() {
                assert_eq!(escape_time(Complex::new(0.0, 0.0), radius, max), max);
            }
        }
    }

    #[test]
    fn far_points_escape_on_the_first_step() {
        // z₂ = c² + c = 110
        assert_eq!(escape_time(Complex::new(10.0, 0.0), 2.0, 100), 2);
        // z₂ = (0 - 8i) + (-2 + 2i) = -2 - 6i
        assert_eq!(escape_time(Complex::new(-2.0, 2.0), 2.0, 100), 2);
    }

    #[test]
    fn the_start_value_itself_is_never_tested() {
        // |c| = 1.5 is outside radius 1, but the orbit runs
        // 0.75, -0.9375, -0.62109375, -1.1142... before leaving.
        assert_eq!(escape_time(Complex::new(-1.5, 0.0), 1.0, 100), 5);
    }

    #[test]
    fn counts_steps_until_escape() {
        // c = 1: z₁ = 1, z₂ = 2, z₃ = 5.
        assert_eq!(escape_time(Complex::new(1.0, 0.0), 2.0, 100), 3);
        // with radius 5, z₄ = 26 is the first past it.
        assert_eq!(escape_time(Complex::new(1.0, 0.0), 5.0, 100), 4);
    }

    #[test]
    fn inner_points_are_bounded() {
        assert_eq!(escape_time(Complex::new(-1.0, 0.0), 2.0, 100), 100);
        assert_eq!(escape_time(Complex::new(-0.1, 0.1), 2.0, 100), 100);
    }

    #[test]
    fn a_single_iteration_is_always_bounded() {
        assert_eq!(escape_time(Complex::new(10.0, 10.0), 2.0, 1), 1);
    }

    #[test]
    fn larger_radius_never_escapes_sooner() {
        let mut rng = rand::thread_rng();
        for _ in 0..2000 {
            let c = Complex::new(rng.gen_range(-2.5, 1.5), rng.gen_range(-1.5, 1.5));
            let small = rng.gen_range(0.5, 4.0);
            let large = small + rng.gen_range(0.0, 10.0);
            assert!(
                escape_time(c, small, 200) <= escape_time(c, large, 200),
                "{} with radii {} and {}",
                c,
                small,
                large
            );
        }
    }
}
