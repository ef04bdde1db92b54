// src/math_utils.rs
use statrs::function::erf;
use std::f64::consts::{PI, SQRT_2};
use std::time::Instant;

/// Standard normal CDF, Φ(x) = erfc(-x/√2) / 2.
///
/// Accurate to relative precision in the left tail (Φ(-10) ≈ 7.6e-24).
pub fn norm_cdf(x: f64) -> f64 {
    0.5 * erf::erfc(-x / SQRT_2)
}

/// Standard normal probability density function φ(x) = exp(-x²/2) / √(2π)
pub fn norm_pdf(x: f64) -> f64 {
    (1.0 / (2.0 * PI).sqrt()) * (-0.5 * x * x).exp()
}

/// Wall-clock stopwatch for the `elapsed_ms` field of simulation logs
#[derive(Debug, Clone, Copy)]
pub struct Timer {
    start_time: Instant,
}

impl Timer {
    /// Starts timing immediately
    pub fn new() -> Timer {
        Timer {
            start_time: Instant::now(),
        }
    }

    /// Milliseconds since [`Timer::new`]
    pub fn elapsed_ms(&self) -> f64 {
        self.start_time.elapsed().as_secs_f64() * 1000.0
    }
}

impl Default for Timer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::{assert_abs_diff_eq, assert_relative_eq};

    #[test]
    fn test_norm_cdf_reference_points() {
        assert_abs_diff_eq!(norm_cdf(0.0), 0.5, epsilon = 1e-15);
        assert_abs_diff_eq!(norm_cdf(1.96), 0.975_002_104_851_780, epsilon = 1e-12);
        assert_abs_diff_eq!(norm_cdf(-1.0), 0.158_655_253_931_457, epsilon = 1e-12);
    }

    #[test]
    fn test_norm_cdf_left_tail_keeps_precision() {
        assert_relative_eq!(norm_cdf(-10.0), 7.619_853_024_160_527e-24, max_relative = 1e-12);
        assert_relative_eq!(norm_cdf(-30.0), 4.906_713_927_148_187e-198, max_relative = 1e-9);
        assert!(norm_cdf(-9.0) > 0.0 && norm_cdf(-9.0) < norm_cdf(-8.0));
        assert_eq!(norm_cdf(40.0), 1.0);
    }

    #[test]
    fn test_norm_cdf_symmetry() {
        for &x in &[0.1, 0.35, 1.0, 2.5, 6.0] {
            assert_abs_diff_eq!(norm_cdf(x) + norm_cdf(-x), 1.0, epsilon = 1e-15);
        }
    }

    #[test]
    fn test_norm_pdf() {
        assert_abs_diff_eq!(norm_pdf(0.0), 0.398_942_280_401_433, epsilon = 1e-14);
        assert_abs_diff_eq!(norm_pdf(1.5), norm_pdf(-1.5), epsilon = 0.0);
    }

    #[test]
    fn test_timer_is_monotonic() {
        let timer = Timer::new();
        let first = timer.elapsed_ms();
        let second = timer.elapsed_ms();
        assert!(first >= 0.0);
        assert!(second >= first);
    }
}
