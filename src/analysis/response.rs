//! Frequency response of a [`TransferFunction`].

use num::complex::Complex64;

use super::transfer::TransferFunction;

/// One sample of a frequency sweep.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrequencyPoint {
    /// Angular frequency in rad/s
    pub omega: f64,
    /// `20 log10 |H(jω)|`
    pub magnitude_db: f64,
    /// `arg H(jω)` in degrees
    pub phase_deg: f64,
}

impl TransferFunction {
    /// Evaluate `H(s)` at a complex frequency.
    pub fn evaluate(&self, s: Complex64) -> Complex64 {
        horner(&self.numerator, s) / horner(&self.denominator, s)
    }

    /// Sample magnitude and phase at `s = jω` for each `ω`.
    pub fn frequency_response(&self, omegas: &[f64]) -> Vec<FrequencyPoint> {
        omegas
            .iter()
            .map(|&omega| {
                let h = self.evaluate(Complex64::new(0.0, omega));
                FrequencyPoint {
                    omega,
                    magnitude_db: 20.0 * h.norm().log10(),
                    phase_deg: h.arg().to_degrees(),
                }
            })
            .collect()
    }
}

fn horner(coeffs: &[f64], s: Complex64) -> Complex64 {
    coeffs
        .iter()
        .fold(Complex64::new(0.0, 0.0), |acc, &c| acc * s + c)
}

/// `n` logarithmically spaced points from `start` to `stop` inclusive.
///
/// Both bounds must be positive and finite; otherwise the grid is empty.
pub fn log_space(start: f64, stop: f64, n: usize) -> Vec<f64> {
    if !(start > 0.0 && stop > 0.0 && start.is_finite() && stop.is_finite()) {
        return Vec::new();
    }
    match n {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let (a, b) = (start.log10(), stop.log10());
            let step = (b - a) / (n - 1) as f64;
            (0..n).map(|i| 10f64.powf(a + step * i as f64)).collect()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_log_space() {
        let grid = log_space(1.0, 1000.0, 4);
        assert_eq!(grid.len(), 4);
        assert_relative_eq!(grid[0], 1.0);
        assert_relative_eq!(grid[1], 10.0, epsilon = 1e-9);
        assert_relative_eq!(grid[3], 1000.0, epsilon = 1e-9);

        assert_eq!(log_space(5.0, 50.0, 1), vec![5.0]);
        assert!(log_space(0.0, 10.0, 5).is_empty());
        assert!(log_space(1.0, 10.0, 0).is_empty());
    }

    #[test]
    fn test_first_order_low_pass() {
        // H(s) = 1 / (s/1000 + 1): -3 dB and -45 degrees at the corner
        let tf = TransferFunction::new(vec![1.0], vec![1e-3, 1.0]);
        let points = tf.frequency_response(&[1.0, 1000.0, 1e6]);

        assert_relative_eq!(points[0].magnitude_db, 0.0, epsilon = 1e-4);
        assert_relative_eq!(points[1].magnitude_db, -3.0103, epsilon = 1e-3);
        assert_relative_eq!(points[1].phase_deg, -45.0, epsilon = 1e-9);
        assert_relative_eq!(points[2].magnitude_db, -60.0, epsilon = 1e-3);
    }

    #[test]
    fn test_series_rlc_resonance() {
        // Current through a series RLC per volt peaks at 1/R at ω0 = 1/sqrt(LC)
        let tf = TransferFunction::new(vec![1e-6, 0.0], vec![1e-8, 1e-5, 1.0]);
        let omega0 = 1e4;
        let h = tf.evaluate(Complex64::new(0.0, omega0));
        assert_relative_eq!(h.re, 0.1, epsilon = 1e-12);
        assert_relative_eq!(h.im, 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_constant_evaluates_to_gain() {
        let tf = TransferFunction::new(vec![0.25], vec![1.0]);
        assert_eq!(tf.evaluate(Complex64::new(0.0, 123.0)), Complex64::new(0.25, 0.0));
    }
}
