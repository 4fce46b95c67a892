//! Transfer-function composition and coefficient extraction.

use std::fmt;

use num::Zero;
use tracing::debug;

use crate::error::{Result, TfError};
use crate::symbolic::{format_polynomial, RationalFunction, Scalar};
use crate::DEFAULT_COEFFICIENT_DIGITS;

/// How extracted coefficients are rounded.
///
/// The default keeps 10 significant digits rather than 10 decimal places.
/// With the lowest-order denominator coefficient scaled to 1, high-order
/// coefficients are routinely `1e-12` or smaller and fixed decimal places
/// would round them to zero. [`CoefficientRounding::DecimalPlaces`] gives
/// the fixed-point behaviour when that is wanted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoefficientRounding {
    /// Fixed number of digits after the decimal point
    DecimalPlaces(u32),
    /// Fixed number of significant decimal digits
    SignificantDigits(u32),
    /// Nearest `f64` to the exact coefficient
    Exact,
}

impl Default for CoefficientRounding {
    fn default() -> Self {
        Self::SignificantDigits(DEFAULT_COEFFICIENT_DIGITS)
    }
}

impl CoefficientRounding {
    /// Round one coefficient.
    pub fn apply(&self, value: f64) -> f64 {
        let text = match *self {
            Self::Exact => return value,
            Self::DecimalPlaces(places) => format!("{:.*}", places as usize, value),
            Self::SignificantDigits(digits) => {
                format!("{:.*e}", digits.saturating_sub(1) as usize, value)
            }
        };
        // Formatting a finite float always parses back
        let rounded: f64 = text.parse().unwrap_or(value);
        if rounded == 0.0 {
            0.0
        } else {
            rounded
        }
    }
}

/// Transfer function `H(s) = N(s) / D(s)` as coefficient lists, highest
/// degree first.
#[derive(Debug, Clone, PartialEq)]
pub struct TransferFunction {
    pub numerator: Vec<f64>,
    pub denominator: Vec<f64>,
}

impl TransferFunction {
    pub fn new(numerator: Vec<f64>, denominator: Vec<f64>) -> Self {
        Self {
            numerator,
            denominator,
        }
    }

    /// Degree of the denominator.
    pub fn order(&self) -> usize {
        self.denominator.len().saturating_sub(1)
    }

    /// True when both polynomials are single coefficients: the response is a
    /// plain gain with no frequency dependence.
    pub fn is_constant(&self) -> bool {
        self.numerator.len() == 1 && self.denominator.len() == 1
    }

    /// The gain of a constant transfer function.
    pub fn gain(&self) -> Option<f64> {
        if !self.is_constant() || self.denominator[0] == 0.0 {
            return None;
        }
        Some(self.numerator[0] / self.denominator[0])
    }
}

impl fmt::Display for TransferFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let num = format_polynomial(&self.numerator, "s");
        if self.denominator == [1.0] {
            return write!(f, "{}", num);
        }
        let den = format_polynomial(&self.denominator, "s");
        write!(f, "({}) / ({})", num, den)
    }
}

/// Divide `output` by the input source value and extract coefficients.
///
/// The ratio is scaled so the lowest-order non-zero denominator coefficient
/// is one, then every coefficient is rounded with `rounding`.
pub fn compose(
    output: &RationalFunction,
    input_value: &Scalar,
    rounding: CoefficientRounding,
) -> Result<TransferFunction> {
    if input_value.is_zero() {
        return Err(TfError::internal("input source value is zero"));
    }

    let ratio = output.scale(&input_value.recip());
    if ratio.is_zero() {
        return Ok(TransferFunction::new(vec![0.0], vec![1.0]));
    }

    let norm = ratio
        .denominator()
        .lowest_nonzero()
        .map(|c| c.recip())
        .ok_or_else(|| TfError::internal("transfer function has a zero denominator"))?;
    let numerator = round_all(ratio.numerator().scale(&norm).to_descending_f64(), rounding);
    let denominator = round_all(ratio.denominator().scale(&norm).to_descending_f64(), rounding);

    let tf = TransferFunction::new(numerator, denominator);
    debug!(order = tf.order(), "transfer function composed");
    Ok(tf)
}

/// Round each coefficient and drop high-order terms that rounded to zero.
fn round_all(coeffs: Vec<f64>, rounding: CoefficientRounding) -> Vec<f64> {
    let rounded: Vec<f64> = coeffs.into_iter().map(|c| rounding.apply(c)).collect();
    match rounded.iter().position(|&c| c != 0.0) {
        Some(first) => rounded[first..].to_vec(),
        None => vec![0.0],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::symbolic::scalar_from_f64;
    use approx::assert_relative_eq;

    fn rf(v: f64) -> RationalFunction {
        RationalFunction::from_f64(v).unwrap()
    }

    fn scalar(v: f64) -> Scalar {
        scalar_from_f64(v).unwrap()
    }

    #[test]
    fn test_rounding_modes() {
        assert_eq!(CoefficientRounding::SignificantDigits(3).apply(1.23456e-8), 1.23e-8);
        assert_eq!(CoefficientRounding::DecimalPlaces(2).apply(3.14159), 3.14);
        assert_eq!(CoefficientRounding::DecimalPlaces(2).apply(-0.001), 0.0);
        assert_eq!(CoefficientRounding::Exact.apply(0.1 + 0.2), 0.1 + 0.2);
        assert_eq!(CoefficientRounding::default().apply(0.1 + 0.2), 0.3);
    }

    #[test]
    fn test_series_rlc_current() {
        // I_L / V = C s / (L C s^2 + R C s + 1)
        let s = RationalFunction::s();
        let den = &(&(&rf(1e-8) * &s) * &s) + &(&(&rf(1e-5) * &s) + &rf(1.0));
        let output = (&rf(10.0) * &(&rf(1e-6) * &s)).checked_div(&den).unwrap();

        let tf = compose(&output, &scalar(10.0), CoefficientRounding::default()).unwrap();
        assert_eq!(tf.numerator, vec![1e-6, 0.0]);
        assert_eq!(tf.denominator, vec![1e-8, 1e-5, 1.0]);
        assert_eq!(tf.order(), 2);
        assert!(!tf.is_constant());
        assert_eq!(tf.to_string(), "(1e-6*s) / (1e-8*s^2 + 1e-5*s + 1)");
    }

    #[test]
    fn test_constant_ratio() {
        let tf = compose(&rf(2.5), &scalar(10.0), CoefficientRounding::default()).unwrap();
        assert!(tf.is_constant());
        assert_relative_eq!(tf.gain().unwrap(), 0.25);
        assert_eq!(tf.to_string(), "0.25");
    }

    #[test]
    fn test_zero_output() {
        let zero = RationalFunction::zero();
        let tf = compose(&zero, &scalar(5.0), CoefficientRounding::Exact).unwrap();
        assert_eq!(tf, TransferFunction::new(vec![0.0], vec![1.0]));
        assert_eq!(tf.gain(), Some(0.0));
    }

    #[test]
    fn test_zero_input_is_internal() {
        let err = compose(&rf(1.0), &Scalar::zero(), CoefficientRounding::Exact).unwrap_err();
        assert!(!err.is_recoverable());
    }

    #[test]
    fn test_lowest_order_normalization() {
        // 2 / (4 s + 8)  ->  0.25 / (0.5 s + 1)
        let s = RationalFunction::s();
        let den = &(&rf(4.0) * &s) + &rf(8.0);
        let output = rf(2.0).checked_div(&den).unwrap();
        let tf = compose(&output, &scalar(1.0), CoefficientRounding::Exact).unwrap();
        assert_eq!(tf.numerator, vec![0.25]);
        assert_eq!(tf.denominator, vec![0.5, 1.0]);
    }
}
