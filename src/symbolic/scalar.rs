//! Exact rational scalars.

use num::{BigInt, BigRational, ToPrimitive, Zero};

/// Exact coefficient type for all symbolic arithmetic.
pub type Scalar = BigRational;

/// Lift an `f64` into an exact rational.
///
/// The conversion goes through the shortest decimal representation that
/// round-trips to the same float, so `0.2` becomes exactly `1/5` rather than
/// the binary expansion `3602879701896397/18014398509481984`. Non-finite
/// values have no rational image.
pub fn scalar_from_f64(value: f64) -> Option<Scalar> {
    if !value.is_finite() {
        return None;
    }
    if value == 0.0 {
        return Some(Scalar::zero());
    }

    // LowerExp prints the shortest round-trip digits: "2e-1", "-1.25e3"
    let text = format!("{:e}", value);
    let (mantissa, exponent) = text.split_once('e')?;
    let exponent: i64 = exponent.parse().ok()?;

    let negative = mantissa.starts_with('-');
    let mantissa = mantissa.trim_start_matches('-');
    let (int_part, frac_part) = mantissa.split_once('.').unwrap_or((mantissa, ""));

    let mut numer: BigInt = format!("{}{}", int_part, frac_part).parse().ok()?;
    if negative {
        numer = -numer;
    }

    let shift = exponent - frac_part.len() as i64;
    let ten = BigInt::from(10);
    let magnitude = num::pow(ten, shift.unsigned_abs() as usize);

    Some(if shift >= 0 {
        Scalar::from_integer(numer * magnitude)
    } else {
        Scalar::new(numer, magnitude)
    })
}

/// Nearest `f64` to an exact rational.
pub fn scalar_to_f64(value: &Scalar) -> f64 {
    value.to_f64().unwrap_or_else(|| {
        let numer = value.numer().to_f64().unwrap_or(f64::NAN);
        let denom = value.denom().to_f64().unwrap_or(f64::NAN);
        numer / denom
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ratio(n: i64, d: i64) -> Scalar {
        Scalar::new(BigInt::from(n), BigInt::from(d))
    }

    #[test]
    fn test_decimal_lifting() {
        assert_eq!(scalar_from_f64(0.2), Some(ratio(1, 5)));
        assert_eq!(scalar_from_f64(1e-6), Some(ratio(1, 1_000_000)));
        assert_eq!(scalar_from_f64(-1250.0), Some(ratio(-1250, 1)));
        assert_eq!(scalar_from_f64(0.01), Some(ratio(1, 100)));
        assert_eq!(scalar_from_f64(0.0), Some(Scalar::zero()));
    }

    #[test]
    fn test_non_finite_rejected() {
        assert_eq!(scalar_from_f64(f64::NAN), None);
        assert_eq!(scalar_from_f64(f64::INFINITY), None);
        assert_eq!(scalar_from_f64(f64::NEG_INFINITY), None);
    }

    #[test]
    fn test_back_to_float() {
        for v in [0.2, 1e-6, 4.7e3, -3.3, 1e-12, 123456.789] {
            let exact = scalar_from_f64(v).unwrap();
            assert_eq!(scalar_to_f64(&exact), v);
        }
        assert_eq!(scalar_to_f64(&ratio(1, 3)), 1.0 / 3.0);
    }
}
