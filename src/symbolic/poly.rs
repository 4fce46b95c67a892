//! Dense univariate polynomials in `s` with exact rational coefficients.

use std::fmt;
use std::ops::{Add, Mul, Neg, Sub};

use num::{One, Zero};

use super::scalar::{scalar_to_f64, Scalar};

/// A polynomial `a_0 + a_1 s + ... + a_n s^n`.
///
/// Coefficients are stored lowest degree first with no trailing zeros, so the
/// zero polynomial is the empty vector.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Poly {
    coeffs: Vec<Scalar>,
}

impl Poly {
    /// The zero polynomial.
    pub fn zero() -> Self {
        Self { coeffs: Vec::new() }
    }

    /// The constant polynomial `1`.
    pub fn one() -> Self {
        Self::constant(Scalar::one())
    }

    /// A constant polynomial.
    pub fn constant(c: Scalar) -> Self {
        Self::from_ascending(vec![c])
    }

    /// The variable `s`.
    pub fn s() -> Self {
        Self::monomial(Scalar::one(), 1)
    }

    /// `c * s^degree`.
    pub fn monomial(c: Scalar, degree: usize) -> Self {
        let mut coeffs = vec![Scalar::zero(); degree + 1];
        coeffs[degree] = c;
        Self::from_ascending(coeffs)
    }

    /// Build from coefficients ordered lowest degree first.
    pub fn from_ascending(mut coeffs: Vec<Scalar>) -> Self {
        while coeffs.last().is_some_and(|c| c.is_zero()) {
            coeffs.pop();
        }
        Self { coeffs }
    }

    /// Coefficients, lowest degree first.
    pub fn coeffs(&self) -> &[Scalar] {
        &self.coeffs
    }

    pub fn is_zero(&self) -> bool {
        self.coeffs.is_empty()
    }

    /// Degree, or `None` for the zero polynomial.
    pub fn degree(&self) -> Option<usize> {
        self.coeffs.len().checked_sub(1)
    }

    /// Coefficient of the highest-degree term.
    pub fn leading(&self) -> Option<&Scalar> {
        self.coeffs.last()
    }

    /// Coefficient of the lowest-degree non-zero term.
    pub fn lowest_nonzero(&self) -> Option<&Scalar> {
        self.coeffs.iter().find(|c| !c.is_zero())
    }

    /// Coefficient of `s^degree` (zero beyond the degree).
    pub fn coeff(&self, degree: usize) -> Scalar {
        self.coeffs.get(degree).cloned().unwrap_or_else(Scalar::zero)
    }

    /// Multiply every coefficient by `c`.
    pub fn scale(&self, c: &Scalar) -> Self {
        Self::from_ascending(self.coeffs.iter().map(|a| a * c).collect())
    }

    /// Scale so the leading coefficient is one. The zero polynomial is
    /// returned unchanged.
    pub fn monic(&self) -> Self {
        match self.leading() {
            Some(lead) => self.scale(&lead.recip()),
            None => Self::zero(),
        }
    }

    /// Polynomial long division. Returns `None` when dividing by zero.
    pub fn div_rem(&self, divisor: &Poly) -> Option<(Poly, Poly)> {
        let dd = divisor.degree()?;
        let lead = divisor.leading()?;

        let n = match self.degree() {
            Some(n) if n >= dd => n,
            _ => return Some((Poly::zero(), self.clone())),
        };

        let mut rem = self.coeffs.clone();
        let mut quot = vec![Scalar::zero(); n - dd + 1];

        for k in (0..=n - dd).rev() {
            let c = &rem[k + dd] / lead;
            if !c.is_zero() {
                for (j, d) in divisor.coeffs.iter().enumerate() {
                    let t = &c * d;
                    rem[k + j] -= t;
                }
            }
            quot[k] = c;
        }

        rem.truncate(dd);
        Some((Poly::from_ascending(quot), Poly::from_ascending(rem)))
    }

    /// Quotient of a division known to be exact.
    pub fn div_exact(&self, divisor: &Poly) -> Option<Poly> {
        let (q, r) = self.div_rem(divisor)?;
        r.is_zero().then_some(q)
    }

    /// Monic greatest common divisor (Euclid over the rationals).
    pub fn gcd(&self, other: &Poly) -> Poly {
        let mut a = self.clone();
        let mut b = other.clone();
        while let Some((_, r)) = a.div_rem(&b) {
            a = b;
            b = r;
        }
        a.monic()
    }

    /// Nearest-float coefficients, highest degree first.
    pub fn to_descending_f64(&self) -> Vec<f64> {
        if self.is_zero() {
            return vec![0.0];
        }
        self.coeffs.iter().rev().map(scalar_to_f64).collect()
    }
}

impl Add<&Poly> for &Poly {
    type Output = Poly;

    fn add(self, rhs: &Poly) -> Poly {
        let len = self.coeffs.len().max(rhs.coeffs.len());
        Poly::from_ascending((0..len).map(|i| self.coeff(i) + rhs.coeff(i)).collect())
    }
}

impl Sub<&Poly> for &Poly {
    type Output = Poly;

    fn sub(self, rhs: &Poly) -> Poly {
        let len = self.coeffs.len().max(rhs.coeffs.len());
        Poly::from_ascending((0..len).map(|i| self.coeff(i) - rhs.coeff(i)).collect())
    }
}

impl Mul<&Poly> for &Poly {
    type Output = Poly;

    fn mul(self, rhs: &Poly) -> Poly {
        if self.is_zero() || rhs.is_zero() {
            return Poly::zero();
        }
        let mut out = vec![Scalar::zero(); self.coeffs.len() + rhs.coeffs.len() - 1];
        for (i, a) in self.coeffs.iter().enumerate() {
            if a.is_zero() {
                continue;
            }
            for (j, b) in rhs.coeffs.iter().enumerate() {
                out[i + j] += a * b;
            }
        }
        Poly::from_ascending(out)
    }
}

impl Neg for &Poly {
    type Output = Poly;

    fn neg(self) -> Poly {
        Poly::from_ascending(self.coeffs.iter().map(|c| -c).collect())
    }
}

forward_owned_binop!(Add, add, Poly);
forward_owned_binop!(Sub, sub, Poly);
forward_owned_binop!(Mul, mul, Poly);

impl fmt::Display for Poly {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format_polynomial(&self.to_descending_f64(), "s"))
    }
}

fn format_coefficient(c: f64) -> String {
    let a = c.abs();
    if a == 0.0 || (1e-4..1e6).contains(&a) {
        format!("{}", c)
    } else {
        format!("{:e}", c)
    }
}

/// Render coefficients (highest degree first) as `a*s^2 + b*s + c`.
pub fn format_polynomial(coeffs: &[f64], var: &str) -> String {
    let degree = coeffs.len().saturating_sub(1);
    let mut out = String::new();

    for (i, &c) in coeffs.iter().enumerate() {
        if c == 0.0 {
            continue;
        }
        let power = degree - i;

        if out.is_empty() {
            if c < 0.0 {
                out.push('-');
            }
        } else if c < 0.0 {
            out.push_str(" - ");
        } else {
            out.push_str(" + ");
        }

        let magnitude = c.abs();
        let coefficient = format_coefficient(magnitude);
        match power {
            0 => out.push_str(&coefficient),
            _ => {
                if magnitude != 1.0 {
                    out.push_str(&coefficient);
                    out.push('*');
                }
                out.push_str(var);
                if power > 1 {
                    out.push('^');
                    out.push_str(&power.to_string());
                }
            }
        }
    }

    if out.is_empty() {
        out.push('0');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use num::BigInt;

    fn q(n: i64) -> Scalar {
        Scalar::from_integer(BigInt::from(n))
    }

    fn poly(coeffs: &[i64]) -> Poly {
        Poly::from_ascending(coeffs.iter().map(|&c| q(c)).collect())
    }

    #[test]
    fn test_trailing_zeros_trimmed() {
        let p = poly(&[1, 2, 0, 0]);
        assert_eq!(p.degree(), Some(1));
        assert!(poly(&[0, 0]).is_zero());
        assert_eq!(Poly::zero().degree(), None);
    }

    #[test]
    fn test_arithmetic() {
        // (s + 1)(s - 1) = s^2 - 1
        let a = poly(&[1, 1]);
        let b = poly(&[-1, 1]);
        assert_eq!(&a * &b, poly(&[-1, 0, 1]));
        assert_eq!(&a + &b, poly(&[0, 2]));
        assert_eq!(&a - &b, poly(&[2]));
        assert_eq!(-&a, poly(&[-1, -1]));
    }

    #[test]
    fn test_div_rem() {
        // s^3 + 2s + 5 = (s^2 + s + 3)(s - 1) + 8
        let (quot, rem) = poly(&[5, 2, 0, 1]).div_rem(&poly(&[-1, 1])).unwrap();
        assert_eq!(quot, poly(&[3, 1, 1]));
        assert_eq!(rem, poly(&[8]));
        assert!(poly(&[1, 1]).div_rem(&Poly::zero()).is_none());
    }

    #[test]
    fn test_gcd_is_monic() {
        // gcd(2(s+1)(s+2), 3(s+1)(s+3)) = s + 1
        let a = (poly(&[1, 1]) * poly(&[2, 1])).scale(&q(2));
        let b = (poly(&[1, 1]) * poly(&[3, 1])).scale(&q(3));
        assert_eq!(a.gcd(&b), poly(&[1, 1]));
        assert_eq!(poly(&[4]).gcd(&poly(&[0, 1])), Poly::one());
    }

    #[test]
    fn test_format_polynomial() {
        assert_eq!(format_polynomial(&[1e-8, 1e-5, 1.0], "s"), "1e-8*s^2 + 1e-5*s + 1");
        assert_eq!(format_polynomial(&[1.0, 0.0], "s"), "s");
        assert_eq!(format_polynomial(&[-2.5, 0.0, 3.0], "s"), "-2.5*s^2 + 3");
        assert_eq!(format_polynomial(&[0.0], "s"), "0");
    }
}
