//! Reduced rational functions of `s`.

use std::fmt;
use std::ops::{Add, Mul, Neg, Sub};

use num::{One, Zero};

use super::poly::Poly;
use super::scalar::{scalar_from_f64, Scalar};

/// A rational function `num(s) / den(s)` in canonical form.
///
/// Canonical form means `gcd(num, den) = 1` and `den` is monic. Zero is
/// `0 / 1`. With every value canonical, derived equality is exact
/// mathematical equality.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RationalFunction {
    num: Poly,
    den: Poly,
}

impl Default for RationalFunction {
    fn default() -> Self {
        Self::zero()
    }
}

impl RationalFunction {
    pub fn zero() -> Self {
        Self {
            num: Poly::zero(),
            den: Poly::one(),
        }
    }

    pub fn one() -> Self {
        Self::constant(Scalar::one())
    }

    /// A constant function.
    pub fn constant(c: Scalar) -> Self {
        Self {
            num: Poly::constant(c),
            den: Poly::one(),
        }
    }

    /// An integer constant.
    pub fn integer(n: i64) -> Self {
        Self::constant(Scalar::from_integer(n.into()))
    }

    /// A float constant, lifted exactly through its decimal form.
    pub fn from_f64(value: f64) -> Option<Self> {
        scalar_from_f64(value).map(Self::constant)
    }

    /// The complex-frequency variable `s`.
    pub fn s() -> Self {
        Self::from_poly(Poly::s())
    }

    /// A polynomial viewed as a rational function.
    pub fn from_poly(p: Poly) -> Self {
        Self {
            num: p,
            den: Poly::one(),
        }
    }

    /// Build `num / den` and reduce it. Returns `None` if `den` is zero.
    pub fn new(num: Poly, den: Poly) -> Option<Self> {
        if den.is_zero() {
            return None;
        }
        Some(Self::reduce(num, den))
    }

    fn reduce(num: Poly, den: Poly) -> Self {
        if num.is_zero() {
            return Self::zero();
        }

        let g = num.gcd(&den);
        let (num, den) = if g.degree().unwrap_or(0) > 0 {
            (
                num.div_exact(&g).unwrap_or_else(|| num.clone()),
                den.div_exact(&g).unwrap_or_else(|| den.clone()),
            )
        } else {
            (num, den)
        };

        let inv = den
            .leading()
            .filter(|lead| !lead.is_one())
            .map(|lead| lead.recip());
        match inv {
            Some(inv) => Self {
                num: num.scale(&inv),
                den: den.scale(&inv),
            },
            None => Self { num, den },
        }
    }

    pub fn numerator(&self) -> &Poly {
        &self.num
    }

    pub fn denominator(&self) -> &Poly {
        &self.den
    }

    pub fn is_zero(&self) -> bool {
        self.num.is_zero()
    }

    /// The value if this function does not depend on `s`.
    pub fn as_constant(&self) -> Option<Scalar> {
        match (self.num.degree(), self.den.degree()) {
            (None, _) => Some(Scalar::zero()),
            (Some(0), Some(0)) => Some(self.num.coeff(0)),
            _ => None,
        }
    }

    /// Size measure used to prefer simple pivots during elimination.
    pub fn complexity(&self) -> usize {
        self.num.degree().unwrap_or(0) + self.den.degree().unwrap_or(0)
    }

    /// Multiplicative inverse, `None` for zero.
    pub fn inv(&self) -> Option<Self> {
        Self::new(self.den.clone(), self.num.clone())
    }

    /// Division, `None` when `rhs` is zero.
    pub fn checked_div(&self, rhs: &Self) -> Option<Self> {
        if rhs.is_zero() {
            return None;
        }
        Some(Self::reduce(&self.num * &rhs.den, &self.den * &rhs.num))
    }

    /// Multiply by a constant.
    pub fn scale(&self, c: &Scalar) -> Self {
        if c.is_zero() {
            return Self::zero();
        }
        Self {
            num: self.num.scale(c),
            den: self.den.clone(),
        }
    }
}

impl Add<&RationalFunction> for &RationalFunction {
    type Output = RationalFunction;

    fn add(self, rhs: &RationalFunction) -> RationalFunction {
        if self.is_zero() {
            return rhs.clone();
        }
        if rhs.is_zero() {
            return self.clone();
        }
        if self.den == rhs.den {
            return RationalFunction::reduce(&self.num + &rhs.num, self.den.clone());
        }
        RationalFunction::reduce(
            &(&self.num * &rhs.den) + &(&rhs.num * &self.den),
            &self.den * &rhs.den,
        )
    }
}

impl Sub<&RationalFunction> for &RationalFunction {
    type Output = RationalFunction;

    fn sub(self, rhs: &RationalFunction) -> RationalFunction {
        self + &(-rhs)
    }
}

impl Mul<&RationalFunction> for &RationalFunction {
    type Output = RationalFunction;

    fn mul(self, rhs: &RationalFunction) -> RationalFunction {
        if self.is_zero() || rhs.is_zero() {
            return RationalFunction::zero();
        }
        RationalFunction::reduce(&self.num * &rhs.num, &self.den * &rhs.den)
    }
}

impl Neg for &RationalFunction {
    type Output = RationalFunction;

    fn neg(self) -> RationalFunction {
        RationalFunction {
            num: -&self.num,
            den: self.den.clone(),
        }
    }
}

impl Neg for RationalFunction {
    type Output = RationalFunction;

    fn neg(self) -> RationalFunction {
        -&self
    }
}

forward_owned_binop!(Add, add, RationalFunction);
forward_owned_binop!(Sub, sub, RationalFunction);
forward_owned_binop!(Mul, mul, RationalFunction);

impl fmt::Display for RationalFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.den.degree() == Some(0) {
            write!(f, "{}", self.num)
        } else {
            write!(f, "({})/({})", self.num, self.den)
        }
    }
}
