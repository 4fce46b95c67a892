//! Exact symbolic algebra in the complex-frequency variable `s`.
//!
//! The nodal engine never manipulates floats directly. Element values are
//! lifted into exact rationals ([`Scalar`]), admittances become rational
//! functions of `s` ([`RationalFunction`]), and the MNA system is a dense
//! matrix of those ([`SymMatrix`]).
//!
//! ```text
//! Scalar            BigRational, built from the shortest decimal form of an f64
//! Poly              a_0 + a_1 s + ... + a_n s^n, coefficients stored ascending
//! RationalFunction  num(s) / den(s), gcd-reduced, monic denominator
//! SymMatrix         row-major matrix of RationalFunction
//! ```
//!
//! Every value is kept in canonical form, so structural equality is
//! mathematical equality and "identically zero" is an exact test.

/// Implements the owned-operand forms of a binary operator in terms of the
/// by-reference implementation.
macro_rules! forward_owned_binop {
    ($imp:ident, $method:ident, $t:ty) => {
        impl std::ops::$imp<$t> for $t {
            type Output = $t;
            fn $method(self, rhs: $t) -> $t {
                std::ops::$imp::$method(&self, &rhs)
            }
        }

        impl std::ops::$imp<&$t> for $t {
            type Output = $t;
            fn $method(self, rhs: &$t) -> $t {
                std::ops::$imp::$method(&self, rhs)
            }
        }
    };
}

mod matrix;
mod poly;
mod rational;
mod scalar;

pub use matrix::SymMatrix;
pub use poly::{format_polynomial, Poly};
pub use rational::RationalFunction;
pub use scalar::{scalar_from_f64, scalar_to_f64, Scalar};
