//! MNA (Modified Nodal Analysis) over rational functions of `s`.
//!
//! The system assembled here is `A x = z` where:
//! - x contains node voltages and voltage-source branch currents
//! - A is the coefficient matrix
//! - z holds zeros for the node equations and the source values
//!
//! The matrix structure is:
//! ```text
//! [ G   B ] [ v ]   [ 0 ]
//! [ Bᵗ  0 ] [ j ] = [ e ]
//! ```
//!
//! where:
//! - G is the nodal admittance matrix, entries in `s`
//! - B, Bᵗ couple the voltage sources to their terminal nodes
//! - v is the vector of node voltages `V_1..V_N`
//! - j is the vector of source currents `I_V1..I_VM`
//! - e is the vector of source values
//!
//! Everything is solved exactly; there is no floating-point step until the
//! transfer-function coefficients are extracted.

pub mod conductance;
pub mod constraints;
mod mna;
mod solve;

pub use constraints::Constraints;
pub use mna::{assemble, MnaSystem};
pub use solve::{solve, Solution};
