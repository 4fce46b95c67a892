//! Netlist representation and validation.
//!
//! This module turns the raw parallel arrays delivered by a front-end into an
//! immutable [`Netlist`]: element kinds become tagged [`ElementId`]s, values
//! are checked and lifted to exact rationals, and negative sources are
//! normalized once.

mod netlist;
mod types;
mod validate;

pub use netlist::{Element, Netlist, RawNetlist};
pub use types::*;
pub use validate::{validate, validate_raw};
