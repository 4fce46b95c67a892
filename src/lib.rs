//! # nodal_tf
//!
//! Symbolic transfer functions of linear passive networks.
//!
//! This library provides:
//! - Validation and normalization of R, L, C and voltage-source netlists
//! - Modified Nodal Analysis (MNA) solved exactly over rational functions of `s`
//! - Voltage or current of any element as an output quantity
//! - Numerator/denominator coefficient extraction and frequency response
//!
//! ## Architecture
//!
//! The library is organized into several modules:
//!
//! - [`input`] - Parser for the netlist table format
//! - [`circuit`] - Netlist representation and validation
//! - [`symbolic`] - Exact polynomials, rational functions and matrices in `s`
//! - [`solver`] - MNA assembly and symbolic solving
//! - [`analysis`] - Output extraction, transfer functions, frequency response
//! - [`pipeline`] - Acquire/validate/solve/select state machine for front-ends
//!
//! ## Usage
//!
//! ### Native CLI
//!
//! ```bash
//! nodal-tf rlc.csv --input V1 --output I:L1 --bode 1 1e6 13
//! ```
//!
//! ### Library
//!
//! ```
//! use nodal_tf::{input, validate_raw, CircuitAnalysis, CoefficientRounding, Quantity};
//!
//! let raw = input::parse_netlist("1,2,R,10\n2,3,L,10m\n3,0,C,1u\n1,0,V,10").unwrap();
//! let analysis = CircuitAnalysis::new(validate_raw(&raw).unwrap()).unwrap();
//! let tf = analysis
//!     .transfer_function("V1", "L1", Quantity::Current, CoefficientRounding::default())
//!     .unwrap();
//! assert_eq!(tf.denominator, vec![1e-8, 1e-5, 1.0]);
//! ```
//!
//! ### WASM
//!
//! ```javascript
//! import { WasmTransferFunction } from 'nodal_tf';
//!
//! const tf = new WasmTransferFunction(netlistText, "V1", "V:C1");
//! ```
//!
//! ## Analysis Method
//!
//! For a netlist with `N` non-ground nodes and `M` voltage sources:
//!
//! 1. Assemble the `(N+M)x(N+M)` system `[[G, B], [Bᵗ, 0]]` with admittances
//!    `1/R`, `1/(sL)` and `sC`
//! 2. Solve it by exact Gaussian elimination over rational functions of `s`
//! 3. Express the selected output in the solved unknowns
//! 4. Divide by the input source value and extract polynomial coefficients

pub mod analysis;
pub mod circuit;
pub mod error;
pub mod input;
pub mod pipeline;
pub mod solver;
pub mod symbolic;

// Re-export main types for convenience
pub use analysis::{CircuitAnalysis, CoefficientRounding, TransferFunction};
pub use circuit::{validate, validate_raw, Netlist, Quantity, RawNetlist};
pub use error::{ErrorCode, Result, TfError};
pub use pipeline::{AnalysisConfig, Frontend, Pipeline, PipelineOutcome, Selection};

// WASM bindings
#[cfg(feature = "wasm")]
mod wasm;

#[cfg(feature = "wasm")]
pub use wasm::WasmTransferFunction;

/// Default number of significant digits kept in transfer-function coefficients
pub const DEFAULT_COEFFICIENT_DIGITS: u32 = 10;

/// Default number of failed attempts before a pipeline run is aborted
pub const DEFAULT_MAX_ATTEMPTS: usize = 3;
