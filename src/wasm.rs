//! WASM bindings for nodal_tf.
//!
//! This module provides JavaScript-friendly bindings for computing transfer
//! functions in the browser.
//!
//! ## Usage (JavaScript)
//!
//! ```javascript
//! import init, { WasmTransferFunction } from 'nodal_tf';
//!
//! await init();
//!
//! const netlist = `
//!   From,To,Type,Value
//!   1,2,Resistance,10
//!   2,3,Inductance,10m
//!   3,0,Capacitance,1u
//!   1,0,VoltageSource,10
//! `;
//!
//! const tf = new WasmTransferFunction(netlist, "V1", "I:L1");
//! tf.numerator;    // Float64Array [1e-6, 0]
//! tf.denominator;  // Float64Array [1e-8, 1e-5, 1]
//! ```

use wasm_bindgen::prelude::*;

use crate::analysis::{CircuitAnalysis, CoefficientRounding, TransferFunction};
use crate::circuit::validate_raw;
use crate::input::parse_netlist;
use crate::pipeline::Selection;

/// Initialize panic hook for better error messages in browser console.
#[wasm_bindgen(start)]
pub fn init_panic_hook() {
    console_error_panic_hook::set_once();
}

fn js_error(err: crate::error::TfError) -> JsValue {
    JsValue::from_str(&format!("{}: {}", err.code(), err))
}

/// Transfer function of a netlist for one input/output selection.
#[wasm_bindgen]
pub struct WasmTransferFunction {
    tf: TransferFunction,
}

#[wasm_bindgen]
impl WasmTransferFunction {
    /// Compute a transfer function with the default coefficient rounding.
    ///
    /// # Arguments
    /// * `netlist` - Netlist text, one `from,to,type,value` row per line
    /// * `input` - Input voltage source, e.g. `"V1"`
    /// * `output` - Output quantity, e.g. `"I:L1"` or `"V:C1"`
    ///
    /// # Returns
    /// The transfer function, or an error string prefixed with its code.
    #[wasm_bindgen(constructor)]
    pub fn new(netlist: &str, input: &str, output: &str) -> Result<WasmTransferFunction, JsValue> {
        Self::compute(netlist, input, output, CoefficientRounding::default())
    }

    /// Compute a transfer function rounded to `digits` significant digits.
    /// Zero keeps the nearest float to each exact coefficient.
    #[wasm_bindgen]
    pub fn with_digits(
        netlist: &str,
        input: &str,
        output: &str,
        digits: u32,
    ) -> Result<WasmTransferFunction, JsValue> {
        let rounding = match digits {
            0 => CoefficientRounding::Exact,
            n => CoefficientRounding::SignificantDigits(n),
        };
        Self::compute(netlist, input, output, rounding)
    }

    fn compute(
        netlist: &str,
        input: &str,
        output: &str,
        rounding: CoefficientRounding,
    ) -> Result<WasmTransferFunction, JsValue> {
        let raw = parse_netlist(netlist).map_err(js_error)?;
        let netlist = validate_raw(&raw).map_err(js_error)?;
        let selection = Selection::parse(input, output).map_err(js_error)?;

        let analysis = CircuitAnalysis::new(netlist).map_err(js_error)?;
        let tf = analysis
            .transfer_function(
                &selection.input,
                &selection.output.identifier,
                selection.output.quantity,
                rounding,
            )
            .map_err(js_error)?;

        Ok(WasmTransferFunction { tf })
    }

    /// Numerator coefficients, highest degree first.
    #[wasm_bindgen(getter)]
    pub fn numerator(&self) -> Vec<f64> {
        self.tf.numerator.clone()
    }

    /// Denominator coefficients, highest degree first.
    #[wasm_bindgen(getter)]
    pub fn denominator(&self) -> Vec<f64> {
        self.tf.denominator.clone()
    }

    /// Whether the transfer function is a plain gain.
    #[wasm_bindgen(getter)]
    pub fn is_constant(&self) -> bool {
        self.tf.is_constant()
    }

    /// The gain of a constant transfer function, `undefined` otherwise.
    #[wasm_bindgen]
    pub fn gain(&self) -> Option<f64> {
        self.tf.gain()
    }

    /// Magnitude in dB at each angular frequency of `omegas`.
    #[wasm_bindgen]
    pub fn magnitude_db(&self, omegas: &[f64]) -> Vec<f64> {
        self.tf
            .frequency_response(omegas)
            .iter()
            .map(|p| p.magnitude_db)
            .collect()
    }

    /// Phase in degrees at each angular frequency of `omegas`.
    #[wasm_bindgen]
    pub fn phase_deg(&self, omegas: &[f64]) -> Vec<f64> {
        self.tf
            .frequency_response(omegas)
            .iter()
            .map(|p| p.phase_deg)
            .collect()
    }

    /// Human-readable form, e.g. `(1e-6*s) / (1e-8*s^2 + 1e-5*s + 1)`.
    #[wasm_bindgen(js_name = toString)]
    pub fn to_display_string(&self) -> String {
        self.tf.to_string()
    }
}

/// Get the library version.
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

/// Get the default number of significant digits in coefficients.
#[wasm_bindgen]
pub fn default_coefficient_digits() -> u32 {
    crate::DEFAULT_COEFFICIENT_DIGITS
}
