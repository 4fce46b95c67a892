//! From a solved MNA system to transfer functions.
//!
//! [`CircuitAnalysis`] owns one validated netlist together with its solved
//! system, so any number of input/output selections can be evaluated
//! without solving again.

mod output;
mod response;
mod transfer;

pub use output::extract;
pub use response::{log_space, FrequencyPoint};
pub use transfer::{compose, CoefficientRounding, TransferFunction};

use tracing::{debug, info_span};

use crate::circuit::{Netlist, Quantity};
use crate::error::Result;
use crate::solver::{solve, MnaSystem, Solution};

/// A netlist with its MNA system solved once.
#[derive(Debug, Clone)]
pub struct CircuitAnalysis {
    netlist: Netlist,
    system: MnaSystem,
    solution: Solution,
}

impl CircuitAnalysis {
    /// Build and solve the MNA system of `netlist`.
    pub fn new(netlist: Netlist) -> Result<Self> {
        let span = info_span!(
            "analysis",
            nodes = netlist.node_count(),
            sources = netlist.source_count()
        );
        let _enter = span.enter();

        let system = MnaSystem::build(&netlist)?;
        let solution = solve(&system)?;
        Ok(Self {
            netlist,
            system,
            solution,
        })
    }

    pub fn netlist(&self) -> &Netlist {
        &self.netlist
    }

    pub fn system(&self) -> &MnaSystem {
        &self.system
    }

    pub fn solution(&self) -> &Solution {
        &self.solution
    }

    /// Transfer function from voltage source `input` to the `quantity` of
    /// element `output`.
    pub fn transfer_function(
        &self,
        input: &str,
        output: &str,
        quantity: Quantity,
        rounding: CoefficientRounding,
    ) -> Result<TransferFunction> {
        let source = self.netlist.input_source(input)?;
        let expression = extract(&self.solution, &self.netlist, output, quantity)?;
        debug!(input = %source.id, output, %quantity, "output extracted");
        compose(&expression, source.exact_value(), rounding)
    }
}
