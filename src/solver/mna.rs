//! MNA system assembly.

use std::fmt;

use tracing::{debug, warn};

use crate::circuit::{Netlist, NodeId, Unknown};
use crate::error::{Result, TfError};
use crate::symbolic::{RationalFunction, SymMatrix};

use super::constraints::{self, Constraints};
use super::conductance;

/// The augmented system `A x = z`.
#[derive(Debug, Clone, PartialEq)]
pub struct MnaSystem {
    /// `[V_1..V_N, I_V1..I_VM]`
    pub unknowns: Vec<Unknown>,
    /// `[[G, B], [Bᵗ, 0]]`
    pub matrix: SymMatrix,
    /// `N` zeros followed by the source values
    pub rhs: Vec<RationalFunction>,
}

impl MnaSystem {
    /// Build every block from `netlist` and assemble them.
    ///
    /// A node with no incident element leaves an all-zero row, so the
    /// system is reported singular before any matrix is allocated.
    pub fn build(netlist: &Netlist) -> Result<Self> {
        if let Some(node) = netlist.unconnected_node() {
            warn!(%node, nodes = netlist.node_count(), "node has no incident element");
            return Err(TfError::SingularSystem);
        }
        let (g, _) = conductance::build(netlist);
        let blocks = constraints::build(netlist);
        assemble(&g, &blocks, netlist)
    }

    /// System dimension `N + M`.
    pub fn size(&self) -> usize {
        self.unknowns.len()
    }
}

/// Join the conductance matrix and the constraint blocks into an
/// [`MnaSystem`].
pub fn assemble(g: &SymMatrix, blocks: &Constraints, netlist: &Netlist) -> Result<MnaSystem> {
    let n = netlist.node_count();
    let m = netlist.source_count();
    if g.rows() != n || g.cols() != n {
        return Err(TfError::internal(format!(
            "conductance matrix is {}x{}, expected {}x{}",
            g.rows(),
            g.cols(),
            n,
            n
        )));
    }

    let matrix = SymMatrix::from_blocks(g, &blocks.b, &blocks.bt, &blocks.zero)?;

    let unknowns: Vec<Unknown> = (1..=n)
        .map(|i| Unknown::NodeVoltage(NodeId(i)))
        .chain(netlist.sources().map(|e| Unknown::SourceCurrent(e.id)))
        .collect();

    let rhs: Vec<RationalFunction> = std::iter::repeat(RationalFunction::zero())
        .take(n)
        .chain(netlist.sources().map(|e| RationalFunction::constant(e.exact_value().clone())))
        .collect();

    debug!(nodes = n, sources = m, size = unknowns.len(), "MNA system assembled");
    Ok(MnaSystem {
        unknowns,
        matrix,
        rhs,
    })
}

impl fmt::Display for MnaSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (r, unknown) in self.unknowns.iter().enumerate() {
            let cells: Vec<String> = self.matrix.row(r).iter().map(|e| e.to_string()).collect();
            writeln!(f, "[{}] {} = {}", cells.join(", "), unknown, self.rhs[r])?;
        }
        Ok(())
    }
}
