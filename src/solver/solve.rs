//! Exact symbolic solve of an MNA system.

use std::fmt;

use tracing::{debug, warn};

use crate::circuit::{ElementId, NodeId, Unknown};
use crate::error::{Result, TfError};
use crate::symbolic::RationalFunction;

use super::mna::MnaSystem;

/// Every unknown of an MNA system with its reduced rational function.
#[derive(Debug, Clone, PartialEq)]
pub struct Solution {
    entries: Vec<(Unknown, RationalFunction)>,
}

impl Solution {
    /// Look up one unknown.
    pub fn get(&self, unknown: &Unknown) -> Option<&RationalFunction> {
        self.entries
            .iter()
            .find(|(u, _)| u == unknown)
            .map(|(_, value)| value)
    }

    /// Voltage of `node`; ground is the constant zero.
    pub fn node_voltage(&self, node: NodeId) -> Result<RationalFunction> {
        if node.is_ground() {
            return Ok(RationalFunction::zero());
        }
        self.get(&Unknown::NodeVoltage(node))
            .cloned()
            .ok_or_else(|| TfError::internal(format!("no solution entry for node {}", node)))
    }

    /// Branch current of voltage source `id`.
    pub fn source_current(&self, id: ElementId) -> Result<RationalFunction> {
        self.get(&Unknown::SourceCurrent(id))
            .cloned()
            .ok_or_else(|| TfError::internal(format!("no solution entry for I_{}", id)))
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Unknown, &RationalFunction)> {
        self.entries.iter().map(|(u, v)| (u, v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl fmt::Display for Solution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (unknown, value) in &self.entries {
            writeln!(f, "{} = {}", unknown, value)?;
        }
        Ok(())
    }
}

/// Solve `system` over `Q(s)`.
///
/// A matrix whose determinant is identically zero yields
/// [`TfError::SingularSystem`]; there is no retry at this level.
pub fn solve(system: &MnaSystem) -> Result<Solution> {
    let values = system.matrix.solve(&system.rhs).map_err(|err| {
        if matches!(err, TfError::SingularSystem) {
            warn!(size = system.size(), "MNA matrix is singular");
        }
        err
    })?;

    debug!(unknowns = values.len(), "MNA system solved");
    Ok(Solution {
        entries: system.unknowns.iter().copied().zip(values).collect(),
    })
}
