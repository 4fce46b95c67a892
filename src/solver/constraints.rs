//! Voltage-source incidence blocks of the MNA system.

use crate::circuit::Netlist;
use crate::symbolic::{RationalFunction, SymMatrix};

/// Incidence blocks for the `M` voltage sources of an `N`-node netlist.
#[derive(Debug, Clone, PartialEq)]
pub struct Constraints {
    /// `N x M`: couples source currents into the node equations
    pub b: SymMatrix,
    /// `M x N`: one `V_origin - V_dest = E` row per source
    pub bt: SymMatrix,
    /// `M x M`, always zero (no dependent sources)
    pub zero: SymMatrix,
}

/// Build `B`, `Bᵗ` and the zero block.
///
/// For source `k` the origin row gets `B = -1, Bᵗ = 1` and the destination
/// row `B = 1, Bᵗ = -1`. Ground has no row. Sources are ordered by ordinal.
/// A source shorted onto a single node leaves its column empty, which the
/// solver then reports as singular.
pub fn build(netlist: &Netlist) -> Constraints {
    let n = netlist.node_count();
    let m = netlist.source_count();

    let mut b = SymMatrix::zeros(n, m);
    let mut bt = SymMatrix::zeros(m, n);
    let one = RationalFunction::one();
    let minus_one = -RationalFunction::one();

    for (k, source) in netlist.sources().enumerate() {
        if source.origin == source.dest {
            continue;
        }
        if let Some(row) = source.origin.matrix_index() {
            b.set(row, k, minus_one.clone());
            bt.set(k, row, one.clone());
        }
        if let Some(row) = source.dest.matrix_index() {
            b.set(row, k, one.clone());
            bt.set(k, row, minus_one.clone());
        }
    }

    Constraints {
        b,
        bt,
        zero: SymMatrix::zeros(m, m),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::circuit::validate;

    fn matrix(rows: &[&[i64]]) -> SymMatrix {
        SymMatrix::from_rows(
            rows.iter()
                .map(|r| r.iter().map(|&v| RationalFunction::integer(v)).collect())
                .collect(),
        )
        .unwrap()
    }

    #[test]
    fn test_two_sources() {
        let n = validate(
            &[1, 3, 1, 2, 3],
            &[2, 2, 0, 0, 0],
            &["R", "V", "V", "R", "R"],
            &[1.0, 5.0, 3.0, 1.0, 1.0],
        )
        .unwrap();
        let c = build(&n);
        assert_eq!(c.b, matrix(&[&[0, -1], &[1, 0], &[-1, 0]]));
        assert_eq!(c.bt, matrix(&[&[0, -1, 1], &[1, 0, 0]]));
        assert_eq!(c.zero, SymMatrix::zeros(2, 2));
    }

    #[test]
    fn test_ground_referenced_source() {
        let n = validate(&[1, 1], &[0, 0], &["R", "V"], &[1.0, 10.0]).unwrap();
        let c = build(&n);
        assert_eq!(c.b, matrix(&[&[-1]]));
        assert_eq!(c.bt, matrix(&[&[1]]));
    }

    #[test]
    fn test_shorted_source_has_empty_column() {
        let n = validate(&[1, 1], &[0, 1], &["R", "V"], &[1.0, 1.0]).unwrap();
        let c = build(&n);
        assert_eq!(c.b, matrix(&[&[0]]));
        assert_eq!(c.bt, matrix(&[&[0]]));
    }

    #[test]
    fn test_source_sharing_origin() {
        // One column per source: V1, V2
        let n = validate(&[2, 1, 1], &[0, 0, 2], &["R", "V", "V"], &[1.0, 1.0, 1.0]).unwrap();
        let c = build(&n);
        assert_eq!(c.b, matrix(&[&[-1, -1], &[0, 1]]));
    }
}
