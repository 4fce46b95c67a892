//! Nodal admittance (conductance) matrix.

use crate::circuit::{Netlist, NodeId};
use crate::symbolic::{RationalFunction, SymMatrix};

/// Diagonal entry for `node`: the sum of admittances of every passive
/// element incident to it.
pub fn diagonal(node: NodeId, netlist: &Netlist) -> RationalFunction {
    netlist
        .passives()
        .filter(|e| e.touches(node))
        .filter_map(|e| e.admittance())
        .fold(RationalFunction::zero(), |acc, y| &acc + &y)
}

/// Off-diagonal contribution of elements running exactly `from -> to`:
/// the negated sum of their admittances. The scan is directional.
pub fn offdiagonal(from: NodeId, to: NodeId, netlist: &Netlist) -> RationalFunction {
    netlist
        .passives()
        .filter(|e| e.origin == from && e.dest == to)
        .filter_map(|e| e.admittance())
        .fold(RationalFunction::zero(), |acc, y| &acc - &y)
}

/// Build the `N x N` conductance matrix. Returns it together with `N`.
///
/// Off-diagonal entries collect elements entered in either orientation and
/// are mirrored into both halves, so the matrix is always symmetric.
pub fn build(netlist: &Netlist) -> (SymMatrix, usize) {
    let n = netlist.node_count();
    let mut matrix = SymMatrix::zeros(n, n);

    for i in 0..n {
        let node_i = NodeId(i + 1);
        matrix.set(i, i, diagonal(node_i, netlist));

        for j in (i + 1)..n {
            let node_j = NodeId(j + 1);
            let entry =
                &offdiagonal(node_i, node_j, netlist) + &offdiagonal(node_j, node_i, netlist);
            matrix.set(i, j, entry.clone());
            matrix.set(j, i, entry);
        }
    }

    (matrix, n)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::circuit::validate;
    use crate::symbolic::scalar_from_f64;

    fn c(v: f64) -> RationalFunction {
        RationalFunction::from_f64(v).unwrap()
    }

    /// `a + b/s + c*s`
    fn y(a: f64, b: f64, cap: f64) -> RationalFunction {
        let s = RationalFunction::s();
        let mut out = c(a);
        if b != 0.0 {
            out = &out + &c(b).checked_div(&s).unwrap();
        }
        if cap != 0.0 {
            out = &out + &(&c(cap) * &s);
        }
        out
    }

    fn matrix(rows: Vec<Vec<RationalFunction>>) -> SymMatrix {
        SymMatrix::from_rows(rows).unwrap()
    }

    fn netlist(o: &[i64], d: &[i64], e: &[&str], v: &[f64]) -> Netlist {
        validate(o, d, e, v).unwrap()
    }

    #[test]
    fn test_resistive_network_with_floating_source() {
        let n = netlist(&[1, 0, 2, 1], &[0, 2, 3, 3], &["R", "R", "R", "V"], &[0.2, 0.2, 0.2, 5.0]);
        let (g, size) = build(&n);
        assert_eq!(size, 3);
        assert_eq!(
            g,
            matrix(vec![
                vec![c(5.0), c(0.0), c(0.0)],
                vec![c(0.0), c(10.0), c(-5.0)],
                vec![c(0.0), c(-5.0), c(5.0)],
            ])
        );
    }

    #[test]
    fn test_series_rlc() {
        let n = netlist(
            &[1, 2, 3, 1],
            &[2, 3, 0, 0],
            &["R", "L", "C", "V"],
            &[5.0, 10.0, 1e-6, 5.0],
        );
        let (g, _) = build(&n);
        assert_eq!(
            g,
            matrix(vec![
                vec![y(0.2, 0.0, 0.0), y(-0.2, 0.0, 0.0), c(0.0)],
                vec![y(-0.2, 0.0, 0.0), y(0.2, 0.1, 0.0), y(0.0, -0.1, 0.0)],
                vec![c(0.0), y(0.0, -0.1, 0.0), y(0.0, 0.1, 1e-6)],
            ])
        );
    }

    #[test]
    fn test_parallel_elements_to_ground() {
        let n = netlist(
            &[1, 2, 3, 3, 3, 1],
            &[2, 3, 0, 0, 0, 0],
            &["R", "C", "C", "L", "R", "V"],
            &[10.0, 1e-6, 1e-6, 10.0, 5.0, 5.0],
        );
        let (g, _) = build(&n);
        assert_eq!(
            g,
            matrix(vec![
                vec![c(0.1), c(-0.1), c(0.0)],
                vec![c(-0.1), y(0.1, 0.0, 1e-6), y(0.0, 0.0, -1e-6)],
                vec![c(0.0), y(0.0, 0.0, -1e-6), y(0.2, 0.1, 2e-6)],
            ])
        );
    }

    #[test]
    fn test_four_node_ladder() {
        let n = netlist(
            &[1, 2, 2, 3, 3, 4, 1],
            &[2, 3, 0, 0, 4, 0, 0],
            &["R", "R", "L", "C", "R", "R", "V"],
            &[10.0, 10.0, 10.0, 1e-6, 10.0, 10.0, 5.0],
        );
        let (g, size) = build(&n);
        assert_eq!(size, 4);
        assert_eq!(
            g,
            matrix(vec![
                vec![c(0.1), c(-0.1), c(0.0), c(0.0)],
                vec![c(-0.1), y(0.2, 0.1, 0.0), c(-0.1), c(0.0)],
                vec![c(0.0), c(-0.1), y(0.2, 0.0, 1e-6), c(-0.1)],
                vec![c(0.0), c(0.0), c(-0.1), c(0.2)],
            ])
        );
    }

    #[test]
    fn test_reversed_orientation_parallel_elements() {
        // R1 runs 1 -> 2, R2 runs 2 -> 1; both must land off-diagonal
        let n = netlist(&[1, 2, 1, 2], &[2, 1, 0, 0], &["R", "R", "V", "R"], &[2.0, 2.0, 1.0, 1.0]);
        assert!(offdiagonal(NodeId(1), NodeId(2), &n) == c(-0.5));
        assert!(offdiagonal(NodeId(2), NodeId(1), &n) == c(-0.5));

        let (g, _) = build(&n);
        assert_eq!(g.get(0, 1), &c(-1.0));
        assert_eq!(g.get(1, 0), &c(-1.0));
        assert_eq!(g.get(0, 0), &c(1.0));
        assert_eq!(g.get(1, 1), &c(2.0));
    }

    #[test]
    fn test_resistor_only_sums() {
        let n = netlist(&[1, 1, 1, 1], &[0, 0, 2, 0], &["R", "R", "R", "V"], &[4.0, 4.0, 8.0, 1.0]);
        assert_eq!(diagonal(NodeId(1), &n), c(0.625));
        let exact = scalar_from_f64(-0.125).unwrap();
        assert_eq!(offdiagonal(NodeId(1), NodeId(2), &n), RationalFunction::constant(exact));
    }
}
