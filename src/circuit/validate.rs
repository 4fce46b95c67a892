//! Netlist validation and normalization.

use std::collections::HashMap;

use tracing::debug;

use super::netlist::{Element, Netlist, RawNetlist};
use super::types::{ElementId, ElementKind, NodeId};
use crate::error::{Result, TfError};
use crate::symbolic::scalar_from_f64;

/// Validate parallel netlist arrays and build a [`Netlist`].
///
/// Identifiers are assigned per kind in order of appearance (the first
/// resistor is `R1`, the second `R2`, ...). Checks run in this order and the
/// first failure is returned:
///
/// 1. every row must carry a recognizable type and both nodes
///    ([`TfError::IncompleteEntry`])
/// 2. at least one voltage source ([`TfError::MissingSource`])
/// 3. no negative node index ([`TfError::NegativeNode`])
/// 4. every value finite ([`TfError::NonFiniteValue`])
/// 5. per element: zero values ([`TfError::ZeroValue`]) and negative passive
///    values ([`TfError::NonPositivePassive`])
///
/// A voltage source with a negative value is then silently flipped: the
/// magnitude is kept and origin/destination swap.
pub fn validate<S: AsRef<str>>(
    origin: &[i64],
    dest: &[i64],
    types: &[S],
    values: &[f64],
) -> Result<Netlist> {
    // Rows past the last value are not part of the netlist
    let ids = assign_identifiers(&types[..values.len().min(types.len())]);
    let identified = ids.iter().flatten().count();

    if identified < values.len() || origin.len() < values.len() || dest.len() < values.len() {
        return Err(TfError::IncompleteEntry {
            identifiers: identified.min(origin.len()).min(dest.len()),
            values: values.len(),
        });
    }

    if !ids
        .iter()
        .flatten()
        .any(|id| id.kind == ElementKind::VoltageSource)
    {
        return Err(TfError::MissingSource);
    }

    for (row, (&o, &d)) in origin.iter().zip(dest).enumerate().take(values.len()) {
        if o < 0 || d < 0 {
            return Err(TfError::NegativeNode {
                row: row + 1,
                node: o.min(d),
            });
        }
    }

    if let Some((row, &value)) = values.iter().enumerate().find(|(_, v)| !v.is_finite()) {
        return Err(TfError::NonFiniteValue { row: row + 1, value });
    }

    let mut elements = Vec::with_capacity(values.len());
    for (row, &value) in values.iter().enumerate() {
        let id = ids[row].ok_or(TfError::IncompleteEntry {
            identifiers: row,
            values: values.len(),
        })?;

        if value == 0.0 {
            return Err(TfError::ZeroValue {
                element: id.to_string(),
            });
        }
        if id.kind.is_passive() && value < 0.0 {
            return Err(TfError::NonPositivePassive {
                element: id.to_string(),
                value,
            });
        }

        let (mut o, mut d, mut v) = (origin[row] as usize, dest[row] as usize, value);
        if id.kind == ElementKind::VoltageSource && v < 0.0 {
            debug!(element = %id, "normalizing negative source polarity");
            v = v.abs();
            std::mem::swap(&mut o, &mut d);
        }

        let exact = scalar_from_f64(v).ok_or(TfError::NonFiniteValue { row: row + 1, value })?;
        elements.push(Element::new(id, NodeId(o), NodeId(d), v, exact));
    }

    let netlist = Netlist::from_elements(elements);
    debug!(
        elements = netlist.elements().len(),
        nodes = netlist.node_count(),
        sources = netlist.source_count(),
        "netlist validated"
    );
    Ok(netlist)
}

/// Validate a [`RawNetlist`].
pub fn validate_raw(raw: &RawNetlist) -> Result<Netlist> {
    validate(&raw.origin, &raw.dest, &raw.types, &raw.values)
}

/// Map each row's type name to an identifier. Rows with an unknown type map
/// to `None` and get no ordinal, as an entry form with an unselected type.
fn assign_identifiers<S: AsRef<str>>(types: &[S]) -> Vec<Option<ElementId>> {
    let mut counters: HashMap<ElementKind, usize> = HashMap::new();
    types
        .iter()
        .map(|t| {
            ElementKind::from_type_name(t.as_ref()).map(|kind| {
                let ordinal = counters.entry(kind).or_insert(0);
                *ordinal += 1;
                ElementId::new(kind, *ordinal)
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;

    const RLCV: [&str; 4] = ["Resistance", "Inductance", "Capacitance", "VoltageSource"];

    fn code(result: Result<Netlist>) -> ErrorCode {
        result.unwrap_err().code()
    }

    #[test]
    fn test_identifiers_by_order_of_appearance() {
        let types = ["Resistance", "VoltageSource", "Resistance", "Capacitance", "VoltageSource"];
        let values = [1.0, 5.0, 2.0, 1e-6, 3.0];
        let n = validate(&[1, 1, 2, 2, 3], &[2, 0, 0, 3, 0], &types, &values).unwrap();
        let ids: Vec<String> = n.elements().iter().map(|e| e.id.to_string()).collect();
        assert_eq!(ids, ["R1", "V1", "R2", "C1", "V2"]);
        assert_eq!(n.node_count(), 3);
        assert_eq!(n.source_count(), 2);
    }

    #[test]
    fn test_negative_node() {
        let result = validate(&[1, -2, 3, 1], &[2, 3, 0, 0], &RLCV, &[10.0, 0.01, 0.001, 10.0]);
        assert_eq!(code(result), ErrorCode::NegativeNode);
    }

    #[test]
    fn test_zero_passive_value() {
        let result = validate(&[1, 2, 3, 1], &[2, 3, 0, 0], &RLCV, &[0.0, 0.01, 0.001, 10.0]);
        assert_eq!(code(result), ErrorCode::ZeroValue);
    }

    #[test]
    fn test_negative_passive_value() {
        let result = validate(&[1, 2, 3, 1], &[2, 3, 0, 0], &RLCV, &[-10.0, 0.01, 0.001, 10.0]);
        assert_eq!(code(result), ErrorCode::NonPositivePassive);
    }

    #[test]
    fn test_zero_source_value() {
        let result = validate(&[1, 2, 3, 1], &[2, 3, 0, 0], &RLCV, &[10.0, 0.01, 0.001, 0.0]);
        assert_eq!(code(result), ErrorCode::ZeroValue);
    }

    #[test]
    fn test_incomplete_entry() {
        let types = ["Resistance", "Inductance", "VoltageSource"];
        let result = validate(&[1, 2, 3, 1], &[2, 3, 0, 0], &types, &[10.0, 0.01, 0.001, 10.0]);
        assert_eq!(code(result), ErrorCode::IncompleteEntry);

        // An unselected type in the entry form counts as a missing identifier
        let types = ["Resistance", "", "Capacitance", "VoltageSource"];
        let result = validate(&[1, 2, 3, 1], &[2, 3, 0, 0], &types, &[10.0, 0.01, 0.001, 10.0]);
        assert_eq!(code(result), ErrorCode::IncompleteEntry);
    }

    #[test]
    fn test_missing_source_fails_first() {
        // Negative node and zero value are present too, but the source check comes first
        let types = ["Resistance", "Capacitance"];
        let result = validate(&[1, -1], &[0, 0], &types, &[0.0, 1e-6]);
        assert_eq!(code(result), ErrorCode::MissingSource);
    }

    #[test]
    fn test_source_only_in_rows_without_values() {
        let types = ["Resistance", "VoltageSource"];
        let result = validate(&[1], &[0], &types, &[1.0]);
        assert_eq!(code(result), ErrorCode::MissingSource);

        // Trailing rows are ignored once a source is in range
        let n = validate(&[1, 1, 2], &[0, 0, 0], &["V", "R", "V"], &[1.0, 2.0]).unwrap();
        assert_eq!(n.source_count(), 1);
        assert_eq!(n.elements().len(), 2);
    }

    #[test]
    fn test_non_finite_value() {
        let result = validate(&[1, 1], &[0, 0], &["Resistance", "VoltageSource"], &[f64::NAN, 1.0]);
        assert_eq!(code(result), ErrorCode::NonFiniteValue);
    }

    #[test]
    fn test_negative_source_normalized() {
        let n = validate(&[2, 1], &[0, 2], &["VoltageSource", "Resistance"], &[-5.0, 1.0]).unwrap();
        let v1 = n.element("V1").unwrap();
        assert_eq!((v1.origin, v1.dest, v1.value), (NodeId(0), NodeId(2), 5.0));
    }

    #[test]
    fn test_revalidation_is_idempotent() {
        let n = validate(&[1, 2, 3, 1], &[2, 3, 0, 0], &RLCV, &[10.0, 0.01, 1e-6, -10.0]).unwrap();
        let again = validate_raw(&n.to_raw()).unwrap();
        assert_eq!(n, again);
    }
}
