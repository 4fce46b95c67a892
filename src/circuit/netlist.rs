//! Validated netlist and its raw acquisition form.

use std::collections::BTreeSet;
use std::fmt;

use super::types::{ElementId, ElementKind, NodeId};
use crate::error::{Result, TfError};
use crate::symbolic::{RationalFunction, Scalar};

/// Parallel arrays as supplied by an acquisition front-end.
///
/// Nothing here is checked yet; [`super::validate`] turns it into a
/// [`Netlist`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawNetlist {
    /// Origin node of each row
    pub origin: Vec<i64>,
    /// Destination node of each row
    pub dest: Vec<i64>,
    /// Element type name of each row ("Resistance", "VoltageSource", ...)
    pub types: Vec<String>,
    /// Element value of each row (ohm, henry, farad or volt)
    pub values: Vec<f64>,
}

impl RawNetlist {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one row.
    pub fn push(&mut self, origin: i64, dest: i64, type_name: impl Into<String>, value: f64) {
        self.origin.push(origin);
        self.dest.push(dest);
        self.types.push(type_name.into());
        self.values.push(value);
    }

    /// Builder-style [`RawNetlist::push`].
    pub fn with(
        mut self,
        origin: i64,
        dest: i64,
        type_name: impl Into<String>,
        value: f64,
    ) -> Self {
        self.push(origin, dest, type_name, value);
        self
    }

    /// Number of value entries.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// A validated circuit element.
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    pub id: ElementId,
    pub origin: NodeId,
    pub dest: NodeId,
    /// Value in SI units; always positive for passives, non-negative for sources
    pub value: f64,
    exact: Scalar,
}

impl Element {
    pub(crate) fn new(
        id: ElementId,
        origin: NodeId,
        dest: NodeId,
        value: f64,
        exact: Scalar,
    ) -> Self {
        Self {
            id,
            origin,
            dest,
            value,
            exact,
        }
    }

    pub fn kind(&self) -> ElementKind {
        self.id.kind
    }

    /// Exact rational image of `value`.
    pub fn exact_value(&self) -> &Scalar {
        &self.exact
    }

    /// Whether either terminal sits on `node`.
    pub fn touches(&self, node: NodeId) -> bool {
        self.origin == node || self.dest == node
    }

    /// Admittance in the s-domain: `1/R`, `1/(sL)` or `sC`.
    /// Voltage sources have none.
    pub fn admittance(&self) -> Option<RationalFunction> {
        let value = RationalFunction::constant(self.exact.clone());
        match self.kind() {
            ElementKind::Resistor => value.inv(),
            ElementKind::Inductor => (&value * &RationalFunction::s()).inv(),
            ElementKind::Capacitor => Some(&value * &RationalFunction::s()),
            ElementKind::VoltageSource => None,
        }
    }
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} -> {} ({})", self.id, self.origin, self.dest, self.value)
    }
}

/// An immutable, validated netlist.
#[derive(Debug, Clone, PartialEq)]
pub struct Netlist {
    elements: Vec<Element>,
    num_nodes: usize,
    num_sources: usize,
}

impl Netlist {
    pub(crate) fn from_elements(elements: Vec<Element>) -> Self {
        let num_nodes = elements
            .iter()
            .map(|e| e.origin.0.max(e.dest.0))
            .max()
            .unwrap_or(0);
        let num_sources = elements
            .iter()
            .filter(|e| e.kind() == ElementKind::VoltageSource)
            .count();
        Self {
            elements,
            num_nodes,
            num_sources,
        }
    }

    /// Elements in entry order.
    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    /// Highest node index referenced (`N`), ground excluded.
    pub fn node_count(&self) -> usize {
        self.num_nodes
    }

    /// Lowest node in `1..=N` that no element touches.
    ///
    /// Only nodes that appear in the netlist are visited, so a stray large
    /// index costs nothing here.
    pub fn unconnected_node(&self) -> Option<NodeId> {
        let touched: BTreeSet<usize> = self
            .elements
            .iter()
            .flat_map(|e| [e.origin.0, e.dest.0])
            .filter(|&n| n != 0)
            .collect();
        (1..=self.num_nodes)
            .zip(touched)
            .find(|&(expected, node)| expected != node)
            .map(|(expected, _)| NodeId(expected))
    }

    /// Number of voltage sources (`M`).
    pub fn source_count(&self) -> usize {
        self.num_sources
    }

    /// Voltage sources ordered by ordinal (`V1`, `V2`, ...).
    pub fn sources(&self) -> impl Iterator<Item = &Element> {
        let mut sources: Vec<&Element> = self
            .elements
            .iter()
            .filter(|e| e.kind() == ElementKind::VoltageSource)
            .collect();
        sources.sort_by_key(|e| e.id.ordinal);
        sources.into_iter()
    }

    /// Passive elements in entry order.
    pub fn passives(&self) -> impl Iterator<Item = &Element> {
        self.elements.iter().filter(|e| e.kind().is_passive())
    }

    /// Find an element by identifier.
    pub fn find(&self, id: ElementId) -> Option<&Element> {
        self.elements.iter().find(|e| e.id == id)
    }

    /// Find an element by its textual identifier.
    pub fn element(&self, identifier: &str) -> Result<&Element> {
        let id: ElementId = identifier.parse()?;
        self.find(id).ok_or_else(|| TfError::ElementNotFound {
            identifier: id.to_string(),
        })
    }

    /// Look up a voltage source suitable as transfer-function input.
    pub fn input_source(&self, identifier: &str) -> Result<&Element> {
        let element = self.element(identifier)?;
        if element.kind() != ElementKind::VoltageSource {
            return Err(TfError::NotAVoltageSource {
                identifier: element.id.to_string(),
            });
        }
        Ok(element)
    }

    /// Convert back to parallel arrays, e.g. to re-validate.
    pub fn to_raw(&self) -> RawNetlist {
        self.elements.iter().fold(RawNetlist::new(), |raw, e| {
            raw.with(e.origin.0 as i64, e.dest.0 as i64, e.kind().type_name(), e.value)
        })
    }
}

impl fmt::Display for Netlist {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for element in &self.elements {
            writeln!(f, "{}", element)?;
        }
        Ok(())
    }
}
