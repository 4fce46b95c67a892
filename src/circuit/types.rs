//! Core types for netlist representation.

use std::fmt;
use std::str::FromStr;

use crate::error::TfError;

/// A node in the circuit. Node 0 is always ground.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub usize);

impl NodeId {
    /// The ground node (always index 0).
    pub const GROUND: NodeId = NodeId(0);

    /// Check if this is the ground node.
    pub fn is_ground(&self) -> bool {
        self.0 == 0
    }

    /// Row of this node in the conductance matrix. Returns None for ground.
    pub fn matrix_index(&self) -> Option<usize> {
        self.0.checked_sub(1)
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_ground() {
            write!(f, "GND")
        } else {
            write!(f, "N{}", self.0)
        }
    }
}

/// The four element kinds a netlist may contain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ElementKind {
    /// Independent voltage source
    VoltageSource,
    /// Resistor
    Resistor,
    /// Inductor
    Inductor,
    /// Capacitor
    Capacitor,
}

impl ElementKind {
    /// Identifier tag letter.
    pub fn tag(&self) -> char {
        match self {
            Self::VoltageSource => 'V',
            Self::Resistor => 'R',
            Self::Inductor => 'L',
            Self::Capacitor => 'C',
        }
    }

    /// Parse a kind from its identifier tag letter.
    pub fn from_tag(tag: char) -> Option<Self> {
        match tag.to_ascii_uppercase() {
            'V' => Some(Self::VoltageSource),
            'R' => Some(Self::Resistor),
            'L' => Some(Self::Inductor),
            'C' => Some(Self::Capacitor),
            _ => None,
        }
    }

    /// Parse a kind from a front-end type name.
    ///
    /// Accepts the entry-form labels ("Voltage Source in Volts",
    /// "Resistance in Ohm", ...), the short names ("VoltageSource",
    /// "Resistance", "Resistor", ...) and bare tag letters. Matching ignores
    /// case and whitespace; anything after the name other than a unit
    /// suffix is rejected.
    pub fn from_type_name(name: &str) -> Option<Self> {
        let key: String = name
            .chars()
            .filter(|c| !c.is_whitespace() && *c != '_' && *c != '-')
            .collect::<String>()
            .to_ascii_lowercase();

        if key.len() == 1 {
            return key.chars().next().and_then(Self::from_tag);
        }

        const NAMES: [(&str, ElementKind); 8] = [
            ("voltagesource", ElementKind::VoltageSource),
            ("voltage", ElementKind::VoltageSource),
            ("resistance", ElementKind::Resistor),
            ("resistor", ElementKind::Resistor),
            ("inductance", ElementKind::Inductor),
            ("inductor", ElementKind::Inductor),
            ("capacitance", ElementKind::Capacitor),
            ("capacitor", ElementKind::Capacitor),
        ];

        // Either the bare name or the name followed by its unit ("...inohm")
        NAMES
            .iter()
            .find(|(name, _)| {
                key.strip_prefix(name)
                    .map_or(false, |rest| rest.is_empty() || rest.starts_with("in"))
            })
            .map(|(_, kind)| *kind)
    }

    /// Whether this is a passive (R, L, C) element.
    pub fn is_passive(&self) -> bool {
        !matches!(self, Self::VoltageSource)
    }

    /// Human-readable type name, as accepted by [`ElementKind::from_type_name`].
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::VoltageSource => "VoltageSource",
            Self::Resistor => "Resistance",
            Self::Inductor => "Inductance",
            Self::Capacitor => "Capacitance",
        }
    }
}

/// Element identifier: kind plus 1-based ordinal within that kind (`R1`, `V2`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId {
    pub kind: ElementKind,
    pub ordinal: usize,
}

impl ElementId {
    pub fn new(kind: ElementKind, ordinal: usize) -> Self {
        Self { kind, ordinal }
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.kind.tag(), self.ordinal)
    }
}

impl FromStr for ElementId {
    type Err = TfError;

    /// Parse `R1`, `v2`, ... An unknown tag letter or a malformed ordinal is
    /// an [`TfError::UnrecognizedElement`].
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let unrecognized = || TfError::UnrecognizedElement {
            identifier: s.to_string(),
        };

        let mut chars = s.chars();
        let kind = chars
            .next()
            .and_then(ElementKind::from_tag)
            .ok_or_else(unrecognized)?;
        let ordinal: usize = chars.as_str().parse().map_err(|_| unrecognized())?;
        if ordinal == 0 {
            return Err(unrecognized());
        }
        Ok(Self { kind, ordinal })
    }
}

/// Which quantity of an element to observe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Quantity {
    /// Voltage across the element, origin minus destination
    Voltage,
    /// Current through the element, origin to destination
    Current,
}

impl Quantity {
    /// Single-letter prefix used in output selections (`V:R1`, `I:L1`).
    pub fn prefix(&self) -> char {
        match self {
            Self::Voltage => 'V',
            Self::Current => 'I',
        }
    }
}

impl FromStr for Quantity {
    type Err = TfError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "v" | "voltage" => Ok(Self::Voltage),
            "i" | "current" => Ok(Self::Current),
            other => Err(TfError::parse(0, format!("unknown output quantity '{}'", other))),
        }
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Voltage => write!(f, "voltage"),
            Self::Current => write!(f, "current"),
        }
    }
}

/// Unknown of the MNA system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Unknown {
    /// Voltage of a non-ground node
    NodeVoltage(NodeId),
    /// Branch current through a voltage source
    SourceCurrent(ElementId),
}

impl fmt::Display for Unknown {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NodeVoltage(node) => write!(f, "V_{}", node.0),
            Self::SourceCurrent(id) => write!(f, "I_{}", id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_names() {
        let parse = ElementKind::from_type_name;
        assert_eq!(parse("Voltage Source in Volts"), Some(ElementKind::VoltageSource));
        assert_eq!(parse("VoltageSource"), Some(ElementKind::VoltageSource));
        assert_eq!(parse("Resistance in Ohm"), Some(ElementKind::Resistor));
        assert_eq!(parse("inductor"), Some(ElementKind::Inductor));
        assert_eq!(parse("Capacitance in Farad"), Some(ElementKind::Capacitor));
        assert_eq!(parse("c"), Some(ElementKind::Capacitor));
        assert_eq!(parse(""), None);
        assert_eq!(parse("Diode"), None);
    }

    #[test]
    fn test_type_names_with_trailing_text_rejected() {
        let parse = ElementKind::from_type_name;
        assert_eq!(parse("VoltageProbe"), None);
        assert_eq!(parse("Resistancex"), None);
        assert_eq!(parse("Capacitors"), None);
    }

    #[test]
    fn test_element_id_round_trip() {
        let id: ElementId = "L2".parse().unwrap();
        assert_eq!(id, ElementId::new(ElementKind::Inductor, 2));
        assert_eq!(id.to_string(), "L2");
        assert_eq!("v1".parse::<ElementId>().unwrap().to_string(), "V1");
    }

    #[test]
    fn test_unrecognized_identifiers() {
        for bad in ["X1", "R", "R0", "Rx", ""] {
            let err = bad.parse::<ElementId>().unwrap_err();
            assert!(matches!(err, TfError::UnrecognizedElement { .. }), "{}", bad);
        }
    }

    #[test]
    fn test_unknown_display() {
        assert_eq!(Unknown::NodeVoltage(NodeId(3)).to_string(), "V_3");
        let src = ElementId::new(ElementKind::VoltageSource, 1);
        assert_eq!(Unknown::SourceCurrent(src).to_string(), "I_V1");
    }

    #[test]
    fn test_node_index() {
        assert_eq!(NodeId::GROUND.matrix_index(), None);
        assert_eq!(NodeId(4).matrix_index(), Some(3));
        assert_eq!(NodeId::GROUND.to_string(), "GND");
    }
}
