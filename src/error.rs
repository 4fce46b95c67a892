//! Error types for the nodal transfer-function engine.
//!
//! This module provides a unified error type [`TfError`] that covers every
//! failure the pipeline can report: netlist validation, symbolic solving,
//! output selection, and front-end input handling.
//!
//! Each variant maps onto a stable [`ErrorCode`] so front-ends can decide
//! between re-acquiring a netlist and halting.

use std::fmt;

use thiserror::Error;

/// Result type alias using [`TfError`].
pub type Result<T> = std::result::Result<T, TfError>;

/// Stable classification of every [`TfError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    IncompleteEntry,
    MissingSource,
    NegativeNode,
    NonFiniteValue,
    NonPositivePassive,
    ZeroValue,
    SingularSystem,
    UnrecognizedElement,
    ElementNotFound,
    NotAVoltageSource,
    ParseError,
    IoError,
    Internal,
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ErrorCode::IncompleteEntry => "INCOMPLETE_ENTRY",
            ErrorCode::MissingSource => "MISSING_SOURCE",
            ErrorCode::NegativeNode => "NEGATIVE_NODE",
            ErrorCode::NonFiniteValue => "NON_FINITE_VALUE",
            ErrorCode::NonPositivePassive => "NON_POSITIVE_PASSIVE",
            ErrorCode::ZeroValue => "ZERO_VALUE",
            ErrorCode::SingularSystem => "SINGULAR_SYSTEM",
            ErrorCode::UnrecognizedElement => "UNRECOGNIZED_ELEMENT",
            ErrorCode::ElementNotFound => "ELEMENT_NOT_FOUND",
            ErrorCode::NotAVoltageSource => "NOT_A_VOLTAGE_SOURCE",
            ErrorCode::ParseError => "PARSE_ERROR",
            ErrorCode::IoError => "IO_ERROR",
            ErrorCode::Internal => "INTERNAL",
        };
        f.write_str(name)
    }
}

/// Unified error type for all netlist analysis operations.
#[derive(Error, Debug)]
pub enum TfError {
    // ============ Netlist Validation Errors ============
    /// Some rows carry no recognizable element type
    #[error("You have not entered all identifiers ({identifiers} identified elements for {values} values)")]
    IncompleteEntry { identifiers: usize, values: usize },

    /// The netlist has no independent voltage source to act as input
    #[error("Netlist contains no voltage source")]
    MissingSource,

    /// A node index below zero
    #[error("Negative value of node ({node}) in row {row}")]
    NegativeNode { row: usize, node: i64 },

    /// NaN or infinite element value
    #[error("Non-finite value {value} in row {row}")]
    NonFiniteValue { row: usize, value: f64 },

    /// Negative resistance, inductance or capacitance
    #[error("Non-positive value of R/L/C: {element} = {value}")]
    NonPositivePassive { element: String, value: f64 },

    /// Element value of exactly zero
    #[error("Zero value for element {element}")]
    ZeroValue { element: String },

    // ============ Solver Errors ============
    /// The MNA matrix has an identically zero determinant
    #[error("Error in circuit: MNA system is singular (conflicting or redundant voltage sources, or a floating node)")]
    SingularSystem,

    // ============ Selection Errors ============
    /// Identifier tag does not name any known element kind
    #[error("Unrecognized element identifier '{identifier}'")]
    UnrecognizedElement { identifier: String },

    /// Well-formed identifier that is not part of the netlist
    #[error("Element '{identifier}' not found in netlist")]
    ElementNotFound { identifier: String },

    /// Transfer-function input must be an independent voltage source
    #[error("Element '{identifier}' is not a voltage source")]
    NotAVoltageSource { identifier: String },

    // ============ Front-end Errors ============
    /// Malformed netlist text
    #[error("Parse error at line {line}: {message}")]
    ParseError { line: usize, message: String },

    /// Error reading a netlist file
    #[error("Failed to read netlist file '{path}': {source}")]
    FileReadError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Error talking to the user or another collaborator
    #[error("Front-end error: {message}")]
    FrontendError { message: String },

    /// Broken internal contract (mismatched block dimensions, etc.)
    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl TfError {
    /// Create a parse error
    pub fn parse(line: usize, message: impl Into<String>) -> Self {
        Self::ParseError {
            line,
            message: message.into(),
        }
    }

    /// Create an internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Create a front-end error
    pub fn frontend(message: impl Into<String>) -> Self {
        Self::FrontendError {
            message: message.into(),
        }
    }

    /// Stable code for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            TfError::IncompleteEntry { .. } => ErrorCode::IncompleteEntry,
            TfError::MissingSource => ErrorCode::MissingSource,
            TfError::NegativeNode { .. } => ErrorCode::NegativeNode,
            TfError::NonFiniteValue { .. } => ErrorCode::NonFiniteValue,
            TfError::NonPositivePassive { .. } => ErrorCode::NonPositivePassive,
            TfError::ZeroValue { .. } => ErrorCode::ZeroValue,
            TfError::SingularSystem => ErrorCode::SingularSystem,
            TfError::UnrecognizedElement { .. } => ErrorCode::UnrecognizedElement,
            TfError::ElementNotFound { .. } => ErrorCode::ElementNotFound,
            TfError::NotAVoltageSource { .. } => ErrorCode::NotAVoltageSource,
            TfError::ParseError { .. } => ErrorCode::ParseError,
            TfError::FileReadError { .. } | TfError::FrontendError { .. } => ErrorCode::IoError,
            TfError::Internal { .. } => ErrorCode::Internal,
        }
    }

    /// Whether the pipeline may recover by acquiring a new netlist.
    ///
    /// Only internal contract violations are fatal.
    pub fn is_recoverable(&self) -> bool {
        !matches!(
            self.code(),
            ErrorCode::UnrecognizedElement | ErrorCode::Internal
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_and_recoverability() {
        assert_eq!(TfError::MissingSource.code(), ErrorCode::MissingSource);
        assert!(TfError::SingularSystem.is_recoverable());
        assert!(TfError::ZeroValue { element: "R1".into() }.is_recoverable());

        let fatal = TfError::UnrecognizedElement {
            identifier: "X1".into(),
        };
        assert_eq!(fatal.code(), ErrorCode::UnrecognizedElement);
        assert!(!fatal.is_recoverable());
        assert!(!TfError::internal("bad block").is_recoverable());
    }

    #[test]
    fn test_code_display() {
        assert_eq!(ErrorCode::NonPositivePassive.to_string(), "NON_POSITIVE_PASSIVE");
        assert_eq!(ErrorCode::SingularSystem.to_string(), "SINGULAR_SYSTEM");
    }

    #[test]
    fn test_messages() {
        let err = TfError::parse(3, "expected 4 fields");
        assert_eq!(err.to_string(), "Parse error at line 3: expected 4 fields");
        let err = TfError::NonPositivePassive {
            element: "R1".into(),
            value: -10.0,
        };
        assert_eq!(err.to_string(), "Non-positive value of R/L/C: R1 = -10");
    }
}
