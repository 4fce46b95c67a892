//! Netlist text format.
//!
//! A netlist is a table with one element per line, the same columns the
//! entry form collects:
//!
//! ```text
//! netlist = { line }
//! line    = comment | header | row | empty
//! comment = ('#' | ';') { any_char }
//! header  = non-numeric first field, first table line only
//! row     = from sep to sep type sep value
//! sep     = ',' | whitespace
//!
//! from, to = integer            (0 is ground)
//! type     = type name | tag letter
//! value    = number [unit_suffix]
//! unit_suffix = 'p' | 'n' | 'u' | 'm' | 'k' | 'M' | 'G'
//! ```
//!
//! When a line contains a comma the fields are comma-separated and a type
//! name may contain spaces (`Voltage Source in Volts`).
//!
//! # Example
//!
//! ```text
//! # Series RLC driven by a 10 V source
//! From,To,Type,Value
//! 1,2,Resistance,10
//! 2,3,Inductance,10m
//! 3,0,Capacitance,1u
//! 1,0,VoltageSource,10
//! ```
//!
//! Parsing only checks syntax. Type names, node ranges and values are
//! checked by [`crate::circuit::validate`].

mod value;

pub use value::parse_value;

use tracing::debug;

use crate::circuit::RawNetlist;
use crate::error::{Result, TfError};

/// Parse netlist text into raw parallel arrays.
pub fn parse_netlist(input: &str) -> Result<RawNetlist> {
    let mut raw = RawNetlist::new();
    let mut seen_table_line = false;

    for (index, line) in input.lines().enumerate() {
        let line_no = index + 1;
        let content = strip_comment(line).trim();
        if content.is_empty() {
            continue;
        }

        let fields = split_fields(content);
        let first_table_line = !seen_table_line;
        seen_table_line = true;

        if first_table_line && is_header(&fields) {
            debug!(line = line_no, "skipping header row");
            continue;
        }

        if fields.len() != 4 {
            return Err(TfError::parse(
                line_no,
                format!("expected 4 fields (from, to, type, value), found {}", fields.len()),
            ));
        }

        let origin = parse_node(fields[0], line_no)?;
        let dest = parse_node(fields[1], line_no)?;
        let value = parse_value(fields[3])
            .ok_or_else(|| TfError::parse(line_no, format!("invalid value '{}'", fields[3])))?;

        raw.push(origin, dest, fields[2], value);
    }

    debug!(rows = raw.len(), "netlist text parsed");
    Ok(raw)
}

/// Read and parse a netlist file.
#[cfg(feature = "cli")]
pub fn parse_file(path: &std::path::Path) -> Result<RawNetlist> {
    let content = std::fs::read_to_string(path).map_err(|e| TfError::FileReadError {
        path: path.display().to_string(),
        source: e,
    })?;
    parse_netlist(&content)
}

fn strip_comment(line: &str) -> &str {
    match line.find(|c: char| c == '#' || c == ';') {
        Some(pos) => &line[..pos],
        None => line,
    }
}

fn split_fields(content: &str) -> Vec<&str> {
    if content.contains(',') {
        content.split(',').map(str::trim).collect()
    } else {
        content.split_whitespace().collect()
    }
}

fn is_header(fields: &[&str]) -> bool {
    fields
        .first()
        .map_or(false, |f| f.parse::<i64>().is_err() && parse_value(f).is_none())
}

fn parse_node(field: &str, line: usize) -> Result<i64> {
    field
        .parse()
        .map_err(|_| TfError::parse(line, format!("invalid node '{}'", field)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::circuit::validate_raw;
    use crate::error::ErrorCode;

    const RLC: &str = "\
# Series RLC driven by a 10 V source
From,To,Type,Value
1,2,Resistance,10
2,3,Inductance,10m
3,0,Capacitance,1u   ; film cap
1,0,VoltageSource,10
";

    #[test]
    fn test_csv_with_header() {
        let raw = parse_netlist(RLC).unwrap();
        assert_eq!(raw.origin, vec![1, 2, 3, 1]);
        assert_eq!(raw.dest, vec![2, 3, 0, 0]);
        assert_eq!(raw.types, vec!["Resistance", "Inductance", "Capacitance", "VoltageSource"]);
        assert_eq!(raw.values, vec![10.0, 0.01, 1e-6, 10.0]);

        let netlist = validate_raw(&raw).unwrap();
        assert_eq!(netlist.node_count(), 3);
    }

    #[test]
    fn test_whitespace_rows() {
        let raw = parse_netlist("1 0 R 1k\n\n  1 0 V 5\n").unwrap();
        assert_eq!(raw.types, vec!["R", "V"]);
        assert_eq!(raw.values, vec![1000.0, 5.0]);
    }

    #[test]
    fn test_type_names_with_spaces() {
        let text = "1, 0, Voltage Source in Volts, 10\n1, 0, Resistance in Ohm, 5";
        let raw = parse_netlist(text).unwrap();
        assert_eq!(raw.types[0], "Voltage Source in Volts");
        assert!(validate_raw(&raw).is_ok());
    }

    #[test]
    fn test_negative_node_left_to_validation() {
        let raw = parse_netlist("1,-2,R,10\n1,0,V,1").unwrap();
        let err = validate_raw(&raw).unwrap_err();
        assert_eq!(err.code(), ErrorCode::NegativeNode);
    }

    #[test]
    fn test_parse_errors_carry_line_numbers() {
        let err = parse_netlist("# header comment\n1,0,R,10\n1,0,V").unwrap_err();
        assert!(matches!(err, TfError::ParseError { line: 3, .. }));

        let err = parse_netlist("1,0,R,ten").unwrap_err();
        assert!(matches!(err, TfError::ParseError { line: 1, .. }));

        // Only the first table line may be a header
        let err = parse_netlist("1,0,R,10\nx,0,V,1").unwrap_err();
        assert!(matches!(err, TfError::ParseError { line: 2, .. }));
        assert_eq!(err.code(), ErrorCode::ParseError);
    }
}
