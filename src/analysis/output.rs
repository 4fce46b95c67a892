//! Voltage or current of any element as a function of `s`.

use crate::circuit::{ElementKind, Netlist, Quantity};
use crate::error::{Result, TfError};
use crate::solver::Solution;
use crate::symbolic::RationalFunction;

/// Express the selected quantity of element `identifier` in terms of the
/// solved unknowns.
///
/// The voltage is `V[origin] - V[dest]` with ground at zero. The current runs
/// origin to destination: `vdiff/R`, `vdiff/(L s)` or `vdiff C s` for
/// passives, and the solved branch current `I_Vk` for sources.
pub fn extract(
    solution: &Solution,
    netlist: &Netlist,
    identifier: &str,
    quantity: Quantity,
) -> Result<RationalFunction> {
    let element = netlist.element(identifier)?;
    let vdiff = solution.node_voltage(element.origin)? - solution.node_voltage(element.dest)?;

    if quantity == Quantity::Voltage {
        return Ok(vdiff);
    }

    let value = element.exact_value();
    let s = RationalFunction::s();
    Ok(match element.kind() {
        ElementKind::Resistor => vdiff.scale(&value.recip()),
        ElementKind::Inductor => vdiff
            .checked_div(&s.scale(value))
            .ok_or_else(|| TfError::internal(format!("zero inductance on {}", element.id)))?,
        ElementKind::Capacitor => (&vdiff * &s).scale(value),
        ElementKind::VoltageSource => solution.source_current(element.id)?,
    })
}
