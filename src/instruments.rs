//! Measurement instruments: voltmeter, ammeter, ohmmeter.
//!
//! All three are strictly observers: pure functions of the graph, the latest
//! solution and the latest report. Probe placement and hit-testing live in
//! the rendering collaborator, which hands the snapped node or component id
//! in here. Instruments run on the render cadence, not the solver's.

use std::fmt;

use crate::circuit::{CircuitGraph, ComponentId, NodeId};
use crate::components::ComponentKind;
use crate::diagnostics::NetworkReport;
use crate::solver::Solution;

/// Voltmeter: potential difference between the red and black probes.
///
/// `None` until both probes are snapped to a node.
pub fn voltmeter(solution: &Solution, red: Option<NodeId>, black: Option<NodeId>) -> Option<f64> {
    Some(solution.voltage(red?) - solution.voltage(black?))
}

/// Ammeter: current through the probed component this tick.
///
/// Open and broken components read 0.
pub fn ammeter(report: &NetworkReport, component: ComponentId) -> f64 {
    report.current(component)
}

/// What an ohmmeter shows for a probed component.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OhmmeterReading {
    /// Nominal resistance in ohms (0 for a wire)
    Ohms(f64),
    /// Open switch or burned-out component
    Infinite,
    /// Batteries: resistance is not a meaningful reading for a source
    NotApplicable,
}

impl fmt::Display for OhmmeterReading {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OhmmeterReading::Ohms(r) => write!(f, "{r:.2} Ω"),
            OhmmeterReading::Infinite => write!(f, "∞ (open)"),
            OhmmeterReading::NotApplicable => write!(f, "N/A"),
        }
    }
}

/// Ohmmeter: nominal resistance of the probed component.
///
/// `None` if the id does not exist.
pub fn ohmmeter(graph: &CircuitGraph, component: ComponentId) -> Option<OhmmeterReading> {
    let c = graph.component(component)?;
    let reading = if !c.is_live() {
        OhmmeterReading::Infinite
    } else {
        match c.kind {
            ComponentKind::Wire | ComponentKind::Switch => OhmmeterReading::Ohms(0.0),
            ComponentKind::Resistor | ComponentKind::Bulb => OhmmeterReading::Ohms(c.value),
            ComponentKind::Battery => OhmmeterReading::NotApplicable,
        }
    };
    Some(reading)
}
