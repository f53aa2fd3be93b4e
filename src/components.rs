//! Component models for the circuit graph.
//!
//! Five component kinds are supported:
//! - Wire: near-ideal conductor
//! - Resistor / Bulb: dissipative loads with a resistance value
//! - Battery: ideal DC voltage source (n1 is the positive terminal)
//! - Switch: conductor that can be opened and closed
//!
//! Every component can additionally burn out, after which it behaves as a
//! permanently open circuit until removed and recreated.

use crate::circuit::{ComponentId, NodeId};

/// Conductance used for wires and closed switches in the relaxation pass.
///
/// Approximates a near-zero-resistance short without making the
/// weighted average degenerate.
pub const WIRE_CONDUCTANCE: f64 = 1000.0;

/// Effective resistance of wires and closed switches when deriving current.
pub const WIRE_RESISTANCE: f64 = 0.001;

/// Smallest resistance accepted for a Resistor or Bulb.
pub const MIN_RESISTANCE: f64 = 1e-3;

/// The kind of a circuit component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComponentKind {
    Wire,
    Resistor,
    Bulb,
    Battery,
    Switch,
}

impl ComponentKind {
    /// Check if this kind dissipates power (has a meaningful resistance value).
    pub fn is_dissipative(&self) -> bool {
        matches!(self, ComponentKind::Resistor | ComponentKind::Bulb)
    }

    /// Check if this kind is a near-ideal conductor when live.
    pub fn is_conductor(&self) -> bool {
        matches!(self, ComponentKind::Wire | ComponentKind::Switch)
    }
}

/// A two-terminal circuit component.
///
/// Endpoint order is insignificant except for [`ComponentKind::Battery`],
/// where `n1` is the positive terminal and `n2` the negative.
#[derive(Debug, Clone)]
pub struct Component {
    pub id: ComponentId,
    pub kind: ComponentKind,
    pub n1: NodeId,
    pub n2: NodeId,
    /// Ohms for Resistor/Bulb, volts EMF for Battery, unused otherwise
    pub value: f64,
    /// Switch only; a closed switch conducts
    pub open: bool,
    /// Set by diagnostics when the component burns out; never cleared
    pub broken: bool,
}

impl Component {
    /// Create a new component. Resistance values are clamped to a positive
    /// floor; Battery EMF may be any real value.
    pub fn new(id: ComponentId, kind: ComponentKind, n1: NodeId, n2: NodeId, value: f64) -> Self {
        let value = if kind.is_dissipative() {
            value.max(MIN_RESISTANCE)
        } else {
            value
        };
        Self {
            id,
            kind,
            n1,
            n2,
            value,
            open: false,
            broken: false,
        }
    }

    /// Check if this component currently conducts.
    ///
    /// Broken components and open switches are electrically absent.
    pub fn is_live(&self) -> bool {
        !self.broken && !(self.kind == ComponentKind::Switch && self.open)
    }

    /// Conductance contributed to the relaxation average, if any.
    ///
    /// Batteries return `None`: they are handled structurally by the solver's
    /// propagation step, not as an edge weight.
    pub fn conductance(&self) -> Option<f64> {
        if !self.is_live() {
            return None;
        }
        match self.kind {
            ComponentKind::Wire | ComponentKind::Switch => Some(WIRE_CONDUCTANCE),
            ComponentKind::Resistor | ComponentKind::Bulb => Some(1.0 / self.value),
            ComponentKind::Battery => None,
        }
    }

    /// Effective resistance used when deriving current from a voltage drop.
    ///
    /// `None` for batteries (a source has no meaningful resistance reading)
    /// and for components that do not conduct.
    pub fn effective_resistance(&self) -> Option<f64> {
        if !self.is_live() {
            return None;
        }
        match self.kind {
            ComponentKind::Wire | ComponentKind::Switch => Some(WIRE_RESISTANCE),
            ComponentKind::Resistor | ComponentKind::Bulb => Some(self.value),
            ComponentKind::Battery => None,
        }
    }

    /// Get the endpoint opposite `node`, if `node` is an endpoint.
    pub fn other_end(&self, node: NodeId) -> Option<NodeId> {
        if node == self.n1 {
            Some(self.n2)
        } else if node == self.n2 {
            Some(self.n1)
        } else {
            None
        }
    }

    /// Check if `node` is one of this component's endpoints.
    pub fn touches(&self, node: NodeId) -> bool {
        node == self.n1 || node == self.n2
    }
}
