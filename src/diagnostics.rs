//! Network diagnostics: electrical quantities, failure policy, aggregates.
//!
//! Diagnostics runs once per tick, directly after the solve. It derives
//! current and power for every component from the solved voltages, raises
//! the network-wide short-circuit flag, and applies the burn-out transition
//! (Alive → Broken) to overloaded loads. Burn-out is the one deliberate side
//! effect in this crate: it is applied here as an explicit post-solve step so
//! the transition is observable as a discrete event, never inferred from
//! power readings at render time.

use log::info;

use crate::circuit::{CircuitGraph, ComponentId};
use crate::components::{Component, ComponentKind};
use crate::solver::Solution;

/// Current above which a wire or switch constitutes a short circuit (amps).
pub const SHORT_CIRCUIT_CURRENT: f64 = 100.0;

/// Dissipated power above which a load burns out (watts).
pub const BURN_OUT_POWER: f64 = 400.0;

/// Dissipated power above which a load is flagged as overheating (watts).
pub const OVERHEAT_POWER: f64 = 50.0;

/// Sentinel reported for unbounded quantities under short circuit.
pub const OVERLOAD: f64 = f64::INFINITY;

/// Electrical quantities derived for one component this tick.
#[derive(Debug, Clone)]
pub struct ComponentReading {
    pub id: ComponentId,
    pub kind: ComponentKind,
    /// Absolute voltage difference across the endpoints (volts)
    pub voltage_drop: f64,
    /// Amps; 0 for open or broken components, [`OVERLOAD`] for a shorted
    /// battery
    pub current: f64,
    /// Watts dissipated; nonzero only for Resistor/Bulb
    pub power: f64,
    /// Advisory flag, power above [`OVERHEAT_POWER`]
    pub overheating: bool,
    /// Mirrors the component's burn-out state after this tick's transition
    pub broken: bool,
}

/// Network-wide diagnostics for one tick, recomputed from scratch.
#[derive(Debug, Clone, Default)]
pub struct NetworkReport {
    pub readings: Vec<ComponentReading>,
    /// True iff any wire or closed switch carries more than
    /// [`SHORT_CIRCUIT_CURRENT`]
    pub is_short_circuit: bool,
    /// True iff any component is overheating
    pub is_overheating: bool,
    /// Sum of battery EMF magnitudes (volts)
    pub total_emf: f64,
    /// Sum of voltage drops across live dissipative components (volts)
    pub total_voltage_drop: f64,
    /// Total source power (watts); [`OVERLOAD`] under short circuit
    pub generated_power: f64,
    /// Total power dissipated in loads (watts)
    pub consumed_power: f64,
    /// Components that burned out this tick
    pub burned_out: Vec<ComponentId>,
}

impl NetworkReport {
    /// Look up this tick's reading for a component.
    pub fn reading(&self, id: ComponentId) -> Option<&ComponentReading> {
        self.readings.iter().find(|r| r.id == id)
    }

    /// This tick's current through a component, 0 if unknown.
    pub fn current(&self, id: ComponentId) -> f64 {
        self.reading(id).map(|r| r.current).unwrap_or(0.0)
    }
}

/// Signed current leaving the battery's positive terminal, summed over the
/// live non-battery components incident to it. Equals the load current in a
/// series loop.
fn battery_current(graph: &CircuitGraph, battery: &Component, solution: &Solution) -> f64 {
    graph
        .components_at(battery.n1)
        .filter(|c| c.id != battery.id && c.kind != ComponentKind::Battery)
        .filter_map(|c| {
            let r = c.effective_resistance()?;
            let other = c.other_end(battery.n1)?;
            Some(solution.drop_across(battery.n1, other) / r)
        })
        .sum()
}

/// Derive per-component readings and aggregates, and apply failure policy.
///
/// The only mutation is the irreversible burn-out transition on components
/// whose dissipated power exceeds [`BURN_OUT_POWER`]; everything else is a
/// pure function of the graph and the solution.
pub fn analyze(graph: &mut CircuitGraph, solution: &Solution) -> NetworkReport {
    let mut readings = Vec::with_capacity(graph.components().len());
    let mut is_short_circuit = false;

    for c in graph.components() {
        let mut reading = ComponentReading {
            id: c.id,
            kind: c.kind,
            voltage_drop: 0.0,
            current: 0.0,
            power: 0.0,
            overheating: false,
            broken: c.broken,
        };

        if c.is_live() {
            let drop = solution.drop_across(c.n1, c.n2).abs();
            match c.kind {
                ComponentKind::Wire | ComponentKind::Switch => {
                    reading.voltage_drop = drop;
                    reading.current = drop / crate::components::WIRE_RESISTANCE;
                    if reading.current > SHORT_CIRCUIT_CURRENT {
                        is_short_circuit = true;
                    }
                }
                ComponentKind::Resistor | ComponentKind::Bulb => {
                    reading.voltage_drop = drop;
                    reading.current = drop / c.value;
                    reading.power = drop * reading.current;
                    reading.overheating = reading.power > OVERHEAT_POWER;
                }
                ComponentKind::Battery => {
                    reading.voltage_drop = drop;
                    reading.current = battery_current(graph, c, solution);
                }
            }
        }

        readings.push(reading);
    }

    // Under short circuit a battery's current is unbounded; report the
    // sentinel instead of the finite estimate.
    if is_short_circuit {
        for r in readings
            .iter_mut()
            .filter(|r| r.kind == ComponentKind::Battery && !r.broken)
        {
            r.current = OVERLOAD;
        }
    }

    // Burn-out: false -> true only, applied after the solve as a discrete
    // transition. The component is an open circuit from the next solve on.
    let mut burned_out = Vec::new();
    for r in &mut readings {
        if r.kind.is_dissipative() && !r.broken && r.power > BURN_OUT_POWER {
            graph.break_component(r.id);
            r.broken = true;
            burned_out.push(r.id);
            info!("component {} burned out at {:.1} W", r.id, r.power);
        }
    }

    let mut total_emf = 0.0;
    let mut total_voltage_drop = 0.0;
    let mut consumed_power = 0.0;
    let mut generated_power = 0.0;
    for (r, c) in readings.iter().zip(graph.components()) {
        match c.kind {
            ComponentKind::Battery => {
                total_emf += c.value.abs();
                if !is_short_circuit {
                    generated_power += c.value.abs() * r.current;
                }
            }
            ComponentKind::Resistor | ComponentKind::Bulb => {
                total_voltage_drop += r.voltage_drop;
                consumed_power += r.power;
            }
            ComponentKind::Wire | ComponentKind::Switch => {}
        }
    }
    if is_short_circuit {
        generated_power = OVERLOAD;
    }

    let is_overheating = readings.iter().any(|r| r.overheating);

    NetworkReport {
        readings,
        is_short_circuit,
        is_overheating,
        total_emf,
        total_voltage_drop,
        generated_power,
        consumed_power,
        burned_out,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::circuit::Position;
    use crate::solver::{solve, SOLVER_PASSES};
    use approx::assert_relative_eq;

    /// Battery(9V) and one load of the given resistance across the same pair.
    fn loop_with_load(ohms: f64) -> (CircuitGraph, ComponentId, ComponentId) {
        let mut graph = CircuitGraph::new();
        let a = graph.add_node(Position::new(0.0, 0.0));
        let b = graph.add_node(Position::new(1.0, 0.0));
        let bat = graph
            .add_component(ComponentKind::Battery, a, b, 9.0)
            .unwrap();
        let load = graph
            .add_component(ComponentKind::Resistor, a, b, ohms)
            .unwrap();
        (graph, bat, load)
    }

    fn tick(graph: &mut CircuitGraph) -> NetworkReport {
        let solution = solve(graph, SOLVER_PASSES);
        analyze(graph, &solution)
    }

    #[test]
    fn test_series_loop_quantities() {
        let (mut graph, bat, load) = loop_with_load(10.0);
        let report = tick(&mut graph);

        let r = report.reading(load).unwrap();
        assert_relative_eq!(r.voltage_drop, 9.0, epsilon = 1e-9);
        assert_relative_eq!(r.current, 0.9, epsilon = 1e-9);
        assert_relative_eq!(r.power, 8.1, epsilon = 1e-9);
        assert!(!r.overheating && !r.broken);

        let b = report.reading(bat).unwrap();
        assert_relative_eq!(b.current, 0.9, epsilon = 1e-9);

        assert!(!report.is_short_circuit);
        assert!(!report.is_overheating);
        assert_relative_eq!(report.total_emf, 9.0);
        assert_relative_eq!(report.total_voltage_drop, 9.0, epsilon = 1e-9);
        assert_relative_eq!(report.consumed_power, 8.1, epsilon = 1e-9);
        assert_relative_eq!(report.generated_power, 8.1, epsilon = 1e-9);
    }

    #[test]
    fn test_overheat_below_burn_out() {
        let (mut graph, _, load) = loop_with_load(1.0);
        let report = tick(&mut graph);

        let r = report.reading(load).unwrap();
        assert_relative_eq!(r.power, 81.0, epsilon = 1e-6);
        assert!(r.overheating);
        assert!(!r.broken);
        assert!(report.is_overheating);
        assert!(report.burned_out.is_empty());
    }

    #[test]
    fn test_burn_out_above_limit() {
        let (mut graph, _, load) = loop_with_load(0.2);
        let report = tick(&mut graph);

        let r = report.reading(load).unwrap();
        assert_relative_eq!(r.power, 405.0, epsilon = 1e-6);
        assert!(r.broken);
        assert_eq!(report.burned_out, vec![load]);
        assert!(graph.component(load).unwrap().broken);

        // Next tick: the broken load is an open circuit, no current flows.
        let report = tick(&mut graph);
        let r = report.reading(load).unwrap();
        assert_relative_eq!(r.current, 0.0);
        assert_relative_eq!(r.power, 0.0);
        assert!(r.broken);
        assert!(report.burned_out.is_empty());
    }

    #[test]
    fn test_burn_out_is_monotonic() {
        let (mut graph, _, load) = loop_with_load(0.2);
        tick(&mut graph);
        assert!(graph.component(load).unwrap().broken);

        // Make the rest of the circuit harmless; the load stays broken.
        graph.set_value(load, 1000.0).unwrap();
        let a = graph.add_node(Position::new(2.0, 0.0));
        let b = graph.add_node(Position::new(3.0, 0.0));
        graph
            .add_component(ComponentKind::Resistor, a, b, 10.0)
            .unwrap();
        for _ in 0..3 {
            let report = tick(&mut graph);
            assert!(report.reading(load).unwrap().broken);
        }
    }

    #[test]
    fn test_wire_across_battery_is_short_circuit() {
        let mut graph = CircuitGraph::new();
        let a = graph.add_node(Position::new(0.0, 0.0));
        let b = graph.add_node(Position::new(1.0, 0.0));
        let bat = graph
            .add_component(ComponentKind::Battery, a, b, 9.0)
            .unwrap();
        let wire = graph.add_component(ComponentKind::Wire, a, b, 0.0).unwrap();

        let report = tick(&mut graph);
        assert!(report.is_short_circuit);
        assert!(report.current(wire) > SHORT_CIRCUIT_CURRENT);
        assert_eq!(report.current(bat), OVERLOAD);
        assert_eq!(report.generated_power, OVERLOAD);

        // Removing the offending wire clears the condition.
        graph.remove_component(wire).unwrap();
        let report = tick(&mut graph);
        assert!(!report.is_short_circuit);
        assert!(report.current(bat).is_finite());
    }

    #[test]
    fn test_open_components_read_zero() {
        let mut graph = CircuitGraph::new();
        let a = graph.add_node(Position::new(0.0, 0.0));
        let b = graph.add_node(Position::new(1.0, 0.0));
        graph
            .add_component(ComponentKind::Battery, a, b, 9.0)
            .unwrap();
        let sw = graph
            .add_component(ComponentKind::Switch, a, b, 0.0)
            .unwrap();
        graph.toggle_switch(sw);

        let report = tick(&mut graph);
        let r = report.reading(sw).unwrap();
        assert_relative_eq!(r.current, 0.0);
        assert_relative_eq!(r.voltage_drop, 0.0);
        assert!(!report.is_short_circuit);
    }
}
