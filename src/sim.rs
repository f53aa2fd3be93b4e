//! Main simulation interface and tick scheduling.
//!
//! [`Simulation`] owns the circuit graph together with the latest solution
//! and diagnostics report. The host drives it from its render loop via
//! [`Simulation::advance`], which converts arbitrary frame deltas into whole
//! fixed-cadence solver ticks, keeping solve cost bounded and independent of
//! the display refresh rate. Graph edits go through [`Simulation::graph_mut`]
//! between ticks; within a tick the solver always sees a consistent graph.

use std::time::Duration;

use log::{debug, warn};

use crate::circuit::{CircuitGraph, ComponentId, NodeId};
use crate::diagnostics::{analyze, NetworkReport};
use crate::instruments::{self, OhmmeterReading};
use crate::solver::{solve, Solution, SOLVER_PASSES};

/// Wall-clock interval between solver ticks.
pub const TICK_INTERVAL: Duration = Duration::from_millis(50);

/// Configuration for the simulation.
#[derive(Debug, Clone)]
pub struct SimConfig {
    /// Wall-clock interval between solver ticks.
    pub tick_interval: Duration,
    /// Relaxation passes per solve.
    pub passes: usize,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            tick_interval: TICK_INTERVAL,
            passes: SOLVER_PASSES,
        }
    }
}

impl SimConfig {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the tick interval.
    pub fn with_tick_interval(mut self, tick_interval: Duration) -> Self {
        self.tick_interval = tick_interval;
        self
    }

    /// Set the relaxation pass count.
    ///
    /// More passes settle large graphs further per tick at proportional cost;
    /// the default is the contract value.
    pub fn with_passes(mut self, passes: usize) -> Self {
        self.passes = passes;
        self
    }
}

/// The interactive circuit simulation.
pub struct Simulation {
    graph: CircuitGraph,
    solution: Solution,
    report: NetworkReport,
    config: SimConfig,
    /// Render time not yet consumed by whole ticks
    accumulator: Duration,
}

impl Default for Simulation {
    fn default() -> Self {
        Self::new()
    }
}

impl Simulation {
    /// Create an empty simulation with default configuration.
    pub fn new() -> Self {
        Self::with_config(SimConfig::default())
    }

    /// Create an empty simulation with custom configuration.
    pub fn with_config(config: SimConfig) -> Self {
        Self {
            graph: CircuitGraph::new(),
            solution: Solution::default(),
            report: NetworkReport::default(),
            config,
            accumulator: Duration::ZERO,
        }
    }

    /// The circuit graph, read-only.
    pub fn graph(&self) -> &CircuitGraph {
        &self.graph
    }

    /// The circuit graph, for edits between ticks.
    pub fn graph_mut(&mut self) -> &mut CircuitGraph {
        &mut self.graph
    }

    /// The latest solved voltages.
    pub fn solution(&self) -> &Solution {
        &self.solution
    }

    /// The latest diagnostics report.
    pub fn report(&self) -> &NetworkReport {
        &self.report
    }

    /// Latest solved voltage at a node, 0 V if unknown.
    pub fn node_voltage(&self, node: NodeId) -> f64 {
        self.solution.voltage(node)
    }

    /// Run one solver tick: solve, store voltages, run diagnostics.
    pub fn tick(&mut self) {
        self.solution = solve(&self.graph, self.config.passes);
        for (id, v) in self.solution.iter() {
            self.graph.store_voltage(id, v);
        }

        let was_shorted = self.report.is_short_circuit;
        self.report = analyze(&mut self.graph, &self.solution);
        if self.report.is_short_circuit && !was_shorted {
            warn!("short circuit detected");
        } else if !self.report.is_short_circuit && was_shorted {
            debug!("short circuit cleared");
        }
    }

    /// Consume render-loop time, running as many whole ticks as fit.
    ///
    /// Returns the number of ticks run. Leftover time stays in the
    /// accumulator for the next frame.
    pub fn advance(&mut self, elapsed: Duration) -> usize {
        self.accumulator += elapsed;
        let mut ticks = 0;
        while self.accumulator >= self.config.tick_interval {
            self.accumulator -= self.config.tick_interval;
            self.tick();
            ticks += 1;
        }
        if ticks > 0 {
            debug!("advanced {ticks} tick(s), {:?} carried over", self.accumulator);
        }
        ticks
    }

    /// Clear the circuit and all derived state.
    pub fn reset(&mut self) {
        self.graph.reset();
        self.solution = Solution::default();
        self.report = NetworkReport::default();
        self.accumulator = Duration::ZERO;
    }

    // ============ Instrument readers (render cadence) ============

    /// Voltmeter reading between two snapped probe nodes.
    pub fn voltmeter(&self, red: Option<NodeId>, black: Option<NodeId>) -> Option<f64> {
        instruments::voltmeter(&self.solution, red, black)
    }

    /// Ammeter reading for a probed component.
    pub fn ammeter(&self, component: ComponentId) -> f64 {
        instruments::ammeter(&self.report, component)
    }

    /// Ohmmeter reading for a probed component.
    pub fn ohmmeter(&self, component: ComponentId) -> Option<OhmmeterReading> {
        instruments::ohmmeter(&self.graph, component)
    }
}
