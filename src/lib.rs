//! # Voltlab Core
//!
//! Interactive DC circuit solver for an electronics lab simulation.
//!
//! This library provides:
//! - A user-editable resistive-network multigraph (wires, resistors, bulbs,
//!   batteries, switches)
//! - A fixed-pass relaxation solver computing node voltages every tick
//! - Diagnostics deriving current/power, detecting short circuits, and
//!   burning out overloaded components
//! - Read-only measurement instruments (voltmeter, ammeter, ohmmeter)
//!
//! ## Architecture
//!
//! The library is organized into several modules:
//!
//! - [`circuit`] - Circuit graph representation and the mutation API
//! - [`components`] - Component kinds and their electrical rules
//! - [`solver`] - Fixed-point relaxation over node voltages
//! - [`diagnostics`] - Derived quantities and the failure policy
//! - [`instruments`] - Stateless probes over the solved state
//! - [`sim`] - Tick scheduling and the top-level [`Simulation`]
//!
//! ## Usage
//!
//! ```
//! use std::time::Duration;
//! use voltlab_core::circuit::Position;
//! use voltlab_core::components::ComponentKind;
//! use voltlab_core::Simulation;
//!
//! let mut sim = Simulation::new();
//! let a = sim.graph_mut().add_node(Position::new(0.0, 0.0));
//! let b = sim.graph_mut().add_node(Position::new(40.0, 0.0));
//! sim.graph_mut().add_component(ComponentKind::Battery, a, b, 9.0).unwrap();
//! let bulb = sim.graph_mut().add_component(ComponentKind::Bulb, a, b, 10.0).unwrap();
//!
//! // The render loop feeds elapsed frame time; whole 50 ms ticks run inside.
//! sim.advance(Duration::from_millis(50));
//! assert!((sim.ammeter(bulb) - 0.9).abs() < 1e-6);
//! ```
//!
//! ## Solving Method
//!
//! The solver is deliberately an approximation: a fixed number of
//! Gauss–Seidel relaxation passes over the node voltages, with batteries
//! propagated structurally and ground pinned to 0 V each pass. That bounds
//! per-tick cost and stays visually stable under live editing, at the price
//! of not satisfying Kirchhoff's current law exactly. See [`solver`] for
//! details.

pub mod circuit;
pub mod components;
pub mod diagnostics;
pub mod error;
pub mod instruments;
pub mod sim;
pub mod solver;

// Re-export main types for convenience
pub use circuit::CircuitGraph;
pub use error::{LabError, Result};
pub use sim::{SimConfig, Simulation, TICK_INTERVAL};
