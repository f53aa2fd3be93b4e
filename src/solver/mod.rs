//! Relaxation voltage solver.
//!
//! This module provides the numerical engine of the lab: a fixed-point
//! (Gauss–Seidel style) relaxation over node voltages rather than a direct
//! linear solve.
//!
//! ## Relaxation scheme
//!
//! Each pass:
//! 1. Pin the ground node to 0 V.
//! 2. Sweep batteries in creation order; any battery with exactly one
//!    terminal already pinned this pass propagates its EMF to the other
//!    terminal and pins it.
//! 3. Relax every unpinned node to the conductance-weighted average of its
//!    live neighbors, with a small floor added to the denominator so
//!    isolated nodes decay to zero instead of dividing by zero.
//!
//! The pass count is fixed, not convergence-tested: it bounds worst-case
//! solve cost per tick and is empirically sufficient for workbench-sized
//! graphs. The result approximates Kirchhoff's current law; it is a fast,
//! visually stable estimate, not a certified solution.

mod relaxation;

pub use relaxation::{solve, Solution};

/// Number of relaxation passes per solve.
pub const SOLVER_PASSES: usize = 100;

/// Conductance floor added to every node's denominator.
pub const CONDUCTANCE_FLOOR: f64 = 1e-4;
