//! Circuit graph representation.
//!
//! This module provides the authoritative topology model the rest of the
//! crate operates on. The [`CircuitGraph`] struct holds all nodes and
//! components and exposes the mutation API used by the UI collaborator.

mod graph;
mod types;

pub use graph::{CircuitGraph, Node};
pub use types::*;
