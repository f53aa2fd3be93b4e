//! Fixed-pass Gauss–Seidel relaxation over node voltages.

use std::collections::{HashMap, HashSet};

use log::trace;

use crate::circuit::{CircuitGraph, NodeId};
use crate::components::ComponentKind;

use super::CONDUCTANCE_FLOOR;

/// A solved voltage assignment, one value per node.
///
/// Derived state: replaced wholesale by each solve, never patched. Nodes
/// absent from the map (e.g. after a reset) read as 0 V.
#[derive(Debug, Clone, Default)]
pub struct Solution {
    voltages: HashMap<NodeId, f64>,
}

impl Solution {
    /// Voltage at a node, 0 V if unknown.
    pub fn voltage(&self, node: NodeId) -> f64 {
        self.voltages.get(&node).copied().unwrap_or(0.0)
    }

    /// Voltage difference across a pair of nodes.
    pub fn drop_across(&self, n1: NodeId, n2: NodeId) -> f64 {
        self.voltage(n1) - self.voltage(n2)
    }

    /// Iterate over all solved (node, voltage) pairs.
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, f64)> + '_ {
        self.voltages.iter().map(|(&n, &v)| (n, v))
    }

    pub fn len(&self) -> usize {
        self.voltages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.voltages.is_empty()
    }
}

/// Compute an approximate nodal voltage assignment for the graph.
///
/// Warm-starts from the voltages stored on the nodes (the previous solve's
/// result), which speeds convergence and keeps readings visually stable
/// between ticks. Total: a graph with no components or no battery yields
/// all-zero voltages rather than an error.
pub fn solve(graph: &CircuitGraph, passes: usize) -> Solution {
    let mut voltages: HashMap<NodeId, f64> = graph
        .nodes()
        .iter()
        .map(|n| (n.id, n.voltage))
        .collect();

    let Some(ground) = graph.ground_node() else {
        return Solution { voltages };
    };

    let mut residual = 0.0f64;
    for _ in 0..passes {
        // Ground and battery-propagated terminals are pinned for the rest of
        // this pass; the relaxation sweep must not disturb them.
        let mut pinned: HashSet<NodeId> = HashSet::new();
        voltages.insert(ground, 0.0);
        pinned.insert(ground);

        // Batteries fix a voltage *difference*, propagated outward from
        // whichever terminal is already pinned. A battery with neither
        // terminal pinned resolves in a later pass once connectivity to
        // ground has propagated that far.
        for c in graph.components() {
            if c.kind != ComponentKind::Battery || !c.is_live() {
                continue;
            }
            let n1_pinned = pinned.contains(&c.n1);
            let n2_pinned = pinned.contains(&c.n2);
            if n2_pinned && !n1_pinned {
                let v = voltages.get(&c.n2).copied().unwrap_or(0.0) + c.value;
                voltages.insert(c.n1, v);
                pinned.insert(c.n1);
            } else if n1_pinned && !n2_pinned {
                let v = voltages.get(&c.n1).copied().unwrap_or(0.0) - c.value;
                voltages.insert(c.n2, v);
                pinned.insert(c.n2);
            }
        }

        // Gauss–Seidel sweep: each unpinned node becomes the
        // conductance-weighted average of its live neighbors, using
        // neighbor values updated earlier in the same sweep.
        residual = 0.0;
        for node in graph.nodes() {
            if pinned.contains(&node.id) {
                continue;
            }
            let mut weighted = 0.0;
            let mut total_g = CONDUCTANCE_FLOOR;
            for c in graph.components_at(node.id) {
                let Some(g) = c.conductance() else { continue };
                let Some(other) = c.other_end(node.id) else { continue };
                weighted += g * voltages.get(&other).copied().unwrap_or(0.0);
                total_g += g;
            }
            let next = weighted / total_g;
            let prev = voltages.insert(node.id, next).unwrap_or(0.0);
            residual = residual.max((next - prev).abs());
        }
    }

    trace!(
        "relaxation: {} nodes, {} passes, final residual {:.3e}",
        voltages.len(),
        passes,
        residual
    );

    Solution { voltages }
}
