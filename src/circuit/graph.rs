//! Circuit graph structure.
//!
//! [`CircuitGraph`] is the single source of truth for topology. The UI
//! collaborator edits it between solver ticks; the solver and diagnostics
//! read it (and write solved voltages / burn-out flags back through the
//! crate-internal mutators). Nodes and components live in creation-order
//! arenas keyed by monotonically allocated ids, so removing a component can
//! never invalidate another component's endpoints.

use crate::components::{Component, ComponentKind};
use crate::error::{LabError, Result};

use super::types::{ComponentId, NodeId, Position};

/// A junction point in the circuit.
#[derive(Debug, Clone)]
pub struct Node {
    pub id: NodeId,
    /// Grid position, opaque to the solver
    pub pos: Position,
    /// Latest solved voltage; also the warm start for the next solve
    pub voltage: f64,
}

/// An undirected multigraph of nodes and typed components.
#[derive(Debug, Default)]
pub struct CircuitGraph {
    nodes: Vec<Node>,
    components: Vec<Component>,
    next_node_id: usize,
    next_component_id: usize,
}

impl CircuitGraph {
    /// Create an empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    // ============ Mutation API (UI collaborator) ============

    /// Add a node at the given position.
    pub fn add_node(&mut self, pos: Position) -> NodeId {
        let id = NodeId(self.next_node_id);
        self.next_node_id += 1;
        self.nodes.push(Node {
            id,
            pos,
            voltage: 0.0,
        });
        id
    }

    /// Add a component between two existing, distinct nodes.
    ///
    /// Self-loops and dangling endpoints are rejected here so the solver
    /// never has to discover them mid-iteration.
    pub fn add_component(
        &mut self,
        kind: ComponentKind,
        n1: NodeId,
        n2: NodeId,
        value: f64,
    ) -> Result<ComponentId> {
        if n1 == n2 {
            return Err(LabError::self_loop(n1));
        }
        for node in [n1, n2] {
            if self.node(node).is_none() {
                return Err(LabError::node_not_found(node));
            }
        }
        let id = ComponentId(self.next_component_id);
        self.next_component_id += 1;
        self.components.push(Component::new(id, kind, n1, n2, value));
        Ok(id)
    }

    /// Remove a component. Its endpoint nodes remain.
    pub fn remove_component(&mut self, id: ComponentId) -> Result<()> {
        let idx = self
            .component_index(id)
            .ok_or_else(|| LabError::component_not_found(id))?;
        self.components.remove(idx);
        Ok(())
    }

    /// Toggle a switch between open and closed. No-op for other kinds.
    pub fn toggle_switch(&mut self, id: ComponentId) {
        if let Some(c) = self.component_mut(id) {
            if c.kind == ComponentKind::Switch {
                c.open = !c.open;
            }
        }
    }

    /// Set a component's value.
    ///
    /// Resistor/Bulb values are clamped to a positive floor; Battery EMF may
    /// be any real value; Wire/Switch values are ignored.
    pub fn set_value(&mut self, id: ComponentId, value: f64) -> Result<()> {
        let c = self
            .component_mut(id)
            .ok_or_else(|| LabError::component_not_found(id))?;
        match c.kind {
            ComponentKind::Resistor | ComponentKind::Bulb => {
                c.value = value.max(crate::components::MIN_RESISTANCE);
            }
            ComponentKind::Battery => c.value = value,
            ComponentKind::Wire | ComponentKind::Switch => {}
        }
        Ok(())
    }

    /// Clear all nodes and components.
    pub fn reset(&mut self) {
        self.nodes.clear();
        self.components.clear();
    }

    // ============ Structural queries ============

    /// All nodes in creation order.
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// All components in creation order.
    pub fn components(&self) -> &[Component] {
        &self.components
    }

    /// Look up a node by id.
    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.iter().find(|n| n.id == id)
    }

    /// Look up a component by id.
    pub fn component(&self, id: ComponentId) -> Option<&Component> {
        self.components.iter().find(|c| c.id == id)
    }

    /// Components with an endpoint at `node`.
    pub fn components_at(&self, node: NodeId) -> impl Iterator<Item = &Component> {
        self.components.iter().filter(move |c| c.touches(node))
    }

    /// The first battery in creation order, if any.
    pub fn first_battery(&self) -> Option<&Component> {
        self.components
            .iter()
            .find(|c| c.kind == ComponentKind::Battery)
    }

    /// The ground reference for the next solve.
    ///
    /// Contract: the negative terminal (`n2`) of the first battery in
    /// creation order, else the first node in creation order. Behavior with
    /// more than one independent source is deliberately not generalized.
    pub fn ground_node(&self) -> Option<NodeId> {
        self.first_battery()
            .map(|b| b.n2)
            .or_else(|| self.nodes.first().map(|n| n.id))
    }

    // ============ Crate-internal mutators (solver / diagnostics) ============

    /// Write solved voltages back onto the nodes. Called once per tick after
    /// the solve; the stored values seed the next solve's warm start.
    pub(crate) fn store_voltage(&mut self, id: NodeId, voltage: f64) {
        if let Some(n) = self.nodes.iter_mut().find(|n| n.id == id) {
            n.voltage = voltage;
        }
    }

    /// Mark a component as burned out. Irreversible within a session.
    pub(crate) fn break_component(&mut self, id: ComponentId) {
        if let Some(c) = self.components.iter_mut().find(|c| c.id == id) {
            c.broken = true;
        }
    }

    fn component_index(&self, id: ComponentId) -> Option<usize> {
        self.components.iter().position(|c| c.id == id)
    }

    fn component_mut(&mut self, id: ComponentId) -> Option<&mut Component> {
        self.components.iter_mut().find(|c| c.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn two_nodes(graph: &mut CircuitGraph) -> (NodeId, NodeId) {
        let a = graph.add_node(Position::new(0.0, 0.0));
        let b = graph.add_node(Position::new(1.0, 0.0));
        (a, b)
    }

    #[test]
    fn test_self_loop_rejected() {
        let mut graph = CircuitGraph::new();
        let a = graph.add_node(Position::default());
        let err = graph
            .add_component(ComponentKind::Wire, a, a, 0.0)
            .unwrap_err();
        assert_eq!(err, LabError::SelfLoop { node: a });
    }

    #[test]
    fn test_dangling_endpoint_rejected() {
        let mut graph = CircuitGraph::new();
        let a = graph.add_node(Position::default());
        let ghost = NodeId(99);
        let err = graph
            .add_component(ComponentKind::Wire, a, ghost, 0.0)
            .unwrap_err();
        assert_eq!(err, LabError::NodeNotFound { node: ghost });
    }

    #[test]
    fn test_remove_component_keeps_nodes() {
        let mut graph = CircuitGraph::new();
        let (a, b) = two_nodes(&mut graph);
        let id = graph
            .add_component(ComponentKind::Resistor, a, b, 10.0)
            .unwrap();
        graph.remove_component(id).unwrap();
        assert!(graph.component(id).is_none());
        assert_eq!(graph.nodes().len(), 2);
        assert!(graph.remove_component(id).is_err());
    }

    #[test]
    fn test_toggle_switch_only_affects_switches() {
        let mut graph = CircuitGraph::new();
        let (a, b) = two_nodes(&mut graph);
        let sw = graph
            .add_component(ComponentKind::Switch, a, b, 0.0)
            .unwrap();
        let r = graph
            .add_component(ComponentKind::Resistor, a, b, 10.0)
            .unwrap();

        graph.toggle_switch(sw);
        assert!(graph.component(sw).unwrap().open);
        graph.toggle_switch(sw);
        assert!(!graph.component(sw).unwrap().open);

        graph.toggle_switch(r);
        assert!(!graph.component(r).unwrap().open);
    }

    #[test]
    fn test_set_value_clamps_resistance() {
        let mut graph = CircuitGraph::new();
        let (a, b) = two_nodes(&mut graph);
        let r = graph
            .add_component(ComponentKind::Resistor, a, b, 10.0)
            .unwrap();
        graph.set_value(r, -1.0).unwrap();
        assert_relative_eq!(
            graph.component(r).unwrap().value,
            crate::components::MIN_RESISTANCE
        );

        let bat = graph
            .add_component(ComponentKind::Battery, a, b, 9.0)
            .unwrap();
        graph.set_value(bat, -4.5).unwrap();
        assert_relative_eq!(graph.component(bat).unwrap().value, -4.5);
    }

    #[test]
    fn test_ground_prefers_first_battery_negative_terminal() {
        let mut graph = CircuitGraph::new();
        let (a, b) = two_nodes(&mut graph);
        assert_eq!(graph.ground_node(), Some(a));

        graph
            .add_component(ComponentKind::Battery, b, a, 9.0)
            .unwrap();
        assert_eq!(graph.ground_node(), Some(a));

        let c = graph.add_node(Position::new(2.0, 0.0));
        graph
            .add_component(ComponentKind::Battery, a, c, 1.5)
            .unwrap();
        // Still the first battery's negative terminal
        assert_eq!(graph.ground_node(), Some(a));
    }

    #[test]
    fn test_reset_clears_everything() {
        let mut graph = CircuitGraph::new();
        let (a, b) = two_nodes(&mut graph);
        graph
            .add_component(ComponentKind::Wire, a, b, 0.0)
            .unwrap();
        graph.reset();
        assert!(graph.nodes().is_empty());
        assert!(graph.components().is_empty());
        assert_eq!(graph.ground_node(), None);
    }
}
