//! Error types for the Voltlab circuit solver.
//!
//! This module provides a unified error type [`LabError`] covering the
//! rejections the graph mutation boundary can produce. The solver and
//! diagnostics passes themselves are total: every structurally valid graph
//! solves, so nothing past the mutation boundary returns an error.

use thiserror::Error;

use crate::circuit::{ComponentId, NodeId};

/// Result type alias using [`LabError`].
pub type Result<T> = std::result::Result<T, LabError>;

/// Unified error type for all Voltlab operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LabError {
    // ============ Topology Errors ============
    /// A component's two endpoints refer to the same node
    #[error("Component endpoints must differ, got {node} twice")]
    SelfLoop { node: NodeId },

    /// A component endpoint refers to a node that does not exist
    #[error("Node {node} not found in circuit")]
    NodeNotFound { node: NodeId },

    /// An operation referenced a component that does not exist
    #[error("Component {component} not found in circuit")]
    ComponentNotFound { component: ComponentId },
}

impl LabError {
    /// Create a self-loop rejection.
    pub fn self_loop(node: NodeId) -> Self {
        Self::SelfLoop { node }
    }

    /// Create a dangling-node rejection.
    pub fn node_not_found(node: NodeId) -> Self {
        Self::NodeNotFound { node }
    }

    /// Create an unknown-component rejection.
    pub fn component_not_found(component: ComponentId) -> Self {
        Self::ComponentNotFound { component }
    }
}
