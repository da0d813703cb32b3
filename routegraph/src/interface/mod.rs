//! Shared vocabulary types of the route graph.
//!
//! Algorithms only need three things from a graph: weights on edges, the endpoints of an edge,
//! and the neighbors of a node reachable over a single edge.

use crate::index::{EdgeIndex, NodeIndex};

/// Edge data that has a weight usable for shortest path computation.
pub trait WeightedEdgeData {
    /// The weight of the edge.
    fn weight(&self) -> usize;
}

/// An edge represented as a pair of node indices.
/// The order records the canonical orientation the edge was created with,
/// travel over it is allowed in both directions.
#[derive(Debug, Eq, PartialEq, Clone, Copy)]
pub struct Edge {
    /// The start of this edge.
    pub from_node: NodeIndex,
    /// The end of this edge.
    pub to_node: NodeIndex,
}

impl Edge {
    /// Returns the endpoint of this edge that is not `node`.
    /// For a self loop, this is `node` itself.
    pub fn other_endpoint(&self, node: NodeIndex) -> NodeIndex {
        debug_assert!(self.from_node == node || self.to_node == node);
        if self.from_node == node {
            self.to_node
        } else {
            self.from_node
        }
    }

    /// Returns true if `node` is one of the endpoints of this edge.
    pub fn is_incident_to(&self, node: NodeIndex) -> bool {
        self.from_node == node || self.to_node == node
    }
}

/// The neighbor of a node, given as the edge used to reach the neighbor node as well as the neighbor node itself.
#[derive(Debug, Eq, PartialEq, Clone, Copy)]
pub struct Neighbor {
    /// The edge used to reach the neighboring node.
    pub edge_id: EdgeIndex,
    /// The neighboring node.
    pub node_id: NodeIndex,
}
