use crate::index::{EdgeIndex, GraphIndex, GraphIndices, NodeIndex};
use crate::interface::{Edge, Neighbor, WeightedEdgeData};
use log::trace;
use petgraph::graph::DiGraph;
use std::collections::HashMap;

pub use petgraph;

/// The data stored at a node of a [RouteGraph].
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct RouteNode {
    name: String,
    in_edges: Vec<EdgeIndex>,
    out_edges: Vec<EdgeIndex>,
}

impl RouteNode {
    fn new(name: String) -> Self {
        Self {
            name,
            in_edges: Vec::new(),
            out_edges: Vec::new(),
        }
    }

    /// The unique name of this node.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The edges ending in this node, in insertion order.
    pub fn in_edges(&self) -> &[EdgeIndex] {
        &self.in_edges
    }

    /// The edges starting in this node, in insertion order.
    pub fn out_edges(&self) -> &[EdgeIndex] {
        &self.out_edges
    }
}

/// Where an edge of a [RouteGraph] came from.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum EdgeKind {
    /// Part of the input graph.
    Original,
    /// Added when making the graph everywhere even-degree.
    Duplicate,
}

/// The data stored at an edge of a [RouteGraph].
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct RouteEdge {
    number: usize,
    weight: usize,
    kind: EdgeKind,
}

impl RouteEdge {
    /// The sequence number of this edge, starting at 1.
    pub fn number(&self) -> usize {
        self.number
    }

    /// Returns the kind of this edge.
    pub fn kind(&self) -> EdgeKind {
        self.kind
    }

    /// Returns true if this edge was added by augmentation.
    pub fn is_duplicate(&self) -> bool {
        self.kind == EdgeKind::Duplicate
    }
}

impl WeightedEdgeData for RouteEdge {
    #[inline]
    fn weight(&self) -> usize {
        self.weight
    }
}

/// A weighted multigraph with named nodes.
///
/// Nodes are created lazily when an edge first references them and are never removed.
/// Edges are never removed either, so node and edge indices stay valid for the lifetime of the graph.
/// Although every edge has a recorded start and end, all algorithms treat it as undirected.
#[derive(Debug, Clone, Default)]
pub struct RouteGraph {
    graph: DiGraph<RouteNode, RouteEdge, usize>,
    node_names: HashMap<String, NodeIndex>,
}

impl RouteGraph {
    /// Creates an empty graph.
    pub fn new() -> Self {
        Default::default()
    }

    /// Returns the index of the node with the given name, creating the node if it does not exist yet.
    pub fn add_or_get_node(&mut self, name: &str) -> NodeIndex {
        if let Some(&node) = self.node_names.get(name) {
            return node;
        }

        let node = NodeIndex::from(self.graph.add_node(RouteNode::new(name.to_owned())).index());
        self.node_names.insert(name.to_owned(), node);
        trace!("Created node {:?} '{}'", node, name);
        node
    }

    /// Adds an edge between the two named nodes, creating them if necessary.
    pub fn add_edge(&mut self, weight: usize, start_name: &str, end_name: &str) -> EdgeIndex {
        let from_node = self.add_or_get_node(start_name);
        let to_node = self.add_or_get_node(end_name);
        self.add_edge_between(from_node, to_node, weight, EdgeKind::Original)
    }

    /// Adds an edge of the given kind between two existing nodes.
    pub fn add_edge_between(
        &mut self,
        from_node: NodeIndex,
        to_node: NodeIndex,
        weight: usize,
        kind: EdgeKind,
    ) -> EdgeIndex {
        debug_assert!(self.contains_node_index(from_node));
        debug_assert!(self.contains_node_index(to_node));

        let number = self.graph.edge_count() + 1;
        let edge = EdgeIndex::from(
            self.graph
                .add_edge(
                    from_node.as_usize().into(),
                    to_node.as_usize().into(),
                    RouteEdge {
                        number,
                        weight,
                        kind,
                    },
                )
                .index(),
        );

        self.node_mut(from_node).out_edges.push(edge);
        self.node_mut(to_node).in_edges.push(edge);
        trace!(
            "Created edge {} ({:?}, weight {}) from '{}' to '{}'",
            number,
            kind,
            weight,
            self.node_name(from_node),
            self.node_name(to_node)
        );
        edge
    }

    /// Returns an iterator over the node indices in this graph, in creation order.
    pub fn node_indices(&self) -> GraphIndices<NodeIndex> {
        GraphIndices::new(self.node_count())
    }

    /// Returns an iterator over the edge indices in this graph, in creation order.
    pub fn edge_indices(&self) -> GraphIndices<EdgeIndex> {
        GraphIndices::new(self.edge_count())
    }

    /// Returns true if this graph contains the given node index.
    pub fn contains_node_index(&self, node: NodeIndex) -> bool {
        node.as_usize() < self.node_count()
    }

    /// Returns the amount of nodes in this graph.
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Returns the amount of edges in this graph.
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Returns true if the graph contains no nodes.
    pub fn is_empty(&self) -> bool {
        // Zero nodes must imply zero edges.
        debug_assert!(self.node_count() != 0 || self.edge_count() == 0);
        self.node_count() == 0
    }

    /// Returns the index of the node with the given name, if it exists.
    pub fn node_index_of(&self, name: &str) -> Option<NodeIndex> {
        self.node_names.get(name).copied()
    }

    /// Returns the data of the given node.
    pub fn node_data(&self, node: NodeIndex) -> &RouteNode {
        &self.graph[petgraph::graph::NodeIndex::new(node.as_usize())]
    }

    fn node_mut(&mut self, node: NodeIndex) -> &mut RouteNode {
        &mut self.graph[petgraph::graph::NodeIndex::new(node.as_usize())]
    }

    /// Returns the name of the given node.
    pub fn node_name(&self, node: NodeIndex) -> &str {
        self.node_data(node).name()
    }

    /// Returns the data of the given edge.
    pub fn edge_data(&self, edge: EdgeIndex) -> &RouteEdge {
        &self.graph[petgraph::graph::EdgeIndex::new(edge.as_usize())]
    }

    /// Returns the weight of the given edge.
    pub fn edge_weight(&self, edge: EdgeIndex) -> usize {
        self.edge_data(edge).weight()
    }

    /// Returns the endpoints of an edge in their recorded orientation.
    pub fn edge_endpoints(&self, edge: EdgeIndex) -> Edge {
        let raw_edge = &self.graph.raw_edges()[edge.as_usize()];
        Edge {
            from_node: raw_edge.source().index().into(),
            to_node: raw_edge.target().index().into(),
        }
    }

    /// Returns the amount of edges ending in the given node.
    pub fn in_degree(&self, node: NodeIndex) -> usize {
        self.node_data(node).in_edges.len()
    }

    /// Returns the amount of edges starting in the given node.
    pub fn out_degree(&self, node: NodeIndex) -> usize {
        self.node_data(node).out_edges.len()
    }

    /// Returns the amount of edge incidences at the given node.
    /// A self loop counts twice.
    pub fn degree(&self, node: NodeIndex) -> usize {
        self.in_degree(node) + self.out_degree(node)
    }

    /// Returns the edges incident to the given node together with their other endpoint.
    /// Outgoing edges come first, then incoming edges, each in insertion order.
    /// A self loop is returned twice.
    pub fn incident_edges(&self, node: NodeIndex) -> impl Iterator<Item = Neighbor> + '_ {
        let node_data = self.node_data(node);
        node_data
            .out_edges
            .iter()
            .chain(node_data.in_edges.iter())
            .map(move |&edge_id| Neighbor {
                edge_id,
                node_id: self.edge_endpoints(edge_id).other_endpoint(node),
            })
    }

    /// Returns the sum of the weights of all edges, or `None` if the sum does not fit into a `usize`.
    pub fn total_weight(&self) -> Option<usize> {
        self.graph
            .raw_edges()
            .iter()
            .try_fold(0usize, |total, edge| total.checked_add(edge.weight.weight()))
    }

    /// Returns the amount of edges that were added by augmentation.
    pub fn duplicate_edge_count(&self) -> usize {
        self.graph
            .raw_edges()
            .iter()
            .filter(|edge| edge.weight.is_duplicate())
            .count()
    }
}
