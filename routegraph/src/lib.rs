//! A weighted multigraph with named nodes, the data model for route inspection.
//!
//! Nodes and edges live in an arena owned by [RouteGraph](implementation::route_graph::RouteGraph),
//! and refer to each other only by typed indices.
#![warn(missing_docs)]
#![recursion_limit = "1024"]

/// Algorithms that only inspect the graph structure.
pub mod algo;
/// Errors of this crate.
pub mod error;
/// Graph implementations.
pub mod implementation;
/// Typed node and edge indices.
pub mod index;
/// Types shared between graph implementations and algorithms.
pub mod interface;
/// Reading and writing graphs.
pub mod io;

pub use implementation::route_graph::{EdgeKind, RouteEdge, RouteGraph, RouteNode};
pub use index::{EdgeIndex, GraphIndex, NodeIndex, OptionalGraphIndex, OptionalNodeIndex};
pub use interface::{Edge, Neighbor, WeightedEdgeData};
pub use rand;
