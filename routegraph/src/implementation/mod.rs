/// The named, weighted multigraph backed by the `petgraph` crate.
pub mod route_graph;
