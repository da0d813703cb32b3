//! Algorithms for the route inspection problem, also known as the Chinese postman problem:
//! find a closed walk of minimum weight that uses every edge of a connected graph at least once.
//!
//! The solution pairs up the odd-degree nodes by a minimum weight perfect matching over shortest path distances,
//! duplicates the edges of the matched shortest paths, and computes a Eulerian circuit of the resulting graph.
#![warn(missing_docs)]
#![recursion_limit = "1024"]

/// Duplicating edges along matched shortest paths.
pub mod augmentation;
/// Eulerian circuits by cycle extraction and splicing.
pub mod circuit;
/// Errors of this crate.
pub mod error;
/// Minimum weight perfect matchings by exhaustive search.
pub mod matching;
/// All-pairs shortest paths.
pub mod shortest_paths;
/// The complete route inspection pipeline.
pub mod solver;

pub use routegraph;
pub use solver::{solve_route_inspection, RouteInspectionSolution};
