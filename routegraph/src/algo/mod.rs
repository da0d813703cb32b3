/// Algorithms related to Eulerian graphs.
pub mod eulerian;
/// Algorithms to create certain parameterisable graph classes, like random connected graphs.
pub mod predefined_graphs;
