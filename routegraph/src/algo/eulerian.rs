use crate::implementation::route_graph::RouteGraph;
use crate::index::NodeIndex;

/// Returns true if every node of the graph has even degree.
/// For a connected graph, this is equivalent to the graph having a Eulerian circuit.
pub fn is_everywhere_even_degree(graph: &RouteGraph) -> bool {
    for node_index in graph.node_indices() {
        if graph.degree(node_index) % 2 != 0 {
            return false;
        }
    }

    true
}

/// Compute a vector of the nodes that have odd degree, in node order.
/// The result always has even length, since the degrees of a graph sum up to twice its edge count.
pub fn find_odd_degree_nodes(graph: &RouteGraph) -> Vec<NodeIndex> {
    let result: Vec<_> = graph
        .node_indices()
        .filter(|&node_index| graph.degree(node_index) % 2 != 0)
        .collect();
    debug_assert!(result.len() % 2 == 0);
    result
}
