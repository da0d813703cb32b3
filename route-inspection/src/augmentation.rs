use crate::error::{ErrorKind, Result};
use crate::matching::MinimumWeightMatching;
use crate::shortest_paths::ShortestPaths;
use log::{debug, info};
use routegraph::algo::eulerian::is_everywhere_even_degree;
use routegraph::{EdgeIndex, EdgeKind, NodeIndex, RouteGraph};

/// Duplicates the edges of a shortest path between each matched pair of nodes.
/// Returns the added edges, in the order they were added.
///
/// If the matching is perfect over the odd-degree nodes of the graph, then every node has even degree afterwards:
/// each path changes the parity of its two ends, and the parity of no other node.
pub fn augment_along_matching(
    graph: &mut RouteGraph,
    shortest_paths: &ShortestPaths,
    matching: &MinimumWeightMatching,
) -> Result<Vec<EdgeIndex>> {
    let mut duplicate_edges = Vec::new();
    for pair in matching.pairs() {
        let previous_len = duplicate_edges.len();
        duplicate_shortest_path(
            graph,
            shortest_paths,
            pair.first,
            pair.second,
            &mut duplicate_edges,
        )?;
        debug!(
            "Duplicated {} edges between '{}' and '{}'",
            duplicate_edges.len() - previous_len,
            graph.node_name(pair.first),
            graph.node_name(pair.second)
        );
    }

    info!(
        "Added {} duplicate edges of total weight {}",
        duplicate_edges.len(),
        matching.cost()
    );
    debug_assert!(matching.is_empty() || is_everywhere_even_degree(graph));
    Ok(duplicate_edges)
}

/// Adds a duplicate of each edge on the shortest path from `from` to `to`, recursing over the next-hop matrix.
/// The recursion depth is bounded by the amount of nodes.
fn duplicate_shortest_path(
    graph: &mut RouteGraph,
    shortest_paths: &ShortestPaths,
    from: NodeIndex,
    to: NodeIndex,
    duplicate_edges: &mut Vec<EdgeIndex>,
) -> Result<()> {
    if let Some(intermediate) = shortest_paths.next_hop(from, to) {
        duplicate_shortest_path(graph, shortest_paths, from, intermediate, duplicate_edges)?;
        duplicate_shortest_path(graph, shortest_paths, intermediate, to, duplicate_edges)
    } else {
        let weight = shortest_paths.distance(from, to).ok_or_else(|| {
            ErrorKind::DisconnectedNodes(
                graph.node_name(from).to_owned(),
                graph.node_name(to).to_owned(),
            )
        })?;
        duplicate_edges.push(graph.add_edge_between(from, to, weight, EdgeKind::Duplicate));
        Ok(())
    }
}
