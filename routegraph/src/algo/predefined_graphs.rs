use crate::implementation::route_graph::RouteGraph;
use rand::Rng;

/// The name given to the `index`th node of a generated graph.
pub fn generated_node_name(index: usize) -> String {
    format!("v{}", index)
}

/// Adds a cycle over `node_amount` new nodes to the given graph, each edge having the given weight.
/// Assumes that the graph is empty.
/// A cycle of length 1 is a self loop, a cycle of length 2 is a pair of parallel edges.
pub fn create_cycle_graph(graph: &mut RouteGraph, node_amount: usize, weight: usize) {
    for index in 0..node_amount {
        graph.add_edge(
            weight,
            &generated_node_name(index),
            &generated_node_name((index + 1) % node_amount),
        );
    }
}

/// Creates a complete graph with the given amount of nodes and random weights in `0..=max_weight`.
/// Assumes that the graph is empty.
/// If `node_amount` is even and at least 2, then every node has odd degree.
pub fn create_complete_graph<Random: Rng>(
    graph: &mut RouteGraph,
    node_amount: usize,
    max_weight: usize,
    random: &mut Random,
) {
    for n1 in 0..node_amount {
        for n2 in n1 + 1..node_amount {
            graph.add_edge(
                random.gen_range(0..=max_weight),
                &generated_node_name(n1),
                &generated_node_name(n2),
            );
        }
    }
}

/// Creates a random connected graph with the given amount of nodes and edges.
/// Assumes that the graph is empty.
///
/// A random spanning tree is added first, then random edges between distinct nodes until `edge_amount` is reached.
/// Parallel edges may occur. Weights are drawn uniformly from `0..=max_weight`.
/// If `edge_amount` is smaller than `node_amount - 1`, the spanning tree is still completed.
pub fn create_random_connected_graph<Random: Rng>(
    graph: &mut RouteGraph,
    node_amount: usize,
    edge_amount: usize,
    max_weight: usize,
    random: &mut Random,
) {
    if node_amount == 0 {
        return;
    }
    graph.add_or_get_node(&generated_node_name(0));

    for n1 in 1..node_amount {
        let n2 = random.gen_range(0..n1);
        // Randomise the recorded orientation, the algorithms must not depend on it.
        let (start, end) = if random.gen_bool(0.5) {
            (n1, n2)
        } else {
            (n2, n1)
        };
        graph.add_edge(
            random.gen_range(0..=max_weight),
            &generated_node_name(start),
            &generated_node_name(end),
        );
    }

    if node_amount < 2 {
        return;
    }

    while graph.edge_count() < edge_amount {
        let n1 = random.gen_range(0..node_amount);
        let n2 = random.gen_range(0..node_amount);

        if n1 != n2 {
            graph.add_edge(
                random.gen_range(0..=max_weight),
                &generated_node_name(n1),
                &generated_node_name(n2),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{create_complete_graph, create_cycle_graph, create_random_connected_graph};
    use crate::algo::eulerian::{find_odd_degree_nodes, is_everywhere_even_degree};
    use crate::implementation::route_graph::RouteGraph;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_create_cycle_graph() {
        let mut graph = RouteGraph::new();
        create_cycle_graph(&mut graph, 5, 2);
        assert_eq!(graph.node_count(), 5);
        assert_eq!(graph.edge_count(), 5);
        assert_eq!(graph.total_weight(), Some(10));
        assert!(is_everywhere_even_degree(&graph));
    }

    #[test]
    fn test_create_complete_graph() {
        let mut graph = RouteGraph::new();
        create_complete_graph(&mut graph, 6, 10, &mut StdRng::seed_from_u64(1));
        assert_eq!(graph.node_count(), 6);
        assert_eq!(graph.edge_count(), 15);
        assert_eq!(find_odd_degree_nodes(&graph).len(), 6);
    }

    #[test]
    fn test_create_random_connected_graph() {
        let mut random = StdRng::seed_from_u64(42);
        for node_amount in 1..20 {
            let mut graph = RouteGraph::new();
            create_random_connected_graph(&mut graph, node_amount, node_amount * 2, 9, &mut random);
            assert_eq!(graph.node_count(), node_amount);
            if node_amount > 1 {
                assert_eq!(graph.edge_count(), node_amount * 2);
            } else {
                assert_eq!(graph.edge_count(), 0);
            }
            for edge in graph.edge_indices() {
                assert!(graph.edge_weight(edge) <= 9);
            }
        }
    }
}
