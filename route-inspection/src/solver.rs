use crate::augmentation::augment_along_matching;
use crate::circuit::{compute_eulerian_circuit, EulerianCircuit};
use crate::error::{ErrorKind, Result};
use crate::matching::MinimumWeightMatching;
use crate::shortest_paths::ShortestPaths;
use log::info;
use routegraph::algo::eulerian::{find_odd_degree_nodes, is_everywhere_even_degree};
use routegraph::{EdgeIndex, RouteGraph};

/// The result of solving the route inspection problem on a graph.
#[derive(Debug, Clone, Default)]
pub struct RouteInspectionSolution {
    matching: MinimumWeightMatching,
    duplicate_edges: Vec<EdgeIndex>,
    circuit: EulerianCircuit,
}

impl RouteInspectionSolution {
    /// The pairing of the odd-degree nodes of the input graph. Empty if the input was everywhere even-degree.
    pub fn matching(&self) -> &MinimumWeightMatching {
        &self.matching
    }

    /// The edges that were added to the graph to make it everywhere even-degree.
    pub fn duplicate_edges(&self) -> &[EdgeIndex] {
        &self.duplicate_edges
    }

    /// A closed walk over all original and duplicate edges.
    pub fn circuit(&self) -> &EulerianCircuit {
        &self.circuit
    }

    /// The total weight of the circuit.
    pub fn total_weight(&self) -> usize {
        self.circuit.total_weight()
    }
}

/// Computes a closed walk of minimum weight that uses every edge of the graph at least once.
///
/// The graph is augmented in place: for each pair of odd-degree nodes in a minimum weight matching,
/// the edges of a shortest path between them are duplicated.
/// The graph must be connected and must not have been augmented before.
/// Fails with [ErrorKind::WeightOverflow] if the weight of the circuit does not fit into a `usize`.
pub fn solve_route_inspection(graph: &mut RouteGraph) -> Result<RouteInspectionSolution> {
    let original_weight = graph.total_weight().ok_or(ErrorKind::WeightOverflow)?;
    info!(
        "Solving route inspection for {} nodes and {} edges of total weight {}",
        graph.node_count(),
        graph.edge_count(),
        original_weight
    );

    let (matching, duplicate_edges) = if is_everywhere_even_degree(graph) {
        info!("All nodes have even degree, no edges need to be duplicated");
        (MinimumWeightMatching::default(), Vec::new())
    } else {
        let odd_nodes = find_odd_degree_nodes(graph);
        info!("Found {} nodes with odd degree", odd_nodes.len());
        let shortest_paths = ShortestPaths::compute(graph)?;
        let matching = MinimumWeightMatching::compute(graph, &odd_nodes, &shortest_paths)?;
        let duplicate_edges = augment_along_matching(graph, &shortest_paths, &matching)?;
        (matching, duplicate_edges)
    };

    let circuit = compute_eulerian_circuit(graph)?;
    debug_assert!(circuit.is_closed_walk());
    debug_assert!(circuit.covers_every_edge_once(graph));

    Ok(RouteInspectionSolution {
        matching,
        duplicate_edges,
        circuit,
    })
}
