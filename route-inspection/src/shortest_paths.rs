use crate::error::{ErrorKind, Result};
use log::{debug, info};
use routegraph::{
    Edge, GraphIndex, NodeIndex, OptionalGraphIndex, OptionalNodeIndex, RouteGraph,
    WeightedEdgeData,
};

/// All-pairs shortest path distances of a graph, together with the information needed to reconstruct the paths.
///
/// Edges are traversable in both directions, so the distances are symmetric.
/// The distance from a node to itself is not computed and reported as unknown.
///
/// Computed with the Floyd-Warshall algorithm in `O(n^3)` time and `O(n^2)` space.
pub struct ShortestPaths {
    node_count: usize,
    /// `None` for pairs without a known path.
    distances: Vec<Option<usize>>,
    /// For each pair, some node on a shortest path between the pair, or none if the pair is adjacent.
    next_hops: Vec<OptionalNodeIndex>,
}

impl ShortestPaths {
    /// Computes the shortest paths between all pairs of nodes, using only the original edges of the graph.
    ///
    /// Fails if the sum of the weights of the original edges does not fit into a `usize`.
    /// Otherwise, every shortest path weight fits as well, since it is bounded by that sum.
    pub fn compute(graph: &RouteGraph) -> Result<Self> {
        let original_weight = graph
            .edge_indices()
            .map(|edge| graph.edge_data(edge))
            .filter(|edge_data| !edge_data.is_duplicate())
            .try_fold(0usize, |total, edge_data| {
                total.checked_add(edge_data.weight())
            })
            .ok_or(ErrorKind::WeightOverflow)?;
        debug!("Original edges have total weight {}", original_weight);

        let node_count = graph.node_count();
        let mut shortest_paths = Self {
            node_count,
            distances: vec![None; node_count * node_count],
            next_hops: vec![OptionalNodeIndex::new_none(); node_count * node_count],
        };

        for edge in graph.edge_indices() {
            if graph.edge_data(edge).is_duplicate() {
                continue;
            }
            let Edge { from_node, to_node } = graph.edge_endpoints(edge);
            if from_node == to_node {
                continue;
            }

            // Of parallel edges, only the lightest one is relevant.
            let weight = graph.edge_weight(edge);
            for (n1, n2) in [(from_node, to_node), (to_node, from_node)] {
                let offset = shortest_paths.offset(n1, n2);
                if shortest_paths.distances[offset].map_or(true, |distance| weight < distance) {
                    shortest_paths.distances[offset] = Some(weight);
                }
            }
        }

        shortest_paths.relax_all();
        info!("Computed all-pairs shortest paths between {} nodes", node_count);
        Ok(shortest_paths)
    }

    fn relax_all(&mut self) {
        let n = self.node_count;
        for k in 0..n {
            for i in 0..n {
                let distance_ik = match self.distances[i * n + k] {
                    Some(distance) if i != k => distance,
                    _ => continue,
                };

                for j in 0..n {
                    let distance_kj = match self.distances[k * n + j] {
                        Some(distance) if i != j && j != k => distance,
                        _ => continue,
                    };

                    // An overflowing candidate is longer than the sum of all weights, so never shortest.
                    let candidate = match distance_ik.checked_add(distance_kj) {
                        Some(candidate) => candidate,
                        None => continue,
                    };
                    let distance_ij = &mut self.distances[i * n + j];
                    if distance_ij.map_or(true, |distance| candidate < distance) {
                        *distance_ij = Some(candidate);
                        self.next_hops[i * n + j] = NodeIndex::from(k).into();
                    }
                }
            }
        }
        debug!("Relaxed {} intermediate nodes", n);
    }

    #[inline]
    fn offset(&self, from: NodeIndex, to: NodeIndex) -> usize {
        debug_assert!(from.as_usize() < self.node_count && to.as_usize() < self.node_count);
        from.as_usize() * self.node_count + to.as_usize()
    }

    /// Returns the amount of nodes the matrices were computed for.
    pub fn node_count(&self) -> usize {
        self.node_count
    }

    /// Returns the weight of a shortest path between the two nodes, or `None` if there is no path.
    /// Also returns `None` if `from == to`.
    pub fn distance(&self, from: NodeIndex, to: NodeIndex) -> Option<usize> {
        self.distances[self.offset(from, to)]
    }

    /// Returns a node on a shortest path between the two nodes.
    /// Returns `None` if the nodes are connected directly by an edge of weight `distance(from, to)`,
    /// or if they are not connected at all.
    pub fn next_hop(&self, from: NodeIndex, to: NodeIndex) -> Option<NodeIndex> {
        self.next_hops[self.offset(from, to)].into()
    }

    /// Returns the nodes of a shortest path from `from` to `to`, including both ends.
    /// Returns `None` if there is no path.
    pub fn path(&self, from: NodeIndex, to: NodeIndex) -> Option<Vec<NodeIndex>> {
        self.distance(from, to)?;
        let mut path = vec![from];
        self.append_path(from, to, &mut path);
        Some(path)
    }

    /// Appends the nodes of the path after `from`, up to and including `to`.
    fn append_path(&self, from: NodeIndex, to: NodeIndex, path: &mut Vec<NodeIndex>) {
        if let Some(intermediate) = self.next_hop(from, to) {
            self.append_path(from, intermediate, path);
            self.append_path(intermediate, to, path);
        } else {
            path.push(to);
        }
    }
}
