use crate::error::{ErrorKind, Result};
use crate::shortest_paths::ShortestPaths;
use log::{debug, info};
use routegraph::{NodeIndex, RouteGraph};

/// Two nodes paired by a matching, and the cost of a shortest path between them.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct MatchingPair {
    /// The node that comes first in node order.
    pub first: NodeIndex,
    /// The node that comes later in node order.
    pub second: NodeIndex,
    /// The shortest path distance between the two nodes.
    pub cost: usize,
}

/// A perfect matching of minimum total cost over a set of nodes,
/// where the cost of a pair is the shortest path distance between its nodes.
#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub struct MinimumWeightMatching {
    pairs: Vec<MatchingPair>,
    cost: usize,
}

impl MinimumWeightMatching {
    /// Computes a minimum weight perfect matching of the given nodes by exhaustive search.
    ///
    /// The search enumerates all `(k - 1)!! = (k - 1) * (k - 3) * ... * 1` perfect matchings of the `k` nodes,
    /// so it is only practical for small amounts of nodes (around 16 nodes already need two million combinations).
    /// Among matchings of equal cost, the first one in enumeration order is returned,
    /// where the enumeration always pairs the first remaining node with each other remaining node in order.
    ///
    /// Fails if the amount of nodes is odd, if two of the nodes are not connected,
    /// or if the cost of every perfect matching exceeds `usize::MAX`.
    pub fn compute(
        graph: &RouteGraph,
        nodes: &[NodeIndex],
        shortest_paths: &ShortestPaths,
    ) -> Result<Self> {
        if nodes.len() % 2 != 0 {
            return Err(ErrorKind::OddCardinality(nodes.len()).into());
        }

        let costs = PairCosts::new(graph, nodes, shortest_paths)?;
        let positions: Vec<usize> = (0..nodes.len()).collect();
        let (cost, position_pairs) =
            compute_recursively(&positions, &costs).ok_or(ErrorKind::WeightOverflow)?;

        let pairs: Vec<_> = position_pairs
            .into_iter()
            .map(|(p1, p2)| MatchingPair {
                first: nodes[p1],
                second: nodes[p2],
                cost: costs.get(p1, p2),
            })
            .collect();
        for pair in &pairs {
            debug!(
                "Paired '{}' with '{}' at cost {}",
                graph.node_name(pair.first),
                graph.node_name(pair.second),
                pair.cost
            );
        }
        info!(
            "Matched {} odd-degree nodes into {} pairs of total cost {}",
            nodes.len(),
            pairs.len(),
            cost
        );

        Ok(Self { pairs, cost })
    }

    /// The pairs of this matching, ordered by their first node in enumeration order.
    pub fn pairs(&self) -> &[MatchingPair] {
        &self.pairs
    }

    /// The total cost of this matching.
    pub fn cost(&self) -> usize {
        self.cost
    }

    /// The amount of pairs.
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    /// Returns true if this matching contains no pairs.
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}

/// The pairwise distances between the nodes to be matched, indexed by position.
struct PairCosts {
    len: usize,
    costs: Vec<usize>,
}

impl PairCosts {
    fn new(graph: &RouteGraph, nodes: &[NodeIndex], shortest_paths: &ShortestPaths) -> Result<Self> {
        let len = nodes.len();
        let mut costs = vec![0; len * len];
        for (p1, &n1) in nodes.iter().enumerate() {
            for (p2, &n2) in nodes.iter().enumerate().skip(p1 + 1) {
                let cost = shortest_paths.distance(n1, n2).ok_or_else(|| {
                    ErrorKind::DisconnectedNodes(
                        graph.node_name(n1).to_owned(),
                        graph.node_name(n2).to_owned(),
                    )
                })?;
                costs[p1 * len + p2] = cost;
                costs[p2 * len + p1] = cost;
            }
        }

        Ok(Self { len, costs })
    }

    #[inline]
    fn get(&self, p1: usize, p2: usize) -> usize {
        self.costs[p1 * self.len + p2]
    }
}

/// Returns the cost and the pairs of a minimum perfect matching of the given positions,
/// or `None` if the cost of each of them overflows.
/// The recursion depth is half the amount of positions.
fn compute_recursively(
    remaining: &[usize],
    costs: &PairCosts,
) -> Option<(usize, Vec<(usize, usize)>)> {
    debug_assert!(remaining.len() % 2 == 0);
    let (&first, others) = match remaining.split_first() {
        Some(split) => split,
        None => return Some((0, Vec::new())),
    };

    let mut best: Option<(usize, Vec<(usize, usize)>)> = None;
    let mut rest = Vec::with_capacity(others.len().saturating_sub(1));
    for (partner_offset, &partner) in others.iter().enumerate() {
        rest.clear();
        rest.extend_from_slice(&others[..partner_offset]);
        rest.extend_from_slice(&others[partner_offset + 1..]);

        let (cost, mut rest_pairs) = match compute_recursively(&rest, costs)
            .and_then(|(rest_cost, rest_pairs)| {
                Some((costs.get(first, partner).checked_add(rest_cost)?, rest_pairs))
            }) {
            Some(candidate) => candidate,
            None => continue,
        };
        if best
            .as_ref()
            .map_or(true, |&(best_cost, _)| cost < best_cost)
        {
            rest_pairs.insert(0, (first, partner));
            best = Some((cost, rest_pairs));
        }
    }

    best
}
