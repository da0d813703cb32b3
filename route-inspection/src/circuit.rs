use crate::error::{ErrorKind, Result};
use bitvector::BitVector;
use log::{debug, info, trace};
use routegraph::{EdgeIndex, GraphIndex, Neighbor, NodeIndex, RouteGraph};

/// A single step of a walk: an edge together with the direction it was walked in.
/// The direction may differ from the recorded orientation of the edge.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct Traversal {
    /// The edge that was walked.
    pub edge: EdgeIndex,
    /// The node the step started in.
    pub from_node: NodeIndex,
    /// The node the step ended in.
    pub to_node: NodeIndex,
}

/// A step of a circuit described by node names, as handed to output code.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct CircuitHop<'a> {
    /// The name of the node the step started in.
    pub start: &'a str,
    /// The name of the node the step ended in.
    pub end: &'a str,
    /// The weight of the walked edge.
    pub weight: usize,
}

/// A closed walk that uses every edge of a graph exactly once.
#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub struct EulerianCircuit {
    traversals: Vec<Traversal>,
    total_weight: usize,
}

impl EulerianCircuit {
    /// The steps of this circuit in walking order.
    pub fn traversals(&self) -> &[Traversal] {
        &self.traversals
    }

    /// The sum of the weights of all walked edges.
    pub fn total_weight(&self) -> usize {
        self.total_weight
    }

    /// The amount of steps.
    pub fn len(&self) -> usize {
        self.traversals.len()
    }

    /// Returns true if this circuit has no steps.
    pub fn is_empty(&self) -> bool {
        self.traversals.is_empty()
    }

    /// The node where this circuit starts and ends, or `None` if it is empty.
    pub fn start_node(&self) -> Option<NodeIndex> {
        self.traversals.first().map(|traversal| traversal.from_node)
    }

    /// Returns the steps of this circuit as node names and weights.
    pub fn hops<'a>(&'a self, graph: &'a RouteGraph) -> impl Iterator<Item = CircuitHop<'a>> + 'a {
        self.traversals.iter().map(move |traversal| CircuitHop {
            start: graph.node_name(traversal.from_node),
            end: graph.node_name(traversal.to_node),
            weight: graph.edge_weight(traversal.edge),
        })
    }

    /// Returns true if each step starts where the previous one ended, and the last step ends where the first one started.
    pub fn is_closed_walk(&self) -> bool {
        is_closed_walk(&self.traversals)
    }

    /// Returns true if each step matches the endpoints of its edge,
    /// and every edge of the graph is walked exactly once.
    pub fn covers_every_edge_once(&self, graph: &RouteGraph) -> bool {
        if self.traversals.len() != graph.edge_count() {
            return false;
        }

        let mut walked = BitVector::new(graph.edge_count());
        for traversal in &self.traversals {
            let endpoints = graph.edge_endpoints(traversal.edge);
            if !endpoints.is_incident_to(traversal.from_node)
                || endpoints.other_endpoint(traversal.from_node) != traversal.to_node
                || !walked.insert(traversal.edge.as_usize())
            {
                return false;
            }
        }
        true
    }
}

fn is_closed_walk(traversals: &[Traversal]) -> bool {
    match (traversals.first(), traversals.last()) {
        (Some(first), Some(last)) => {
            last.to_node == first.from_node
                && traversals
                    .windows(2)
                    .all(|pair| pair[0].to_node == pair[1].from_node)
        }
        _ => true,
    }
}

/// Computes a Eulerian circuit of a graph in which every node has even degree.
///
/// Starts with a cycle from the first node, then repeatedly extracts a cycle from the unused edges that
/// starts on the circuit, and splices it in where the circuit first passes the cycle's start.
/// Edges are chosen deterministically, preferring the neighbor with the lexicographically smallest name.
///
/// Fails if the graph is not connected, if some node has odd degree, or if the total weight overflows.
pub fn compute_eulerian_circuit(graph: &RouteGraph) -> Result<EulerianCircuit> {
    EulerianCircuitBuilder::new(graph).build()
}

/// The state of a Eulerian circuit computation: the graph and the set of edges that were not walked yet.
pub struct EulerianCircuitBuilder<'a> {
    graph: &'a RouteGraph,
    used_edges: BitVector,
    unused_edge_count: usize,
    /// All edges before this index are used.
    first_unused_edge: usize,
}

impl<'a> EulerianCircuitBuilder<'a> {
    /// Creates a builder where all edges of the graph are unused.
    pub fn new(graph: &'a RouteGraph) -> Self {
        Self {
            graph,
            used_edges: BitVector::new(graph.edge_count()),
            unused_edge_count: graph.edge_count(),
            first_unused_edge: 0,
        }
    }

    /// The amount of edges that are not part of any extracted cycle yet.
    pub fn unused_edge_count(&self) -> usize {
        self.unused_edge_count
    }

    /// Walks unused edges from `start_node` until it returns to `start_node`, marking them as used.
    /// At each node, the unused edge to the neighbor with the smallest name is taken.
    ///
    /// Returns an empty cycle if `start_node` has no unused edges.
    pub fn find_cycle(&mut self, start_node: NodeIndex) -> Result<Vec<Traversal>> {
        let mut cycle = Vec::new();
        let mut current_node = start_node;

        loop {
            let Neighbor { edge_id, node_id } = match self.next_edge(current_node) {
                Some(neighbor) => neighbor,
                None if cycle.is_empty() => return Ok(cycle),
                None => {
                    return Err(ErrorKind::CycleDeadEnd(
                        self.graph.node_name(current_node).to_owned(),
                        self.graph.node_name(start_node).to_owned(),
                    )
                    .into())
                }
            };

            self.mark_used(edge_id);
            trace!(
                "Walking edge {} from '{}' to '{}'",
                self.graph.edge_data(edge_id).number(),
                self.graph.node_name(current_node),
                self.graph.node_name(node_id)
            );
            cycle.push(Traversal {
                edge: edge_id,
                from_node: current_node,
                to_node: node_id,
            });
            current_node = node_id;

            if current_node == start_node {
                break;
            }
        }

        debug!(
            "Found cycle of {} edges from '{}'",
            cycle.len(),
            self.graph.node_name(start_node)
        );
        Ok(cycle)
    }

    /// Returns the unused edge at `node` whose other endpoint has the smallest name.
    /// Among parallel edges, the first one in incidence order wins.
    fn next_edge(&self, node: NodeIndex) -> Option<Neighbor> {
        self.graph
            .incident_edges(node)
            .filter(|neighbor| !self.used_edges.contains(neighbor.edge_id.as_usize()))
            .min_by_key(|neighbor| self.graph.node_name(neighbor.node_id))
    }

    fn mark_used(&mut self, edge: EdgeIndex) {
        let inserted = self.used_edges.insert(edge.as_usize());
        debug_assert!(inserted, "edge {:?} was used twice", edge);
        self.unused_edge_count -= 1;
    }

    /// Inserts `cycle` into `circuit` right after the first step of `circuit` that ends in the start node of `cycle`.
    pub fn unite_cycles(
        &self,
        circuit: Vec<Traversal>,
        cycle: Vec<Traversal>,
    ) -> Result<Vec<Traversal>> {
        let junction = match cycle.first() {
            Some(first) => first.from_node,
            None => return Ok(circuit),
        };
        if circuit.is_empty() {
            return Ok(cycle);
        }

        let position = circuit
            .iter()
            .position(|traversal| traversal.to_node == junction)
            .ok_or_else(|| ErrorKind::NoSplicePoint(self.graph.node_name(junction).to_owned()))?;

        let mut result = Vec::with_capacity(circuit.len() + cycle.len());
        result.extend_from_slice(&circuit[..=position]);
        result.extend(cycle);
        result.extend_from_slice(&circuit[position + 1..]);
        debug_assert!(is_closed_walk(&result));
        Ok(result)
    }

    /// Returns the first unused edge in edge order that touches the circuit, and the endpoint where it touches.
    /// The start of the edge is preferred if both endpoints are on the circuit.
    fn next_cycle_start(&mut self, nodes_on_circuit: &BitVector) -> Option<(EdgeIndex, NodeIndex)> {
        while self.first_unused_edge < self.graph.edge_count()
            && self.used_edges.contains(self.first_unused_edge)
        {
            self.first_unused_edge += 1;
        }

        (self.first_unused_edge..self.graph.edge_count())
            .map(EdgeIndex::from)
            .filter(|edge| !self.used_edges.contains(edge.as_usize()))
            .find_map(|edge| {
                let endpoints = self.graph.edge_endpoints(edge);
                if nodes_on_circuit.contains(endpoints.from_node.as_usize()) {
                    Some((edge, endpoints.from_node))
                } else if nodes_on_circuit.contains(endpoints.to_node.as_usize()) {
                    Some((edge, endpoints.to_node))
                } else {
                    None
                }
            })
    }

    /// Computes the circuit, starting from the first node of the graph.
    /// Fails if the total weight of the circuit does not fit into a `usize`.
    pub fn build(mut self) -> Result<EulerianCircuit> {
        let start_node = match self.graph.node_indices().next() {
            Some(node) => node,
            None => return Ok(Default::default()),
        };

        let mut nodes_on_circuit = BitVector::new(self.graph.node_count());
        let mut circuit = self.find_cycle(start_node)?;
        mark_nodes(&mut nodes_on_circuit, &circuit);
        let mut cycle_count = 1;

        while self.unused_edge_count > 0 {
            let (edge, cycle_start) = self
                .next_cycle_start(&nodes_on_circuit)
                .ok_or_else(|| ErrorKind::UnreachableEdges(self.unused_edge_count))?;
            debug!(
                "Continuing at edge {} in '{}', {} edges left",
                self.graph.edge_data(edge).number(),
                self.graph.node_name(cycle_start),
                self.unused_edge_count
            );

            let cycle = self.find_cycle(cycle_start)?;
            mark_nodes(&mut nodes_on_circuit, &cycle);
            circuit = self.unite_cycles(circuit, cycle)?;
            cycle_count += 1;
        }

        let total_weight = circuit
            .iter()
            .try_fold(0usize, |total, traversal| {
                total.checked_add(self.graph.edge_weight(traversal.edge))
            })
            .ok_or(ErrorKind::WeightOverflow)?;
        info!(
            "Spliced {} cycles into a circuit of {} edges with total weight {}",
            cycle_count,
            circuit.len(),
            total_weight
        );

        Ok(EulerianCircuit {
            traversals: circuit,
            total_weight,
        })
    }
}

fn mark_nodes(nodes: &mut BitVector, walk: &[Traversal]) {
    for traversal in walk {
        nodes.insert(traversal.from_node.as_usize());
        nodes.insert(traversal.to_node.as_usize());
    }
}

#[cfg(test)]
mod tests {
    use super::{compute_eulerian_circuit, mark_nodes, EulerianCircuitBuilder, Traversal};
    use bitvector::BitVector;
    use crate::error::ErrorKind;
    use routegraph::algo::predefined_graphs::create_cycle_graph;
    use routegraph::{EdgeKind, RouteGraph};

    fn names(graph: &RouteGraph, walk: &[Traversal]) -> Vec<String> {
        walk.iter()
            .map(|traversal| {
                format!(
                    "{}{}",
                    graph.node_name(traversal.from_node),
                    graph.node_name(traversal.to_node)
                )
            })
            .collect()
    }

    #[test]
    fn test_square() {
        let mut graph = RouteGraph::new();
        graph.add_edge(1, "A", "B");
        graph.add_edge(1, "B", "C");
        graph.add_edge(1, "C", "D");
        graph.add_edge(1, "D", "A");

        let circuit = compute_eulerian_circuit(&graph).unwrap();
        assert_eq!(circuit.len(), 4);
        assert_eq!(circuit.total_weight(), 4);
        assert_eq!(names(&graph, circuit.traversals()), vec!["AB", "BC", "CD", "DA"]);
        assert!(circuit.is_closed_walk());
        assert!(circuit.covers_every_edge_once(&graph));
    }

    #[test]
    fn test_edges_walked_against_orientation() {
        let mut graph = RouteGraph::new();
        graph.add_edge(1, "A", "C");
        graph.add_edge(2, "B", "A");
        graph.add_edge(3, "C", "B");

        let circuit = compute_eulerian_circuit(&graph).unwrap();
        assert_eq!(names(&graph, circuit.traversals()), vec!["AB", "BC", "CA"]);
        assert_eq!(circuit.total_weight(), 6);
        assert!(circuit.covers_every_edge_once(&graph));

        let hops: Vec<_> = circuit
            .hops(&graph)
            .map(|hop| (hop.start, hop.end, hop.weight))
            .collect();
        assert_eq!(hops, vec![("A", "B", 2), ("B", "C", 3), ("C", "A", 1)]);
    }

    #[test]
    fn test_bowtie_needs_splicing() {
        // Two triangles sharing node C; the walk from A closes the first triangle before using the second.
        let mut graph = RouteGraph::new();
        graph.add_edge(1, "A", "B");
        graph.add_edge(1, "B", "C");
        graph.add_edge(1, "C", "A");
        graph.add_edge(1, "C", "D");
        graph.add_edge(1, "D", "E");
        graph.add_edge(1, "E", "C");

        let circuit = compute_eulerian_circuit(&graph).unwrap();
        assert_eq!(
            names(&graph, circuit.traversals()),
            vec!["AB", "BC", "CD", "DE", "EC", "CA"]
        );
        assert!(circuit.is_closed_walk());
        assert!(circuit.covers_every_edge_once(&graph));
    }

    #[test]
    fn test_cycle_start_not_adjacent_to_first_unused_edge() {
        // After the first cycle A-B-A, the first unused edge C-D does not touch the circuit.
        let mut graph = RouteGraph::new();
        graph.add_edge(1, "A", "B");
        graph.add_edge(1, "B", "A");
        graph.add_edge(1, "C", "D");
        graph.add_edge(1, "D", "C");
        graph.add_edge(1, "B", "C");
        graph.add_edge(1, "C", "B");

        let circuit = compute_eulerian_circuit(&graph).unwrap();
        assert_eq!(circuit.len(), 6);
        assert!(circuit.is_closed_walk());
        assert!(circuit.covers_every_edge_once(&graph));
        assert_eq!(circuit.start_node(), graph.node_index_of("A"));
    }

    #[test]
    fn test_self_loops_and_parallel_edges() {
        let mut graph = RouteGraph::new();
        graph.add_edge(1, "A", "A");
        graph.add_edge(2, "A", "B");
        graph.add_edge(3, "A", "B");
        graph.add_edge(4, "B", "B");

        let circuit = compute_eulerian_circuit(&graph).unwrap();
        assert_eq!(circuit.len(), 4);
        assert_eq!(circuit.total_weight(), 10);
        assert!(circuit.is_closed_walk());
        assert!(circuit.covers_every_edge_once(&graph));
    }

    #[test]
    fn test_duplicate_edges_are_walked() {
        let mut graph = RouteGraph::new();
        graph.add_edge(3, "A", "B");
        let a = graph.node_index_of("A").unwrap();
        let b = graph.node_index_of("B").unwrap();
        graph.add_edge_between(a, b, 3, EdgeKind::Duplicate);

        let circuit = compute_eulerian_circuit(&graph).unwrap();
        assert_eq!(names(&graph, circuit.traversals()), vec!["AB", "BA"]);
        assert_eq!(circuit.total_weight(), 6);
    }

    #[test]
    fn test_long_cycle() {
        let mut graph = RouteGraph::new();
        create_cycle_graph(&mut graph, 50, 2);
        let circuit = compute_eulerian_circuit(&graph).unwrap();
        assert_eq!(circuit.len(), 50);
        assert_eq!(circuit.total_weight(), 100);
        assert!(circuit.covers_every_edge_once(&graph));
    }

    #[test]
    fn test_empty_graph() {
        let circuit = compute_eulerian_circuit(&RouteGraph::new()).unwrap();
        assert!(circuit.is_empty());
        assert_eq!(circuit.total_weight(), 0);
        assert_eq!(circuit.start_node(), None);
        assert!(circuit.is_closed_walk());
    }

    #[test]
    fn test_odd_degree_dead_end() {
        let mut graph = RouteGraph::new();
        graph.add_edge(1, "A", "B");
        graph.add_edge(1, "B", "C");

        let error = compute_eulerian_circuit(&graph).unwrap_err();
        match error.kind() {
            ErrorKind::CycleDeadEnd(node, start) => {
                assert_eq!(node, "C");
                assert_eq!(start, "A");
            }
            other => panic!("unexpected error kind {:?}", other),
        }
    }

    #[test]
    fn test_disconnected_even_graph() {
        let mut graph = RouteGraph::new();
        create_cycle_graph(&mut graph, 3, 1);
        graph.add_edge(1, "X", "Y");
        graph.add_edge(1, "Y", "X");

        let error = compute_eulerian_circuit(&graph).unwrap_err();
        assert!(matches!(error.kind(), ErrorKind::UnreachableEdges(2)));
    }

    #[test]
    fn test_total_weight_overflow() {
        let mut graph = RouteGraph::new();
        graph.add_edge(usize::MAX / 2 + 1, "A", "B");
        graph.add_edge(usize::MAX / 2 + 1, "B", "A");

        let error = compute_eulerian_circuit(&graph).unwrap_err();
        assert!(matches!(error.kind(), ErrorKind::WeightOverflow));
    }

    #[test]
    fn test_maximum_total_weight() {
        let mut graph = RouteGraph::new();
        graph.add_edge(usize::MAX, "A", "B");
        graph.add_edge(0, "B", "A");

        let circuit = compute_eulerian_circuit(&graph).unwrap();
        assert_eq!(circuit.total_weight(), usize::MAX);
    }

    #[test]
    fn test_next_cycle_start_moves_forward() {
        let mut graph = RouteGraph::new();
        graph.add_edge(1, "A", "B");
        graph.add_edge(1, "B", "A");
        let e2 = graph.add_edge(1, "C", "D");
        graph.add_edge(1, "D", "C");
        let e4 = graph.add_edge(1, "B", "C");
        graph.add_edge(1, "C", "B");
        let node = |name| graph.node_index_of(name).unwrap();
        let (a, b, c) = (node("A"), node("B"), node("C"));

        let mut builder = EulerianCircuitBuilder::new(&graph);
        let mut nodes_on_circuit = BitVector::new(graph.node_count());
        let cycle = builder.find_cycle(a).unwrap();
        mark_nodes(&mut nodes_on_circuit, &cycle);
        assert_eq!(builder.next_cycle_start(&nodes_on_circuit), Some((e4, b)));
        assert_eq!(builder.first_unused_edge, 2);

        let cycle = builder.find_cycle(b).unwrap();
        assert_eq!(names(&graph, &cycle), vec!["BC", "CB"]);
        mark_nodes(&mut nodes_on_circuit, &cycle);
        assert_eq!(builder.next_cycle_start(&nodes_on_circuit), Some((e2, c)));

        builder.find_cycle(c).unwrap();
        assert_eq!(builder.next_cycle_start(&nodes_on_circuit), None);
        assert_eq!(builder.first_unused_edge, graph.edge_count());
    }

    #[test]
    fn test_unite_cycles_without_junction() {
        let mut graph = RouteGraph::new();
        let e0 = graph.add_edge(1, "A", "B");
        let e1 = graph.add_edge(1, "B", "A");
        let e2 = graph.add_edge(1, "C", "D");
        let e3 = graph.add_edge(1, "D", "C");
        let node = |name| graph.node_index_of(name).unwrap();
        let (a, b, c, d) = (node("A"), node("B"), node("C"), node("D"));
        let traversal = |edge, from_node, to_node| Traversal {
            edge,
            from_node,
            to_node,
        };

        let builder = EulerianCircuitBuilder::new(&graph);
        let error = builder
            .unite_cycles(
                vec![traversal(e0, a, b), traversal(e1, b, a)],
                vec![traversal(e2, c, d), traversal(e3, d, c)],
            )
            .unwrap_err();
        assert!(matches!(error.kind(), ErrorKind::NoSplicePoint(name) if name == "C"));
    }

    #[test]
    fn test_find_cycle_returns_to_start() {
        let mut graph = RouteGraph::new();
        graph.add_edge(1, "A", "B");
        graph.add_edge(1, "B", "C");
        graph.add_edge(1, "C", "A");
        graph.add_edge(1, "A", "D");
        graph.add_edge(1, "D", "A");
        let a = graph.node_index_of("A").unwrap();

        let mut builder = EulerianCircuitBuilder::new(&graph);
        let cycle = builder.find_cycle(a).unwrap();
        assert_eq!(names(&graph, &cycle), vec!["AB", "BC", "CA"]);
        assert_eq!(builder.unused_edge_count(), 2);

        let cycle = builder.find_cycle(a).unwrap();
        assert_eq!(names(&graph, &cycle), vec!["AD", "DA"]);
        assert_eq!(builder.unused_edge_count(), 0);
        assert!(builder.find_cycle(a).unwrap().is_empty());
    }
}
