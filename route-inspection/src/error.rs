use error_chain::error_chain;

error_chain! {
    links {
        RouteGraph(routegraph::error::Error, routegraph::error::ErrorKind)
        /// A wrapper for errors of the graph crate.
        ;
    }

    errors {
        DisconnectedNodes(from: String, to: String) {
            description("two nodes that need to be paired are not connected")
            display("there is no path between '{}' and '{}', the graph is not connected", from, to)
        }

        OddCardinality(count: usize) {
            description("the set of odd-degree nodes has odd cardinality")
            display("found {} odd-degree nodes, but their amount must be even", count)
        }

        CycleDeadEnd(node: String, start: String) {
            description("a cycle got stuck before returning to its start node")
            display("the cycle starting in '{}' got stuck in '{}', which has no unused edges left", start, node)
        }

        NoSplicePoint(node: String) {
            description("a cycle does not touch the circuit it should be spliced into")
            display("the circuit does not pass through '{}', where the new cycle starts", node)
        }

        UnreachableEdges(count: usize) {
            description("some edges cannot be reached from the circuit")
            display("{} edges are not reachable from the circuit, the graph is not connected", count)
        }

        WeightOverflow {
            description("a sum of edge weights does not fit into a machine word")
            display("the edge weights are too large, their sum does not fit into {} bits", usize::BITS)
        }
    }
}
