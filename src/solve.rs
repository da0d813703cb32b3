use crate::CliOptions;
use clap::Parser;
use log::info;
use route_inspection::circuit::EulerianCircuit;
use route_inspection::solve_route_inspection;
use routegraph::io::edge_list::read_edge_list_from_file;
use routegraph::{RouteGraph, WeightedEdgeData};
use serde::Serialize;
use std::fs::File;
use std::io::{BufWriter, Write};

#[derive(Parser)]
pub struct SolveCommand {
    #[clap(
        short,
        long,
        help = "The input file as edge list, one edge per line in the form '<weight> <start> <end>'"
    )]
    pub input: String,

    #[clap(
        short,
        long,
        help = "The file the circuit is written to, one edge per line. If not given, the circuit is printed to stdout"
    )]
    pub output: Option<String>,

    #[clap(
        long,
        help = "A file to output the nodes, the augmented edges and the circuit in JSON format"
    )]
    pub json_output: Option<String>,
}

#[derive(Serialize)]
struct JsonNode<'a> {
    name: &'a str,
    degree: usize,
}

#[derive(Serialize)]
struct JsonEdge<'a> {
    number: usize,
    start: &'a str,
    end: &'a str,
    weight: usize,
    duplicate: bool,
}

#[derive(Serialize)]
struct JsonHop<'a> {
    start: &'a str,
    end: &'a str,
    weight: usize,
}

#[derive(Serialize)]
struct JsonResult<'a> {
    nodes: Vec<JsonNode<'a>>,
    edges: Vec<JsonEdge<'a>>,
    circuit: Vec<JsonHop<'a>>,
    total_weight: usize,
}

impl<'a> JsonResult<'a> {
    fn new(graph: &'a RouteGraph, circuit: &'a EulerianCircuit) -> Self {
        let nodes = graph
            .node_indices()
            .map(|node| JsonNode {
                name: graph.node_name(node),
                degree: graph.degree(node),
            })
            .collect();
        let edges = graph
            .edge_indices()
            .map(|edge| {
                let edge_data = graph.edge_data(edge);
                let endpoints = graph.edge_endpoints(edge);
                JsonEdge {
                    number: edge_data.number(),
                    start: graph.node_name(endpoints.from_node),
                    end: graph.node_name(endpoints.to_node),
                    weight: edge_data.weight(),
                    duplicate: edge_data.is_duplicate(),
                }
            })
            .collect();
        let hops = circuit
            .hops(graph)
            .map(|hop| JsonHop {
                start: hop.start,
                end: hop.end,
                weight: hop.weight,
            })
            .collect();

        Self {
            nodes,
            edges,
            circuit: hops,
            total_weight: circuit.total_weight(),
        }
    }
}

pub(crate) fn write_circuit<Writer: Write>(
    graph: &RouteGraph,
    circuit: &EulerianCircuit,
    writer: &mut Writer,
) -> crate::Result<()> {
    for hop in circuit.hops(graph) {
        writeln!(writer, "{} {} {}", hop.start, hop.end, hop.weight)?;
    }
    writeln!(writer, "total weight: {}", circuit.total_weight())?;
    Ok(())
}

pub(crate) fn solve(_options: &CliOptions, subcommand: &SolveCommand) -> crate::Result<()> {
    let mut graph = RouteGraph::new();
    let statistics = read_edge_list_from_file(&mut graph, &subcommand.input)?;
    info!(
        "Read {} nodes and {} edges ({} malformed lines skipped)",
        graph.node_count(),
        statistics.edges,
        statistics.malformed
    );

    let solution = solve_route_inspection(&mut graph)?;
    info!(
        "Found a circuit of {} edges with total weight {}, of which {} are duplicates of weight {}",
        solution.circuit().len(),
        solution.total_weight(),
        solution.duplicate_edges().len(),
        solution.matching().cost()
    );

    if let Some(output) = &subcommand.output {
        info!("Writing circuit to '{}'", output);
        let mut output_writer = BufWriter::new(File::create(output)?);
        write_circuit(&graph, solution.circuit(), &mut output_writer)?;
        output_writer.flush()?;
    } else {
        let stdout = std::io::stdout();
        let mut output_writer = stdout.lock();
        write_circuit(&graph, solution.circuit(), &mut output_writer)?;
    }

    if let Some(json_output) = &subcommand.json_output {
        info!("Writing JSON result to '{}'", json_output);
        let mut json_writer = BufWriter::new(File::create(json_output)?);
        serde_json::to_writer_pretty(
            &mut json_writer,
            &JsonResult::new(&graph, solution.circuit()),
        )?;
        writeln!(json_writer)?;
        json_writer.flush()?;
    }

    Ok(())
}
