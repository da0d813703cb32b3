use crate::CliOptions;
use clap::Parser;
use routegraph::io::edge_list::read_edge_list_from_file;
use routegraph::{EdgeIndex, RouteGraph, WeightedEdgeData};
use std::io::Write;

#[derive(Parser)]
pub struct DescribeCommand {
    #[clap(short, long, help = "The input file as edge list")]
    pub input: String,
}

fn write_edge_references<Writer: Write>(
    graph: &RouteGraph,
    edges: &[EdgeIndex],
    writer: &mut Writer,
) -> crate::Result<()> {
    if edges.is_empty() {
        write!(writer, " -")?;
    }
    for &edge in edges {
        let edge_data = graph.edge_data(edge);
        write!(writer, " {} ({})", edge_data.number(), edge_data.weight())?;
    }
    Ok(())
}

pub(crate) fn write_node_listing<Writer: Write>(
    graph: &RouteGraph,
    writer: &mut Writer,
) -> crate::Result<()> {
    for node in graph.node_indices() {
        let node_data = graph.node_data(node);
        writeln!(writer, "{}", node_data.name())?;

        write!(writer, "  in:")?;
        write_edge_references(graph, node_data.in_edges(), writer)?;
        writeln!(writer)?;

        write!(writer, "  out:")?;
        write_edge_references(graph, node_data.out_edges(), writer)?;
        writeln!(writer)?;
    }
    Ok(())
}

pub(crate) fn describe(_options: &CliOptions, subcommand: &DescribeCommand) -> crate::Result<()> {
    let mut graph = RouteGraph::new();
    read_edge_list_from_file(&mut graph, &subcommand.input)?;

    let stdout = std::io::stdout();
    let mut output_writer = stdout.lock();
    write_node_listing(&graph, &mut output_writer)
}
