use crate::{CliOptions, ErrorKind};
use clap::Parser;
use log::{error, info};
use rand::rngs::StdRng;
use rand::SeedableRng;
use routegraph::algo::predefined_graphs::create_random_connected_graph;
use routegraph::io::edge_list::write_edge_list;
use routegraph::RouteGraph;
use std::fs::File;
use std::io::{BufWriter, Write};

#[derive(Parser)]
pub struct GenerateCommand {
    #[clap(
        short,
        long,
        help = "The shape of the generated graph. Must have an argument of the form n<node count>+m<edge count>."
    )]
    pub random: String,

    #[clap(
        long,
        default_value = "100",
        help = "The maximum weight of a generated edge, weights are drawn uniformly from zero up to this value"
    )]
    pub max_weight: usize,

    #[clap(
        short,
        long,
        help = "The seed of the random number generator. If not given, the graph is generated from system randomness"
    )]
    pub seed: Option<u64>,

    #[clap(short, long, help = "The file the generated edge list is written to")]
    pub output: String,
}

pub(crate) fn parse_random_shape(random: &str) -> crate::Result<(usize, usize)> {
    scan_fmt!(random, "n{d}+m{d}", usize, usize).map_err(|scan_error| {
        error!(
            "Could not parse argument of random '{}': {}. Make sure it fulfills the format in the help message.",
            random, scan_error
        );
        ErrorKind::Parameter.into()
    })
}

pub(crate) fn generate(_options: &CliOptions, subcommand: &GenerateCommand) -> crate::Result<()> {
    let (node_count, edge_count) = parse_random_shape(&subcommand.random)?;
    let mut random = if let Some(seed) = subcommand.seed {
        StdRng::seed_from_u64(seed)
    } else {
        StdRng::from_entropy()
    };

    let mut graph = RouteGraph::new();
    create_random_connected_graph(
        &mut graph,
        node_count,
        edge_count,
        subcommand.max_weight,
        &mut random,
    );
    info!(
        "Generated connected graph with {} nodes and {} edges",
        graph.node_count(),
        graph.edge_count()
    );

    info!("Writing edge list to '{}'", subcommand.output);
    let mut output_writer = BufWriter::new(File::create(&subcommand.output)?);
    write_edge_list(&graph, &mut output_writer)?;
    output_writer.flush()?;
    Ok(())
}
