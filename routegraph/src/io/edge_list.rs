use crate::error::{Error, ErrorKind, Result};
use crate::implementation::route_graph::RouteGraph;
use crate::interface::WeightedEdgeData;
use log::{debug, info, warn};
use std::fs::File;
use std::io::{BufRead, BufReader, Write};
use std::path::Path;

/// A single edge as it appears in an edge list.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct EdgeRecord<'a> {
    /// The weight of the edge.
    pub weight: usize,
    /// The name of the start node.
    pub start: &'a str,
    /// The name of the end node.
    pub end: &'a str,
}

/// The classification of a single line of an edge list.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum EdgeListLine<'a> {
    /// An empty line or a line with only whitespace.
    Blank,
    /// A line whose first token starts with `#`.
    Comment,
    /// A well-formed edge.
    Edge(EdgeRecord<'a>),
}

/// Counts of the lines encountered while reading an edge list.
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq)]
pub struct EdgeListStatistics {
    /// The amount of edges added to the graph.
    pub edges: usize,
    /// The amount of comment lines.
    pub comments: usize,
    /// The amount of malformed lines that were skipped.
    pub malformed: usize,
}

/// Parses a single line of an edge list of the form `<weight> <start> <end>`.
/// Tokens after the third are ignored.
/// `line_number` is only used for error reporting.
pub fn parse_edge_list_line(line: &str, line_number: usize) -> Result<EdgeListLine<'_>> {
    let mut tokens = line.split_whitespace();
    let weight = match tokens.next() {
        None => return Ok(EdgeListLine::Blank),
        Some(token) if token.starts_with('#') => return Ok(EdgeListLine::Comment),
        Some(token) => token,
    };

    let weight = weight.parse::<usize>().map_err(|error| {
        ErrorKind::MalformedRecord(
            line_number,
            format!("weight '{}' is not a non-negative integer: {}", weight, error),
        )
    })?;
    let start = tokens
        .next()
        .ok_or_else(|| ErrorKind::MalformedRecord(line_number, "missing start node".into()))?;
    let end = tokens
        .next()
        .ok_or_else(|| ErrorKind::MalformedRecord(line_number, "missing end node".into()))?;

    Ok(EdgeListLine::Edge(EdgeRecord { weight, start, end }))
}

/// Reads an edge list and adds its edges to the given graph.
///
/// Malformed lines, including lines that are not valid UTF-8, are logged and skipped.
/// Only I/O errors abort reading.
pub fn read_edge_list<Reader: BufRead>(
    graph: &mut RouteGraph,
    mut reader: Reader,
) -> Result<EdgeListStatistics> {
    let mut statistics = EdgeListStatistics::default();
    let mut buffer = Vec::new();
    let mut line_number = 0;

    loop {
        buffer.clear();
        if reader.read_until(b'\n', &mut buffer)? == 0 {
            break;
        }
        line_number += 1;

        let parsed = std::str::from_utf8(&buffer)
            .map_err(|_| {
                Error::from(ErrorKind::MalformedRecord(
                    line_number,
                    "invalid UTF-8".into(),
                ))
            })
            .and_then(|line| parse_edge_list_line(line, line_number));
        match parsed {
            Ok(EdgeListLine::Blank) => {}
            Ok(EdgeListLine::Comment) => statistics.comments += 1,
            Ok(EdgeListLine::Edge(record)) => {
                graph.add_edge(record.weight, record.start, record.end);
                statistics.edges += 1;
            }
            Err(error) => {
                warn!("Skipping line: {}", error);
                statistics.malformed += 1;
            }
        }
    }

    debug!("Edge list statistics: {:?}", statistics);
    Ok(statistics)
}

/// Reads an edge list from the file at the given path.
pub fn read_edge_list_from_file<P: AsRef<Path>>(
    graph: &mut RouteGraph,
    path: P,
) -> Result<EdgeListStatistics> {
    info!("Reading edge list from '{}'", path.as_ref().display());
    let reader = BufReader::new(File::open(path)?);
    read_edge_list(graph, reader)
}

/// Writes the original edges of the graph as edge list, in creation order.
/// Edges added by augmentation are skipped.
pub fn write_edge_list<Writer: Write>(graph: &RouteGraph, writer: &mut Writer) -> Result<()> {
    writeln!(
        writer,
        "# {} nodes, {} edges",
        graph.node_count(),
        graph.edge_count() - graph.duplicate_edge_count()
    )?;

    for edge in graph.edge_indices() {
        let edge_data = graph.edge_data(edge);
        if edge_data.is_duplicate() {
            continue;
        }

        let endpoints = graph.edge_endpoints(edge);
        writeln!(
            writer,
            "{} {} {}",
            edge_data.weight(),
            graph.node_name(endpoints.from_node),
            graph.node_name(endpoints.to_node)
        )?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{
        parse_edge_list_line, read_edge_list, write_edge_list, EdgeListLine, EdgeListStatistics,
        EdgeRecord,
    };
    use crate::error::ErrorKind;
    use crate::implementation::route_graph::{EdgeKind, RouteGraph};

    #[test]
    fn test_parse_edge_list_line() {
        assert_eq!(parse_edge_list_line("", 1).unwrap(), EdgeListLine::Blank);
        assert_eq!(parse_edge_list_line("   ", 1).unwrap(), EdgeListLine::Blank);
        assert_eq!(
            parse_edge_list_line("# 1 A B", 1).unwrap(),
            EdgeListLine::Comment
        );
        assert_eq!(
            parse_edge_list_line("#comment", 1).unwrap(),
            EdgeListLine::Comment
        );
        assert_eq!(
            parse_edge_list_line("7 A B extra", 1).unwrap(),
            EdgeListLine::Edge(EdgeRecord {
                weight: 7,
                start: "A",
                end: "B"
            })
        );
    }

    #[test]
    fn test_parse_malformed_lines() {
        for line in &["x A B", "-1 A B", "3 A", "3"] {
            match parse_edge_list_line(line, 4) {
                Err(error) => match error.kind() {
                    ErrorKind::MalformedRecord(line_number, _) => assert_eq!(*line_number, 4),
                    other => panic!("unexpected error kind {:?}", other),
                },
                Ok(parsed) => panic!("'{}' parsed as {:?}", line, parsed),
            }
        }
    }

    #[test]
    fn test_read_edge_list_skips_malformed_lines() {
        let input = "# weight start end\n1 A B\nabc B C\n\n2 B C\n3 C\n4 C A\n";
        let mut graph = RouteGraph::new();
        let statistics = read_edge_list(&mut graph, input.as_bytes()).unwrap();

        assert_eq!(
            statistics,
            EdgeListStatistics {
                edges: 3,
                comments: 1,
                malformed: 2
            }
        );
        assert_eq!(graph.node_count(), 3);
        assert_eq!(graph.edge_count(), 3);
        assert_eq!(graph.total_weight(), Some(7));
    }

    #[test]
    fn test_read_edge_list_skips_invalid_utf8() {
        let input: &[u8] = b"1 A B\n2 \xff\xfe C\n3 B C\n4 C A";
        let mut graph = RouteGraph::new();
        let statistics = read_edge_list(&mut graph, input).unwrap();

        assert_eq!(
            statistics,
            EdgeListStatistics {
                edges: 3,
                comments: 0,
                malformed: 1
            }
        );
        assert_eq!(graph.edge_count(), 3);
        assert_eq!(graph.total_weight(), Some(8));
    }

    #[test]
    fn test_write_edge_list_skips_duplicates() {
        let mut graph = RouteGraph::new();
        graph.add_edge(1, "A", "B");
        graph.add_edge(2, "B", "C");
        let a = graph.node_index_of("A").unwrap();
        let b = graph.node_index_of("B").unwrap();
        graph.add_edge_between(a, b, 1, EdgeKind::Duplicate);

        let mut output = Vec::new();
        write_edge_list(&graph, &mut output).unwrap();
        let output = String::from_utf8(output).unwrap();
        assert_eq!(output, "# 3 nodes, 2 edges\n1 A B\n2 B C\n");

        let mut reread = RouteGraph::new();
        read_edge_list(&mut reread, output.as_bytes()).unwrap();
        assert_eq!(reread.edge_count(), 2);
        assert_eq!(reread.total_weight(), Some(3));
    }
}
