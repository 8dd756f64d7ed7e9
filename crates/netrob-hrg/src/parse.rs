//! Line contract of the generator's edge-list output.

use std::fs;
use std::path::Path;

use netrob_core::errors::{ErrorInfo, NetError};
use netrob_core::NodeId;
use netrob_graph::Graph;

/// Leading metadata lines written before the edge list.
pub const HEADER_LINES: usize = 2;

/// Parses the generator's output into `(u, v)` pairs.
///
/// The first [`HEADER_LINES`] lines are discarded, as is a trailing blank
/// line. Every other line must hold exactly two non-negative integers.
pub fn parse_edge_list(text: &str) -> Result<Vec<(u64, u64)>, NetError> {
    let lines: Vec<&str> = text.lines().collect();
    if lines.len() < HEADER_LINES {
        return Err(NetError::Output(
            ErrorInfo::new("truncated-output", "output ends before the header")
                .with_context("lines", lines.len().to_string()),
        ));
    }
    let mut body = &lines[HEADER_LINES..];
    if let Some((last, rest)) = body.split_last() {
        if last.trim().is_empty() {
            body = rest;
        }
    }
    body.iter()
        .enumerate()
        .map(|(idx, line)| parse_line(idx + HEADER_LINES + 1, line))
        .collect()
}

fn parse_line(number: usize, line: &str) -> Result<(u64, u64), NetError> {
    let malformed = |reason: &str| {
        NetError::Output(
            ErrorInfo::new("malformed-line", format!("edge line {number} {reason}"))
                .with_context("line", number.to_string())
                .with_context("content", line),
        )
    };
    let fields: Vec<&str> = line.split_whitespace().collect();
    let [u, v] = fields.as_slice() else {
        return Err(malformed(&format!(
            "has {} fields, expected 2",
            fields.len()
        )));
    };
    let u = u
        .parse::<u64>()
        .map_err(|err| malformed(&format!("has a bad endpoint: {err}")))?;
    let v = v
        .parse::<u64>()
        .map_err(|err| malformed(&format!("has a bad endpoint: {err}")))?;
    Ok((u, v))
}

/// Reads and parses an output file, deleting it once parsing succeeded.
/// A file that fails to parse is left in place for inspection.
pub fn read_edge_file(path: &Path) -> Result<Vec<(u64, u64)>, NetError> {
    let text = fs::read_to_string(path).map_err(|err| {
        NetError::Output(
            ErrorInfo::new("unreadable-output", err.to_string())
                .with_context("path", path.display().to_string()),
        )
    })?;
    let edges = parse_edge_list(&text)?;
    fs::remove_file(path).map_err(|err| NetError::io("cleanup-output", path, &err))?;
    Ok(edges)
}

/// Builds a graph on nodes `0..n` holding the parsed edges.
///
/// Endpoints beyond `n` become extra nodes and duplicate lines collapse; the
/// requested `n` is not reconciled with what the generator emitted.
pub fn build_graph(n: usize, edges: &[(u64, u64)]) -> Result<Graph, NetError> {
    let mut graph = Graph::with_nodes(n);
    for &(u, v) in edges {
        if u == v {
            return Err(NetError::Output(
                ErrorInfo::new("self-loop", "generator emitted a self-loop")
                    .with_context("node", u.to_string()),
            ));
        }
        let (u, v) = (NodeId::from_raw(u), NodeId::from_raw(v));
        graph.add_node(u)?;
        graph.add_node(v)?;
        graph.add_edge(u, v)?;
    }
    Ok(graph)
}
