//! Plain-text graph formats.
//!
//! Edgelist: one `cause effect [attributes...]` per line. Anything after
//! the second token is ignored, which accepts the `{}` attribute column
//! written by common graph tools. A line with a single token declares an
//! isolated node. Blank lines and `#` comments are skipped.

use std::fmt::Write;

use crate::error::CausalError;
use crate::graph::CausalGraph;

/// Parse an edgelist. Cyclic input is rejected with `InvalidGraph`.
pub fn parse_edgelist(input: &str) -> Result<CausalGraph, CausalError> {
    let mut graph = CausalGraph::new();

    for (line_no, raw) in input.lines().enumerate() {
        let line = raw.split('#').next().unwrap_or("").trim();
        if line.is_empty() {
            continue;
        }
        let mut tokens = line.split_whitespace();
        match (tokens.next(), tokens.next()) {
            (Some(node), None) => {
                graph.add_node(node);
            }
            (Some(from), Some(to)) => {
                if to.starts_with('{') {
                    return Err(CausalError::Parse {
                        line: line_no + 1,
                        message: format!("expected target node after '{from}'"),
                    });
                }
                graph.add_edge(from, to)?;
            }
            _ => {}
        }
    }

    Ok(graph)
}

/// Render as an edgelist. Isolated nodes are written on their own line so
/// that parsing the output reproduces the same node set.
pub fn to_edgelist(graph: &CausalGraph) -> String {
    let mut out = String::new();
    for (from, to) in graph.edges() {
        let _ = writeln!(out, "{} {} {{}}", graph.label(from), graph.label(to));
    }
    for node in graph.isolated_nodes() {
        let _ = writeln!(out, "{}", graph.label(node));
    }
    out
}

/// Render as a Graphviz DOT digraph.
pub fn to_dot(graph: &CausalGraph) -> String {
    let mut out = String::from("strict digraph {\n");
    for node in graph.nodes() {
        let _ = writeln!(out, "\"{}\";", escape(graph.label(node)));
    }
    for (from, to) in graph.edges() {
        let _ = writeln!(
            out,
            "\"{}\" -> \"{}\";",
            escape(graph.label(from)),
            escape(graph.label(to))
        );
    }
    out.push_str("}\n");
    out
}

fn escape(label: &str) -> String {
    label.replace('\\', "\\\\").replace('"', "\\\"")
}
