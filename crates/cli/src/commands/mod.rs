pub(crate) mod dag;
pub(crate) mod facts;
pub(crate) mod prompt;
pub(crate) mod questions;
pub(crate) mod run;
pub(crate) mod score;

use std::path::Path;
use std::process;

use causeway_core::{
    generate_all_pair_questions, generate_facts, parse_edgelist, CausalGraph, FactSet, Question,
};

use crate::{report_error, OutputFormat};

/// A parsed graph with its facts and questions.
pub(crate) struct Benchmark {
    pub graph: CausalGraph,
    pub facts: FactSet,
    pub questions: Vec<Question>,
}

/// Read an edgelist file, exiting with status 1 on failure.
pub(crate) fn load_graph(path: &Path, output: OutputFormat, quiet: bool) -> CausalGraph {
    let content = match std::fs::read_to_string(path) {
        Ok(s) => s,
        Err(e) => {
            let msg = format!("error reading file '{}': {}", path.display(), e);
            report_error(&msg, output, quiet);
            process::exit(1);
        }
    };

    match parse_edgelist(&content) {
        Ok(graph) => {
            tracing::debug!(
                path = %path.display(),
                nodes = graph.node_count(),
                edges = graph.edge_count(),
                "loaded graph"
            );
            graph
        }
        Err(e) => {
            let msg = format!("invalid graph '{}': {}", path.display(), e);
            report_error(&msg, output, quiet);
            process::exit(1);
        }
    }
}

/// Load a graph and derive its facts and questions.
pub(crate) fn load_benchmark(path: &Path, output: OutputFormat, quiet: bool) -> Benchmark {
    let graph = load_graph(path, output, quiet);
    let facts = generate_facts(&graph);
    let questions = match generate_all_pair_questions(&graph, &facts) {
        Ok(q) => q,
        Err(e) => {
            report_error(&format!("question generation failed: {}", e), output, quiet);
            process::exit(1);
        }
    };
    Benchmark {
        graph,
        facts,
        questions,
    }
}

/// `questions[index]`, exiting with status 1 when out of range.
pub(crate) fn require_question(
    questions: &[Question],
    index: usize,
    output: OutputFormat,
    quiet: bool,
) -> &Question {
    match questions.get(index) {
        Some(q) => q,
        None => {
            let msg = format!(
                "question index {} out of range ({} questions)",
                index,
                questions.len()
            );
            report_error(&msg, output, quiet);
            process::exit(1);
        }
    }
}

/// Pretty-print a serializable value as JSON on stdout.
pub(crate) fn print_json<T: serde::Serialize>(value: &T, output: OutputFormat, quiet: bool) {
    match serde_json::to_string_pretty(value) {
        Ok(s) => println!("{}", s),
        Err(e) => {
            report_error(&format!("serialization error: {}", e), output, quiet);
            process::exit(1);
        }
    }
}
