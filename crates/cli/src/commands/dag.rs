use std::process;

use causeway_core::{generate_dag, to_dot, to_edgelist};
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::{report_error, OutputFormat};

pub(crate) fn cmd_dag(
    nodes: usize,
    probability: f64,
    seed: u64,
    dot: bool,
    output: OutputFormat,
    quiet: bool,
) {
    let mut rng = StdRng::seed_from_u64(seed);
    let graph = match generate_dag(&mut rng, nodes, probability) {
        Ok(g) => g,
        Err(e) => {
            report_error(&format!("error: {}", e), output, quiet);
            process::exit(1);
        }
    };

    match output {
        OutputFormat::Json => {
            let edges: Vec<[&str; 2]> = graph
                .edges()
                .map(|(from, to)| [graph.label(from), graph.label(to)])
                .collect();
            let doc = serde_json::json!({
                "seed": seed,
                "nodes": graph.labels(),
                "edges": edges,
            });
            super::print_json(&doc, output, quiet);
        }
        OutputFormat::Text if dot => print!("{}", to_dot(&graph)),
        OutputFormat::Text => print!("{}", to_edgelist(&graph)),
    }
}
