use std::path::Path;

use causeway_core::generate_facts;

use crate::OutputFormat;

pub(crate) fn cmd_facts(path: &Path, output: OutputFormat, quiet: bool) {
    let graph = super::load_graph(path, output, quiet);
    let facts = generate_facts(&graph);

    match output {
        OutputFormat::Json => super::print_json(&facts.facts(), output, quiet),
        OutputFormat::Text => {
            for fact in &facts {
                println!("Fact {}: {}", fact.id, fact.text);
            }
        }
    }
}
