use std::path::Path;

use crate::OutputFormat;

pub(crate) fn cmd_questions(path: &Path, output: OutputFormat, quiet: bool) {
    let benchmark = super::load_benchmark(path, output, quiet);

    match output {
        OutputFormat::Json => super::print_json(&benchmark.questions, output, quiet),
        OutputFormat::Text => {
            for (index, q) in benchmark.questions.iter().enumerate() {
                println!("{}\t{}\t{}\t{}", index, q.symbol, q.answer, q.kind);
            }
            if !quiet {
                eprintln!(
                    "{} questions over {} variables",
                    benchmark.questions.len(),
                    benchmark.graph.node_count()
                );
            }
        }
    }
}
