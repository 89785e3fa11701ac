use std::path::Path;
use std::process;

use causeway_eval::{build_prompt, RunConfig};
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::{report_error, OutputFormat};

pub(crate) fn cmd_prompt(
    path: &Path,
    index: usize,
    config: &RunConfig,
    seed: u64,
    output: OutputFormat,
    quiet: bool,
) {
    let benchmark = super::load_benchmark(path, output, quiet);
    let question = super::require_question(&benchmark.questions, index, output, quiet);

    let mut rng = StdRng::seed_from_u64(seed);
    let prompt = match build_prompt(
        &benchmark.graph,
        &benchmark.facts,
        &benchmark.questions,
        index,
        config,
        &mut rng,
    ) {
        Ok(p) => p,
        Err(e) => {
            report_error(&format!("error: {}", e), output, quiet);
            process::exit(1);
        }
    };

    match output {
        OutputFormat::Json => {
            let doc = serde_json::json!({
                "question": question,
                "style": config.style,
                "shots": config.shots,
                "mode": config.mode,
                "seed": seed,
                "prompt": prompt,
            });
            super::print_json(&doc, output, quiet);
        }
        OutputFormat::Text => println!("{}", prompt),
    }
}
