use std::path::Path;
use std::process;

use crate::config::CausewayConfig;
use crate::{report_error, OutputFormat};

#[cfg(not(feature = "anthropic"))]
pub(crate) fn cmd_run(
    _path: &Path,
    _out: Option<&Path>,
    _model: Option<&str>,
    _seed: u64,
    _config: &CausewayConfig,
    output: OutputFormat,
    quiet: bool,
) {
    report_error(
        "the run command needs a language model client; rebuild with `--features anthropic`",
        output,
        quiet,
    );
    process::exit(1);
}

#[cfg(feature = "anthropic")]
pub(crate) fn cmd_run(
    path: &Path,
    out: Option<&Path>,
    model: Option<&str>,
    seed: u64,
    config: &CausewayConfig,
    output: OutputFormat,
    quiet: bool,
) {
    use causeway_eval::{run_benchmark, AnthropicClient};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    let benchmark = super::load_benchmark(path, output, quiet);

    let model = model.unwrap_or(config.model.name.as_str());
    let client = match AnthropicClient::from_env(model) {
        Ok(c) => c.with_max_tokens(config.model.max_tokens),
        Err(e) => {
            report_error(&format!("error: {}", e), output, quiet);
            process::exit(1);
        }
    };

    let run_config = config.run_config();
    let mut rng = StdRng::seed_from_u64(seed);
    let report = match run_benchmark(
        &client,
        &benchmark.graph,
        &benchmark.facts,
        &benchmark.questions,
        &run_config,
        &mut rng,
    ) {
        Ok(r) => r,
        Err(e) => {
            report_error(&format!("benchmark failed: {}", e), output, quiet);
            process::exit(1);
        }
    };

    if let Some(out) = out {
        let json = match serde_json::to_string_pretty(&report) {
            Ok(s) => s,
            Err(e) => {
                report_error(&format!("serialization error: {}", e), output, quiet);
                process::exit(1);
            }
        };
        if let Err(e) = std::fs::write(out, json) {
            let msg = format!("error writing '{}': {}", out.display(), e);
            report_error(&msg, output, quiet);
            process::exit(1);
        }
    }

    match output {
        OutputFormat::Json if out.is_none() => super::print_json(&report, output, quiet),
        OutputFormat::Json => {}
        OutputFormat::Text => {
            println!(
                "accuracy: {:.3} ({} questions, model {})",
                report.accuracy,
                report.outcomes.len(),
                model
            );
            for (kind, summary) in &report.by_type {
                let f1 = summary
                    .mean_f1
                    .map(|f| format!("{:.3}", f))
                    .unwrap_or_else(|| "n/a".to_string());
                println!(
                    "  {:<14} {:>3}/{:<3} accuracy={:.3} mean_f1={}",
                    kind, summary.correct, summary.total, summary.accuracy, f1
                );
            }
        }
    }
}
