use std::path::Path;
use std::process;

use causeway_eval::evaluate_answer;

use crate::{report_error, OutputFormat};

pub(crate) fn cmd_score(path: &Path, index: usize, answer: &str, output: OutputFormat, quiet: bool) {
    let benchmark = super::load_benchmark(path, output, quiet);
    let question = super::require_question(&benchmark.questions, index, output, quiet);

    let evaluation = match evaluate_answer(question, answer) {
        Ok(e) => e,
        Err(e) => {
            report_error(&format!("error: {}", e), output, quiet);
            process::exit(1);
        }
    };

    match output {
        OutputFormat::Json => {
            let doc = serde_json::json!({
                "symbol": question.symbol,
                "expected": question.answer,
                "type": question.kind,
                "is_correct": evaluation.is_correct,
                "fact_accuracy": evaluation.fact_accuracy,
            });
            super::print_json(&doc, output, quiet);
        }
        OutputFormat::Text => {
            println!("question: {}", question.symbol);
            println!("expected: {}", question.answer);
            println!("correct: {}", evaluation.is_correct);
            match evaluation.fact_accuracy {
                Some(m) => {
                    println!(
                        "facts: tp={} fp={} fn={}",
                        m.true_positive, m.false_positive, m.false_negative
                    );
                    println!(
                        "precision={:.3} recall={:.3} f1={:.3}",
                        m.precision, m.recall, m.f1
                    );
                }
                None => println!("facts: n/a ({})", question.kind),
            }
        }
    }
}
