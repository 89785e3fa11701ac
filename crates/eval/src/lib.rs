//! Causeway answer evaluation -- scores free-text answers against
//! generated questions, samples few-shot examples, builds prompts and
//! runs benchmarks against a language model.
//!
//! Binary correctness is a whole-word match of the expected answer. Fact
//! accuracy compares the cited fact ids with every supporting fact set of
//! the question and keeps the worst match (see [`accuracy::score`]).

pub mod accuracy;
pub mod answer;
pub mod citation;
pub mod error;
pub mod llm;
pub mod prompt;
pub mod runner;
pub mod sampler;

pub use accuracy::{score, score_citations, FactAccuracy};
pub use answer::{check_answer, is_correct};
pub use citation::extract_citations;
pub use error::EvalError;
pub use llm::{LlmClient, LlmError};
pub use prompt::{binary_question_prompt, prompt_header, PromptStyle};
pub use runner::{build_prompt, run_benchmark, QuestionOutcome, RunConfig, RunReport, TypeSummary};
pub use sampler::{FewShotSampler, SamplingMode};

#[cfg(feature = "anthropic")]
pub use llm::AnthropicClient;

use causeway_core::Question;
use serde::Serialize;

/// Both scores for one answer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnswerEvaluation {
    pub is_correct: bool,
    /// `None` when the question has no supporting facts.
    pub fact_accuracy: Option<FactAccuracy>,
}

/// Score `free_text` as an answer to `question`.
///
/// Questions without supporting facts (`chain_none`) only receive the
/// binary score.
pub fn evaluate_answer(question: &Question, free_text: &str) -> Result<AnswerEvaluation, EvalError> {
    let fact_accuracy = if question.supporting_facts.is_empty() {
        None
    } else {
        Some(score(question, free_text)?)
    };
    Ok(AnswerEvaluation {
        is_correct: check_answer(question.answer, free_text),
        fact_accuracy,
    })
}
