//! Benchmark runs: prompt a model with every question and score its answers.

use std::collections::{BTreeMap, BTreeSet};

use causeway_core::{CausalGraph, FactSet, Question};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::accuracy::{score, FactAccuracy};
use crate::answer::check_answer;
use crate::error::EvalError;
use crate::llm::LlmClient;
use crate::prompt::{binary_question_prompt, prompt_header, PromptStyle};
use crate::sampler::{FewShotSampler, SamplingMode};

/// Settings for a benchmark run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RunConfig {
    pub style: PromptStyle,
    /// Few-shot examples per question; 0 disables examples.
    pub shots: usize,
    pub mode: SamplingMode,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            style: PromptStyle::default(),
            shots: 5,
            mode: SamplingMode::Balanced,
        }
    }
}

/// The model's answer to one question and how it scored.
#[derive(Debug, Clone, Serialize)]
pub struct QuestionOutcome {
    pub index: usize,
    pub question: Question,
    pub model_answer: String,
    pub is_correct: bool,
    /// `None` for questions without supporting facts.
    pub fact_accuracy: Option<FactAccuracy>,
}

/// Aggregate results for one question type.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TypeSummary {
    pub total: usize,
    pub correct: usize,
    pub accuracy: f64,
    pub mean_f1: Option<f64>,
}

#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub outcomes: Vec<QuestionOutcome>,
    pub accuracy: f64,
    /// Keyed by question type (`chain_2`, `chain_1_anti`, ...).
    pub by_type: BTreeMap<String, TypeSummary>,
}

impl RunReport {
    pub fn from_outcomes(outcomes: Vec<QuestionOutcome>) -> Self {
        let correct = outcomes.iter().filter(|o| o.is_correct).count();
        let accuracy = mean_ratio(correct, outcomes.len());

        let mut grouped: BTreeMap<String, Vec<&QuestionOutcome>> = BTreeMap::new();
        for outcome in &outcomes {
            grouped
                .entry(outcome.question.kind.to_string())
                .or_default()
                .push(outcome);
        }

        let by_type = grouped
            .into_iter()
            .map(|(kind, group)| {
                let correct = group.iter().filter(|o| o.is_correct).count();
                let f1s: Vec<f64> = group
                    .iter()
                    .filter_map(|o| o.fact_accuracy.map(|m| m.f1))
                    .collect();
                let mean_f1 = if f1s.is_empty() {
                    None
                } else {
                    Some(f1s.iter().sum::<f64>() / f1s.len() as f64)
                };
                let summary = TypeSummary {
                    total: group.len(),
                    correct,
                    accuracy: mean_ratio(correct, group.len()),
                    mean_f1,
                };
                (kind, summary)
            })
            .collect();

        Self {
            outcomes,
            accuracy,
            by_type,
        }
    }
}

fn mean_ratio(numerator: usize, denominator: usize) -> f64 {
    if denominator == 0 {
        0.0
    } else {
        numerator as f64 / denominator as f64
    }
}

/// Full prompt for `questions[index]`: graph header, `shots` examples drawn
/// from the other questions, then the question itself.
pub fn build_prompt<R: Rng + ?Sized>(
    graph: &CausalGraph,
    facts: &FactSet,
    questions: &[Question],
    index: usize,
    config: &RunConfig,
    rng: &mut R,
) -> Result<String, EvalError> {
    let question = questions.get(index).ok_or(EvalError::QuestionOutOfRange {
        index,
        len: questions.len(),
    })?;

    let examples = if config.shots == 0 {
        Vec::new()
    } else {
        FewShotSampler::new(config.mode).sample_questions(
            rng,
            config.shots,
            questions,
            &BTreeSet::from([index]),
        )?
    };

    let mut prompt = prompt_header(graph, facts, config.style);
    prompt.push_str(&binary_question_prompt(question, &examples));
    Ok(prompt)
}

/// Ask the model every question in order and score the answers.
///
/// Stops at the first client error.
pub fn run_benchmark<R: Rng + ?Sized>(
    client: &dyn LlmClient,
    graph: &CausalGraph,
    facts: &FactSet,
    questions: &[Question],
    config: &RunConfig,
    rng: &mut R,
) -> Result<RunReport, EvalError> {
    let mut outcomes = Vec::with_capacity(questions.len());

    for (index, question) in questions.iter().enumerate() {
        let prompt = build_prompt(graph, facts, questions, index, config, rng)?;
        let model_answer = client.complete(&prompt)?;

        let is_correct = check_answer(question.answer, &model_answer);
        let fact_accuracy = if question.supporting_facts.is_empty() {
            None
        } else {
            Some(score(question, &model_answer)?)
        };

        tracing::debug!(
            index,
            symbol = %question.symbol,
            is_correct,
            f1 = fact_accuracy.map(|m| m.f1),
            "scored answer"
        );

        outcomes.push(QuestionOutcome {
            index,
            question: question.clone(),
            model_answer,
            is_correct,
            fact_accuracy,
        });
    }

    let report = RunReport::from_outcomes(outcomes);
    tracing::info!(
        questions = report.outcomes.len(),
        accuracy = report.accuracy,
        "benchmark run complete"
    );
    Ok(report)
}
