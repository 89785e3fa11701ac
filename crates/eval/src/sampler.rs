//! Few-shot example selection.
//!
//! Randomness always comes from the caller's RNG; seed a `StdRng` for
//! reproducible prompts.

use std::collections::{BTreeMap, BTreeSet};

use causeway_core::{Question, QuestionType};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::EvalError;

/// How eligible questions are weighted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SamplingMode {
    /// Every eligible question equally likely.
    #[default]
    Uniform,
    /// Every question type equally likely, regardless of how many
    /// questions share it.
    Balanced,
}

/// Samples demonstration questions without replacement.
#[derive(Debug, Clone, Copy, Default)]
pub struct FewShotSampler {
    mode: SamplingMode,
}

impl FewShotSampler {
    pub fn new(mode: SamplingMode) -> Self {
        Self { mode }
    }

    pub fn mode(&self) -> SamplingMode {
        self.mode
    }

    /// Indices of `count` questions, never drawing from `exclude`.
    ///
    /// Fails with [`EvalError::SamplingExhausted`] when fewer than `count`
    /// questions are eligible, and with [`EvalError::NoQuestionTypes`] in
    /// balanced mode when nothing is eligible.
    pub fn sample<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        count: usize,
        questions: &[Question],
        exclude: &BTreeSet<usize>,
    ) -> Result<Vec<usize>, EvalError> {
        let eligible: Vec<usize> = (0..questions.len())
            .filter(|i| !exclude.contains(i))
            .collect();

        if count > eligible.len() {
            return Err(EvalError::SamplingExhausted {
                requested: count,
                available: eligible.len(),
            });
        }

        let chosen: Vec<usize> = match self.mode {
            SamplingMode::Uniform => eligible.choose_multiple(rng, count).copied().collect(),
            SamplingMode::Balanced => {
                if eligible.is_empty() {
                    return Err(EvalError::NoQuestionTypes);
                }
                let weights = type_weights(questions, &eligible);
                eligible
                    .choose_multiple_weighted(rng, count, |&i| weights[&questions[i].kind])
                    .map_err(|e| EvalError::Sampling(e.to_string()))?
                    .copied()
                    .collect()
            }
        };

        tracing::debug!(
            mode = ?self.mode,
            requested = count,
            eligible = eligible.len(),
            "sampled few-shot examples"
        );
        Ok(chosen)
    }

    /// Like [`sample`](Self::sample) but returns the questions themselves.
    pub fn sample_questions<'a, R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        count: usize,
        questions: &'a [Question],
        exclude: &BTreeSet<usize>,
    ) -> Result<Vec<&'a Question>, EvalError> {
        Ok(self
            .sample(rng, count, questions, exclude)?
            .into_iter()
            .map(|i| &questions[i])
            .collect())
    }
}

/// Per-type selection weight `1 / (questions_of_type * distinct_types)`
/// over the `eligible` questions. Weights of all eligible questions sum to 1.
pub fn type_weights(questions: &[Question], eligible: &[usize]) -> BTreeMap<QuestionType, f64> {
    let mut counts: BTreeMap<QuestionType, usize> = BTreeMap::new();
    for &i in eligible {
        *counts.entry(questions[i].kind).or_default() += 1;
    }
    let types = counts.len() as f64;
    counts
        .into_iter()
        .map(|(kind, n)| (kind, 1.0 / (n as f64 * types)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use causeway_core::Answer;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn q(kind: QuestionType) -> Question {
        Question {
            symbol: String::new(),
            query: String::new(),
            answer: Answer::No,
            supporting_facts: vec![],
            explanation: String::new(),
            kind,
        }
    }

    fn skewed() -> Vec<Question> {
        // 8 unrelated, 2 chain_1.
        let mut questions: Vec<Question> = (0..8).map(|_| q(QuestionType::Unrelated)).collect();
        questions.push(q(QuestionType::Chain(1)));
        questions.push(q(QuestionType::Chain(1)));
        questions
    }

    #[test]
    fn test_excluded_never_sampled() {
        let questions = skewed();
        let exclude = BTreeSet::from([0, 1, 2]);
        let mut rng = StdRng::seed_from_u64(1);
        for mode in [SamplingMode::Uniform, SamplingMode::Balanced] {
            for _ in 0..50 {
                let picked = FewShotSampler::new(mode)
                    .sample(&mut rng, 7, &questions, &exclude)
                    .unwrap();
                assert_eq!(picked.len(), 7);
                assert!(picked.iter().all(|i| !exclude.contains(i)));
                let distinct: BTreeSet<_> = picked.iter().collect();
                assert_eq!(distinct.len(), 7, "sampling must be without replacement");
            }
        }
    }

    #[test]
    fn test_oversized_request_fails() {
        let questions = skewed();
        let mut rng = StdRng::seed_from_u64(0);
        let err = FewShotSampler::new(SamplingMode::Uniform)
            .sample(&mut rng, 10, &questions, &BTreeSet::from([4]))
            .unwrap_err();
        assert!(matches!(
            err,
            EvalError::SamplingExhausted {
                requested: 10,
                available: 9
            }
        ));
    }

    #[test]
    fn test_balanced_with_nothing_eligible() {
        let questions = vec![q(QuestionType::Unrelated)];
        let mut rng = StdRng::seed_from_u64(0);
        let err = FewShotSampler::new(SamplingMode::Balanced)
            .sample(&mut rng, 0, &questions, &BTreeSet::from([0]))
            .unwrap_err();
        assert!(matches!(err, EvalError::NoQuestionTypes));
    }

    #[test]
    fn test_type_weights_sum_to_one() {
        let questions = skewed();
        let eligible: Vec<usize> = (0..questions.len()).collect();
        let weights = type_weights(&questions, &eligible);
        assert_eq!(weights[&QuestionType::Unrelated], 1.0 / 16.0);
        assert_eq!(weights[&QuestionType::Chain(1)], 1.0 / 4.0);
        let total: f64 = eligible.iter().map(|&i| weights[&questions[i].kind]).sum();
        assert!((total - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_balanced_frequencies_converge_per_type() {
        let questions = skewed();
        let sampler = FewShotSampler::new(SamplingMode::Balanced);
        let mut rng = StdRng::seed_from_u64(42);
        let draws = 4000;
        let mut chain_hits = 0;
        for _ in 0..draws {
            let picked = sampler
                .sample(&mut rng, 1, &questions, &BTreeSet::new())
                .unwrap();
            if questions[picked[0]].kind == QuestionType::Chain(1) {
                chain_hits += 1;
            }
        }
        let share = chain_hits as f64 / draws as f64;
        assert!((share - 0.5).abs() < 0.05, "chain share {share}");
    }

    #[test]
    fn test_same_seed_same_sample() {
        let questions = skewed();
        let sampler = FewShotSampler::new(SamplingMode::Balanced);
        let a = sampler
            .sample(&mut StdRng::seed_from_u64(9), 4, &questions, &BTreeSet::new())
            .unwrap();
        let b = sampler
            .sample(&mut StdRng::seed_from_u64(9), 4, &questions, &BTreeSet::new())
            .unwrap();
        assert_eq!(a, b);
    }
}
