//! Partial-credit scoring of cited facts against supporting fact sets.

use std::collections::BTreeSet;

use causeway_core::{FactId, Question};
use serde::{Deserialize, Serialize};

use crate::citation::extract_citations;
use crate::error::EvalError;

/// Citation quality against one candidate supporting fact set.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FactAccuracy {
    pub true_positive: usize,
    pub false_positive: usize,
    pub false_negative: usize,
    pub precision: f64,
    pub recall: f64,
    pub f1: f64,
}

impl FactAccuracy {
    /// Metrics for `cited` against a single `expected` set. Zero
    /// denominators yield 0 rather than NaN.
    pub fn compute(cited: &BTreeSet<FactId>, expected: &BTreeSet<FactId>) -> Self {
        let true_positive = cited.intersection(expected).count();
        let false_positive = cited.difference(expected).count();
        let false_negative = expected.difference(cited).count();

        let precision = ratio(true_positive, true_positive + false_positive);
        let recall = ratio(true_positive, true_positive + false_negative);
        let f1 = if precision + recall > 0.0 {
            2.0 * precision * recall / (precision + recall)
        } else {
            0.0
        };

        Self {
            true_positive,
            false_positive,
            false_negative,
            precision,
            recall,
            f1,
        }
    }
}

fn ratio(numerator: usize, denominator: usize) -> f64 {
    if denominator == 0 {
        0.0
    } else {
        numerator as f64 / denominator as f64
    }
}

/// Score the cited facts against every candidate set and return the
/// **worst** match (minimum f1; the first such set on ties).
///
/// Note that this is deliberately conservative: when several paths justify
/// an answer, the model is credited only as well as its weakest plausible
/// justification, not its best one. A model citing one complete path out
/// of two is scored against the path it did not cite.
pub fn score_citations(
    candidates: &[BTreeSet<FactId>],
    cited: &BTreeSet<FactId>,
) -> Option<FactAccuracy> {
    let mut worst: Option<FactAccuracy> = None;
    for candidate in candidates {
        let metrics = FactAccuracy::compute(cited, candidate);
        if worst.map_or(true, |w| metrics.f1 < w.f1) {
            worst = Some(metrics);
        }
    }
    worst
}

/// Fact accuracy of `free_text` for `question`, using the minimum-f1 rule
/// of [`score_citations`].
///
/// Fails with [`EvalError::EmptySupport`] for questions without supporting
/// facts (`chain_none`).
pub fn score(question: &Question, free_text: &str) -> Result<FactAccuracy, EvalError> {
    let cited = extract_citations(free_text);
    score_citations(&question.supporting_facts, &cited).ok_or_else(|| EvalError::EmptySupport {
        symbol: question.symbol.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use causeway_core::{Answer, QuestionType};

    fn question_with(supporting_facts: Vec<BTreeSet<FactId>>) -> Question {
        Question {
            symbol: "cause(A; D)".to_string(),
            query: "Does A cause D?".to_string(),
            answer: Answer::Yes,
            supporting_facts,
            explanation: String::new(),
            kind: QuestionType::Chain(1),
        }
    }

    #[test]
    fn test_perfect_citation() {
        let m = FactAccuracy::compute(&BTreeSet::from([1, 2]), &BTreeSet::from([1, 2]));
        assert_eq!((m.true_positive, m.false_positive, m.false_negative), (2, 0, 0));
        assert_eq!(m.f1, 1.0);
    }

    #[test]
    fn test_no_citations_scores_zero_without_nan() {
        let m = FactAccuracy::compute(&BTreeSet::new(), &BTreeSet::from([1]));
        assert_eq!(m.precision, 0.0);
        assert_eq!(m.recall, 0.0);
        assert_eq!(m.f1, 0.0);
        assert_eq!(m.false_negative, 1);
    }

    #[test]
    fn test_minimum_f1_candidate_selected() {
        let q = question_with(vec![BTreeSet::from([1, 2]), BTreeSet::from([3])]);
        let m = score(&q, "Yes, from facts 1, 3.").unwrap();

        // Against {1, 2}: tp=1 fp=1 fn=1, f1=0.5.
        // Against {3}:    tp=1 fp=1 fn=0, f1=2/3.
        assert_eq!((m.true_positive, m.false_positive, m.false_negative), (1, 1, 1));
        assert!((m.f1 - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_first_candidate_wins_ties() {
        let candidates = vec![BTreeSet::from([1]), BTreeSet::from([2])];
        let m = score_citations(&candidates, &BTreeSet::from([5])).unwrap();
        assert_eq!(m.false_negative, 1);
        assert_eq!(m.f1, 0.0);
        assert_eq!(
            score_citations(&candidates, &BTreeSet::from([5])),
            Some(FactAccuracy::compute(&BTreeSet::from([5]), &candidates[0]))
        );
    }

    #[test]
    fn test_empty_support_is_an_error() {
        let q = question_with(vec![]);
        let err = score(&q, "No. Fact 1.").unwrap_err();
        assert!(matches!(err, EvalError::EmptySupport { .. }));
    }
}
