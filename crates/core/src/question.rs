//! All-pair causal question synthesis.
//!
//! For every ordered pair of distinct variables `(s, t)` one question per
//! query template asks whether manipulating `s` changes `t`. The answer,
//! the justification and the difficulty tag come from the directed paths
//! between the pair:
//!
//! - a path `s -> ... -> t` exists: answer `yes`, tag `chain_<len>`;
//! - otherwise a path `t -> ... -> s` exists: answer `no`, tag `chain_<len>_anti`;
//! - otherwise: answer `no`, tag `chain_none`, no supporting facts.
//!
//! `<len>` is the edge count of the shortest qualifying path, which is also
//! the path the explanation is written from.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::CausalError;
use crate::facts::{FactId, FactSet};
use crate::graph::{CausalGraph, NodeId};
use crate::paths::{shortest, CausalPath, PathAnalyzer};
use crate::text::{capitalize_first, enumerate};

/// Default query phrasing.
pub const DEFAULT_QUERY_TEMPLATE: &str = "Based on these facts, can we say that manipulating the value of {source} will cause a change in the value of {target}?";

/// Explanation used when no directed path links the pair.
pub const NO_EVIDENCE_EXPLANATION: &str =
    "There is no evidence of a causal relationship between these variables.";

/// Expected yes/no answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Answer {
    Yes,
    No,
}

impl Answer {
    pub fn as_str(&self) -> &'static str {
        match self {
            Answer::Yes => "yes",
            Answer::No => "no",
        }
    }
}

impl fmt::Display for Answer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Difficulty / category tag of a question.
///
/// Serialized as `chain_<n>`, `chain_<n>_anti` or `chain_none`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum QuestionType {
    /// Forward causal chain of the given edge count.
    Chain(usize),
    /// Only the reverse (anti-causal) chain exists.
    AntiChain(usize),
    /// No directed path in either direction.
    Unrelated,
}

impl fmt::Display for QuestionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QuestionType::Chain(len) => write!(f, "chain_{len}"),
            QuestionType::AntiChain(len) => write!(f, "chain_{len}_anti"),
            QuestionType::Unrelated => f.write_str("chain_none"),
        }
    }
}

impl FromStr for QuestionType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let rest = s
            .strip_prefix("chain_")
            .ok_or_else(|| format!("invalid question type '{s}'"))?;
        if rest == "none" {
            return Ok(QuestionType::Unrelated);
        }
        let (digits, anti) = match rest.strip_suffix("_anti") {
            Some(digits) => (digits, true),
            None => (rest, false),
        };
        let len: usize = digits
            .parse()
            .map_err(|_| format!("invalid question type '{s}'"))?;
        Ok(if anti {
            QuestionType::AntiChain(len)
        } else {
            QuestionType::Chain(len)
        })
    }
}

impl Serialize for QuestionType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for QuestionType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// One generated benchmark question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    /// Formal form, `cause(s; t)`.
    pub symbol: String,
    pub query: String,
    pub answer: Answer,
    /// Independently sufficient justifications, shortest path first.
    pub supporting_facts: Vec<BTreeSet<FactId>>,
    pub explanation: String,
    #[serde(rename = "type")]
    pub kind: QuestionType,
}

/// A query phrasing with `{source}` and `{target}` placeholders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryTemplate(String);

impl QueryTemplate {
    pub fn new(template: impl Into<String>) -> Self {
        Self(template.into())
    }

    pub fn render(&self, source: &str, target: &str) -> String {
        self.0
            .replace("{source}", source)
            .replace("{target}", target)
    }
}

impl Default for QueryTemplate {
    fn default() -> Self {
        Self::new(DEFAULT_QUERY_TEMPLATE)
    }
}

/// Generates questions for every ordered pair of a graph.
#[derive(Debug, Clone)]
pub struct QuestionSynthesizer {
    templates: Vec<QueryTemplate>,
    analyzer: PathAnalyzer,
}

impl Default for QuestionSynthesizer {
    fn default() -> Self {
        Self {
            templates: vec![QueryTemplate::default()],
            analyzer: PathAnalyzer::new(),
        }
    }
}

impl QuestionSynthesizer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the query phrasings. Each pair yields one question per template.
    pub fn with_templates(mut self, templates: Vec<QueryTemplate>) -> Self {
        self.templates = templates;
        self
    }

    pub fn with_analyzer(mut self, analyzer: PathAnalyzer) -> Self {
        self.analyzer = analyzer;
        self
    }

    /// Questions for every ordered pair `(s, t)`, `s != t`, in node order.
    ///
    /// `facts` must have been generated from `graph`.
    pub fn generate(
        &self,
        graph: &CausalGraph,
        facts: &FactSet,
    ) -> Result<Vec<Question>, CausalError> {
        let mut questions = Vec::new();
        for source in graph.nodes() {
            for target in graph.nodes() {
                if source != target {
                    questions.extend(self.questions_for_pair(graph, facts, source, target)?);
                }
            }
        }
        tracing::debug!(questions = questions.len(), "generated pair questions");
        Ok(questions)
    }

    /// Questions for a single ordered pair, one per template.
    pub fn questions_for_pair(
        &self,
        graph: &CausalGraph,
        facts: &FactSet,
        source: NodeId,
        target: NodeId,
    ) -> Result<Vec<Question>, CausalError> {
        let s = graph.label(source);
        let t = graph.label(target);
        let judgement = self.judge(graph, facts, source, target)?;

        Ok(self
            .templates
            .iter()
            .map(|template| Question {
                symbol: format!("cause({s}; {t})"),
                query: template.render(s, t),
                answer: judgement.answer,
                supporting_facts: judgement.supporting_facts.clone(),
                explanation: judgement.explanation.clone(),
                kind: judgement.kind,
            })
            .collect())
    }

    fn judge(
        &self,
        graph: &CausalGraph,
        facts: &FactSet,
        source: NodeId,
        target: NodeId,
    ) -> Result<Judgement, CausalError> {
        let s = graph.label(source);
        let t = graph.label(target);

        let forward = self.analyzer.paths(graph, source, target)?;
        if let Some(path) = shortest(&forward) {
            let conclusion = format!(
                ", so {s} is a cause of {t} and {t} is an effect of {s}. Based on our \
                 definition of causation, we know that manipulating the value of {s} \
                 will cause a change in the value of {t}."
            );
            return Ok(Judgement {
                answer: Answer::Yes,
                supporting_facts: supporting_sets(graph, facts, &forward)?,
                explanation: explain(graph, facts, path, &conclusion)?,
                kind: QuestionType::Chain(path.len()),
            });
        }

        let reverse = self.analyzer.paths(graph, target, source)?;
        if let Some(path) = shortest(&reverse) {
            let conclusion = format!(
                ", so {t} is a cause of {s} and {s} is an effect of {t}. Based on our \
                 definition of causation, we know that manipulating the value of {s} \
                 cannot cause a change in the value of {t} since causation is asymmetric."
            );
            return Ok(Judgement {
                answer: Answer::No,
                supporting_facts: supporting_sets(graph, facts, &reverse)?,
                explanation: explain(graph, facts, path, &conclusion)?,
                kind: QuestionType::AntiChain(path.len()),
            });
        }

        Ok(Judgement {
            answer: Answer::No,
            supporting_facts: Vec::new(),
            explanation: NO_EVIDENCE_EXPLANATION.to_string(),
            kind: QuestionType::Unrelated,
        })
    }
}

/// Shared outcome for all templated variants of one pair.
struct Judgement {
    answer: Answer,
    supporting_facts: Vec<BTreeSet<FactId>>,
    explanation: String,
    kind: QuestionType,
}

/// Generate all pair questions with the default template.
pub fn generate_all_pair_questions(
    graph: &CausalGraph,
    facts: &FactSet,
) -> Result<Vec<Question>, CausalError> {
    QuestionSynthesizer::new().generate(graph, facts)
}

fn supporting_sets(
    graph: &CausalGraph,
    facts: &FactSet,
    paths: &[CausalPath],
) -> Result<Vec<BTreeSet<FactId>>, CausalError> {
    paths
        .iter()
        .map(|path| {
            path.fact_ids(graph, facts)
                .map(|ids| ids.into_iter().collect())
        })
        .collect()
}

fn explain(
    graph: &CausalGraph,
    facts: &FactSet,
    path: &CausalPath,
    conclusion: &str,
) -> Result<String, CausalError> {
    let clauses = path
        .fact_ids(graph, facts)?
        .into_iter()
        .map(|id| {
            let text = facts.get(id).map(|f| f.text.as_str()).unwrap_or_default();
            format!("we know from Fact {id} that {text}")
        })
        .collect::<Vec<_>>();
    Ok(capitalize_first(&format!(
        "{}{}",
        enumerate(&clauses, "and"),
        conclusion
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::facts::generate_facts;

    fn questions(graph: &CausalGraph) -> Vec<Question> {
        generate_all_pair_questions(graph, &generate_facts(graph)).unwrap()
    }

    fn find<'a>(questions: &'a [Question], symbol: &str) -> &'a Question {
        questions
            .iter()
            .find(|q| q.symbol == symbol)
            .unwrap_or_else(|| panic!("no question {symbol}"))
    }

    #[test]
    fn test_question_type_round_trips_through_strings() {
        for kind in [
            QuestionType::Chain(1),
            QuestionType::AntiChain(3),
            QuestionType::Unrelated,
        ] {
            assert_eq!(kind.to_string().parse::<QuestionType>(), Ok(kind));
        }
        assert!("chain_x".parse::<QuestionType>().is_err());
        assert!("loop_1".parse::<QuestionType>().is_err());
    }

    #[test]
    fn test_direct_edge_explanation() {
        let graph = CausalGraph::from_edges(["A", "B"], [("A", "B")]).unwrap();
        let qs = questions(&graph);
        let q = find(&qs, "cause(A; B)");

        assert_eq!(q.answer, Answer::Yes);
        assert_eq!(q.kind, QuestionType::Chain(1));
        assert_eq!(q.supporting_facts, vec![BTreeSet::from([1])]);
        assert_eq!(
            q.explanation,
            "We know from Fact 1 that manipulating the value of A causes a change in the \
             value of B, so A is a cause of B and B is an effect of A. Based on our definition \
             of causation, we know that manipulating the value of A will cause a change in the \
             value of B."
        );
        assert_eq!(
            q.query,
            "Based on these facts, can we say that manipulating the value of A will cause a \
             change in the value of B?"
        );
    }

    #[test]
    fn test_anti_causal_explanation() {
        let graph = CausalGraph::from_edges(["A", "B", "C"], [("A", "B"), ("B", "C")]).unwrap();
        let qs = questions(&graph);
        let q = find(&qs, "cause(C; A)");

        assert_eq!(q.answer, Answer::No);
        assert_eq!(q.kind, QuestionType::AntiChain(2));
        assert_eq!(q.supporting_facts, vec![BTreeSet::from([1, 2])]);
        assert!(q.explanation.starts_with(
            "We know from Fact 1 that manipulating the value of A causes a change in the value \
             of B and we know from Fact 2 that"
        ));
        assert!(q.explanation.ends_with(
            "so A is a cause of C and C is an effect of A. Based on our definition of causation, \
             we know that manipulating the value of C cannot cause a change in the value of A \
             since causation is asymmetric."
        ));
    }

    #[test]
    fn test_multiple_templates() {
        let graph = CausalGraph::from_edges(["A", "B"], [("A", "B")]).unwrap();
        let facts = generate_facts(&graph);
        let qs = QuestionSynthesizer::new()
            .with_templates(vec![
                QueryTemplate::default(),
                QueryTemplate::new("Does acting on {source} change {target}?"),
            ])
            .generate(&graph, &facts)
            .unwrap();

        assert_eq!(qs.len(), 4);
        assert_eq!(qs[1].query, "Does acting on A change B?");
        assert_eq!(qs[0].symbol, qs[1].symbol);
        assert_eq!(qs[0].explanation, qs[1].explanation);
    }

    #[test]
    fn test_serialized_shape() {
        let graph = CausalGraph::from_edges(["A", "B"], [("A", "B")]).unwrap();
        let qs = questions(&graph);
        let json = serde_json::to_value(&qs[0]).unwrap();
        assert_eq!(json["type"], "chain_1");
        assert_eq!(json["answer"], "yes");
        assert_eq!(json["supporting_facts"], serde_json::json!([[1]]));

        let back: Question = serde_json::from_value(json).unwrap();
        assert_eq!(back, qs[0]);
    }
}
