//! Prompt construction: a graph header listing the variables and facts,
//! followed by few-shot examples and the question to answer.

use std::fmt;
use std::str::FromStr;

use causeway_core::text::capitalize_first;
use causeway_core::{CausalGraph, FactSet, Question};
use serde::{Deserialize, Serialize};

/// Header wording variants.
///
/// `V1`, `V2` and `V6` list facts as `Fact k: ...`; `V3`-`V5` use a
/// `Facts:` block with `Fk: ...` entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PromptStyle {
    V1,
    V2,
    V3,
    V4,
    V5,
    #[default]
    V6,
}

impl PromptStyle {
    pub const ALL: [PromptStyle; 6] = [
        PromptStyle::V1,
        PromptStyle::V2,
        PromptStyle::V3,
        PromptStyle::V4,
        PromptStyle::V5,
        PromptStyle::V6,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PromptStyle::V1 => "v1",
            PromptStyle::V2 => "v2",
            PromptStyle::V3 => "v3",
            PromptStyle::V4 => "v4",
            PromptStyle::V5 => "v5",
            PromptStyle::V6 => "v6",
        }
    }

    fn short_fact_ids(&self) -> bool {
        matches!(self, PromptStyle::V3 | PromptStyle::V4 | PromptStyle::V5)
    }
}

impl fmt::Display for PromptStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PromptStyle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PromptStyle::ALL
            .into_iter()
            .find(|style| style.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("invalid prompt style '{s}' (expected v1..v6)"))
    }
}

/// Describe the graph's variables and facts.
pub fn prompt_header(graph: &CausalGraph, facts: &FactSet, style: PromptStyle) -> String {
    let n = graph.node_count();
    let variables = graph.labels().join(", ");

    let mut prompt = match style {
        PromptStyle::V1 => format!(
            "You are given facts about the direct causal relationships that exist between {n} \
             variables: {variables}. No other direct causal relationships exist. Note that \
             causation may propagate via a chain of causal relationships. Answer the following \
             questions with yes or no and justify your answer by referring to relevant facts \
             using their number.\n\n"
        ),
        PromptStyle::V2 => format!(
            "You are given facts about the direct causal relationships that exist between {n} \
             variables: {variables}. No other direct causal relationships exist. Answer the \
             following questions with yes or no and justify your answer by referring to \
             relevant facts using their number.\n\n"
        ),
        PromptStyle::V3 => format!(
            "Context: You are given facts about the direct causal relationships that exist \
             between {n} variables: {variables}. No other direct causal relationships exist. \
             Note that causation may propagate via a chain of causal relationships.\n\n"
        ),
        PromptStyle::V4 => format!(
            "Context: A variable X is said to be the cause of another variable Y if acting to \
             change the value of X leads to a change in the value of Y. The facts below specify \
             known causal relationships between {n} variables: {variables}.\n\n"
        ),
        PromptStyle::V5 => format!(
            "Context: You are given facts about the direct causal relationships that exist \
             between {n} variables: {variables}. If a variable X is a cause of a variable Y, \
             then changing the value of X causes the value of Y to change, but changing the \
             value of Y does not cause the value of X to change. Note that causation may \
             propagate via chains of causal relationships, but that it cannot form cycles.\n\n"
        ),
        PromptStyle::V6 => format!(
            "Definition: If manipulating the value of some quantity X causes the value of \
             another quantity Y to change, we say that X is a cause of Y and that Y is an effect \
             of X. Importantly, we assume that, if X is a cause of Y, then Y cannot be a cause \
             of X (asymmetry of causation). Note that causation may propagate over chains of \
             causal relationships.\n\nContext: You are given facts about the causal \
             relationships that are known to exist between {n} quantities: {variables}.\n\n"
        ),
    };

    if facts.is_empty() {
        return prompt;
    }

    let lines: Vec<String> = if style.short_fact_ids() {
        prompt.push_str("Facts:\n");
        facts
            .iter()
            .map(|fact| format!("F{}: {}", fact.id, fact.text))
            .collect()
    } else {
        facts
            .iter()
            .map(|fact| format!("Fact {}: {}", fact.id, capitalize_first(&fact.text)))
            .collect()
    };
    prompt.push_str(&lines.join(".\n"));
    prompt.push_str(".\n\n");
    prompt
}

/// Instructions, worked examples, then the open question.
///
/// Each example is answered with its explanation followed by
/// `Hence, the answer is <answer>.`; the final question is left open for
/// the model to complete.
pub fn binary_question_prompt(question: &Question, examples: &[&Question]) -> String {
    let mut prompt = String::from(
        "Instructions: Answer the following questions with yes/no and explain why using a \
         list of facts.\n\n",
    );
    for example in examples {
        let answer = format!(
            "{} Hence, the answer is {}.",
            example.explanation, example.answer
        );
        prompt.push_str(&question_block(&example.query, &answer));
        prompt.push_str("\n\n");
    }
    prompt.push_str(&question_block(&question.query, ""));
    prompt
}

fn question_block(query: &str, answer: &str) -> String {
    format!("Question: {query}\nAnswer (yes/no, facts): {answer}")
}
