//! causeway-core: causal graphs, facts and benchmark questions.
//!
//! Turns a causal DAG into a numbered list of natural-language facts (one
//! per edge) and synthesizes a yes/no question for every ordered pair of
//! variables, with the supporting fact sets and explanation that justify
//! its answer.
//!
//! # Public API
//!
//! - [`CausalGraph`] -- adjacency-based DAG over string labels
//! - [`generate_facts()`] -- edge facts and the edge -> fact index ([`FactSet`])
//! - [`PathAnalyzer`] -- ordered simple path enumeration
//! - [`QuestionSynthesizer`] / [`generate_all_pair_questions()`] -- question records
//! - [`generate_dag()`], [`parse_edgelist()`] -- graph sources
//! - [`CausalError`] -- error type

pub mod edgelist;
pub mod error;
pub mod facts;
pub mod generate;
pub mod graph;
pub mod paths;
pub mod question;
pub mod text;

// ── Convenience re-exports ───────────────────────────────────────────

pub use edgelist::{parse_edgelist, to_dot, to_edgelist};
pub use error::CausalError;
pub use facts::{generate_facts, Fact, FactId, FactSet};
pub use generate::{assign_labels, generate_dag, shuffle_labels};
pub use graph::{CausalGraph, NodeId};
pub use paths::{shortest, CausalPath, PathAnalyzer};
pub use question::{
    generate_all_pair_questions, Answer, QueryTemplate, Question, QuestionSynthesizer,
    QuestionType,
};
