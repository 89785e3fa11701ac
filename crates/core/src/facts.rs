//! Fact generation: one numbered natural-language fact per causal edge.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::graph::{CausalGraph, NodeId};

/// Identifier used to cite a fact. Starts at 1.
pub type FactId = u32;

/// A single numbered fact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fact {
    pub id: FactId,
    pub text: String,
}

/// The ordered facts for one graph plus the edge they each state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FactSet {
    facts: Vec<Fact>,
    by_edge: BTreeMap<(NodeId, NodeId), FactId>,
}

impl FactSet {
    pub fn facts(&self) -> &[Fact] {
        &self.facts
    }

    pub fn len(&self) -> usize {
        self.facts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.facts.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Fact> {
        self.facts.iter()
    }

    /// Look up a fact by id.
    pub fn get(&self, id: FactId) -> Option<&Fact> {
        // Ids are dense and 1-based.
        let index = usize::try_from(id).ok()?.checked_sub(1)?;
        self.facts.get(index)
    }

    /// The fact stating the edge `from -> to`.
    pub fn fact_for_edge(&self, from: NodeId, to: NodeId) -> Option<FactId> {
        self.by_edge.get(&(from, to)).copied()
    }

    /// The edge annotation, keyed by `(cause, effect)`.
    pub fn edge_index(&self) -> &BTreeMap<(NodeId, NodeId), FactId> {
        &self.by_edge
    }

    fn push(&mut self, edge: (NodeId, NodeId), text: String) -> FactId {
        let id = FactId::try_from(self.facts.len() + 1).unwrap_or(FactId::MAX);
        self.facts.push(Fact { id, text });
        self.by_edge.insert(edge, id);
        id
    }
}

impl<'a> IntoIterator for &'a FactSet {
    type Item = &'a Fact;
    type IntoIter = std::slice::Iter<'a, Fact>;

    fn into_iter(self) -> Self::IntoIter {
        self.facts.iter()
    }
}

/// Sentence stating that `cause` directly causes `effect`.
pub fn edge_fact_text(cause: &str, effect: &str) -> String {
    format!("manipulating the value of {cause} causes a change in the value of {effect}")
}

/// Describe every edge of `graph` as a numbered fact.
///
/// Nodes are visited in insertion order and each node's effects in successor
/// order, so numbering is stable for a given graph. The graph itself is not
/// modified; the edge annotation is returned in the [`FactSet`].
pub fn generate_facts(graph: &CausalGraph) -> FactSet {
    let mut facts = FactSet::default();

    for (from, to) in graph.edges() {
        let text = edge_fact_text(graph.label(from), graph.label(to));
        facts.push((from, to), text);
    }

    tracing::debug!(
        nodes = graph.node_count(),
        facts = facts.len(),
        "generated facts"
    );
    facts
}
