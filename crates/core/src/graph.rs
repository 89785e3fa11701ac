//! Causal DAG over string-labelled variables.
//!
//! Nodes keep their insertion order, and successor / predecessor lists keep
//! edge insertion order. Everything downstream (fact numbering, pair order,
//! path discovery order) is derived from these orders, so two graphs built
//! with the same sequence of calls produce identical facts and questions.
//!
//! Acyclicity is enforced on insertion: `add_edge` rejects any edge that
//! would close a cycle, so a constructed `CausalGraph` is always a DAG.

use std::collections::{BTreeMap, VecDeque};

use crate::error::CausalError;

/// Dense index of a node within its graph.
pub type NodeId = usize;

/// A directed acyclic graph of causal relationships.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CausalGraph {
    labels: Vec<String>,
    index: BTreeMap<String, NodeId>,
    successors: Vec<Vec<NodeId>>,
    predecessors: Vec<Vec<NodeId>>,
    edge_count: usize,
}

impl CausalGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a graph from node labels and `(cause, effect)` pairs.
    ///
    /// Nodes named only in `edges` are appended after `nodes` in first-seen order.
    pub fn from_edges<N, E, S>(nodes: N, edges: E) -> Result<Self, CausalError>
    where
        N: IntoIterator<Item = S>,
        E: IntoIterator<Item = (S, S)>,
        S: AsRef<str>,
    {
        let mut graph = Self::new();
        for node in nodes {
            graph.add_node(node.as_ref());
        }
        for (from, to) in edges {
            graph.add_edge(from.as_ref(), to.as_ref())?;
        }
        Ok(graph)
    }

    /// Add a node, returning its id. Adding an existing label is a no-op.
    pub fn add_node(&mut self, label: impl Into<String>) -> NodeId {
        let label = label.into();
        if let Some(&id) = self.index.get(&label) {
            return id;
        }
        let id = self.labels.len();
        self.index.insert(label.clone(), id);
        self.labels.push(label);
        self.successors.push(Vec::new());
        self.predecessors.push(Vec::new());
        id
    }

    /// Add the causal edge `from -> to`, creating missing nodes.
    ///
    /// Duplicate edges are ignored. Self-loops and edges closing a cycle are
    /// rejected with [`CausalError::InvalidGraph`].
    pub fn add_edge(&mut self, from: &str, to: &str) -> Result<(), CausalError> {
        let source = self.add_node(from);
        let target = self.add_node(to);

        if source == target {
            return Err(CausalError::InvalidGraph {
                cycle: vec![from.to_string(), to.to_string()],
            });
        }
        if self.successors[source].contains(&target) {
            return Ok(());
        }
        // target already reaches source: closing the loop would form a cycle.
        if let Some(path) = self.find_path(target, source) {
            let mut cycle: Vec<String> = std::iter::once(source)
                .chain(path)
                .map(|id| self.labels[id].clone())
                .collect();
            cycle.dedup();
            return Err(CausalError::InvalidGraph { cycle });
        }

        self.successors[source].push(target);
        self.predecessors[target].push(source);
        self.edge_count += 1;
        Ok(())
    }

    pub fn node_count(&self) -> usize {
        self.labels.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Node ids in insertion order.
    pub fn nodes(&self) -> impl Iterator<Item = NodeId> + '_ {
        0..self.labels.len()
    }

    /// Node labels in insertion order.
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// Label of a node. Panics on an id not produced by this graph.
    pub fn label(&self, id: NodeId) -> &str {
        &self.labels[id]
    }

    pub fn node_id(&self, label: &str) -> Option<NodeId> {
        self.index.get(label).copied()
    }

    /// Like [`node_id`](Self::node_id) but fails with `UnknownNode`.
    pub fn require_node(&self, label: &str) -> Result<NodeId, CausalError> {
        self.node_id(label)
            .ok_or_else(|| CausalError::UnknownNode(label.to_string()))
    }

    /// Direct effects of `id`, in edge insertion order.
    pub fn successors(&self, id: NodeId) -> &[NodeId] {
        &self.successors[id]
    }

    /// Direct causes of `id`, in edge insertion order.
    pub fn predecessors(&self, id: NodeId) -> &[NodeId] {
        &self.predecessors[id]
    }

    pub fn has_edge(&self, from: NodeId, to: NodeId) -> bool {
        self.successors
            .get(from)
            .is_some_and(|succ| succ.contains(&to))
    }

    /// All edges, grouped by source in node order, then successor order.
    pub fn edges(&self) -> impl Iterator<Item = (NodeId, NodeId)> + '_ {
        self.successors
            .iter()
            .enumerate()
            .flat_map(|(from, succ)| succ.iter().map(move |&to| (from, to)))
    }

    /// Nodes with neither causes nor effects.
    pub fn isolated_nodes(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.nodes()
            .filter(|&id| self.successors[id].is_empty() && self.predecessors[id].is_empty())
    }

    /// Is there a directed path from `from` to `to`? A node reaches itself.
    pub fn reaches(&self, from: NodeId, to: NodeId) -> bool {
        self.find_path(from, to).is_some()
    }

    /// Every node that can reach `target`, including `target` itself.
    pub fn ancestors_inclusive(&self, target: NodeId) -> Vec<bool> {
        let mut seen = vec![false; self.labels.len()];
        let mut queue = VecDeque::from([target]);
        seen[target] = true;
        while let Some(current) = queue.pop_front() {
            for &parent in &self.predecessors[current] {
                if !seen[parent] {
                    seen[parent] = true;
                    queue.push_back(parent);
                }
            }
        }
        seen
    }

    /// A copy of this graph with every label replaced positionally.
    pub fn relabel<S: AsRef<str>>(&self, labels: &[S]) -> Result<Self, CausalError> {
        if labels.len() != self.labels.len() {
            return Err(CausalError::LabelCountMismatch {
                expected: self.labels.len(),
                actual: labels.len(),
            });
        }
        let mut relabelled = Self::new();
        for label in labels {
            relabelled.add_node(label.as_ref());
        }
        if relabelled.node_count() != self.node_count() {
            // Duplicate labels would merge nodes.
            return Err(CausalError::LabelCountMismatch {
                expected: self.labels.len(),
                actual: relabelled.node_count(),
            });
        }
        for (from, to) in self.edges() {
            relabelled.add_edge(labels[from].as_ref(), labels[to].as_ref())?;
        }
        Ok(relabelled)
    }

    /// BFS shortest path `from -> to` (inclusive), used for cycle reporting.
    fn find_path(&self, from: NodeId, to: NodeId) -> Option<Vec<NodeId>> {
        let mut parent: Vec<Option<NodeId>> = vec![None; self.labels.len()];
        let mut seen = vec![false; self.labels.len()];
        let mut queue = VecDeque::from([from]);
        seen[from] = true;

        while let Some(current) = queue.pop_front() {
            if current == to {
                let mut path = vec![to];
                let mut cursor = to;
                while let Some(prev) = parent[cursor] {
                    path.push(prev);
                    cursor = prev;
                }
                path.reverse();
                return Some(path);
            }
            for &next in &self.successors[current] {
                if !seen[next] {
                    seen[next] = true;
                    parent[next] = Some(current);
                    queue.push_back(next);
                }
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chain() -> CausalGraph {
        CausalGraph::from_edges(["A", "B", "C"], [("A", "B"), ("B", "C")]).unwrap()
    }

    #[test]
    fn test_insertion_order_preserved() {
        let graph = CausalGraph::from_edges(["Z", "A"], [("Z", "M"), ("A", "M")]).unwrap();
        assert_eq!(graph.labels(), &["Z", "A", "M"]);
        assert_eq!(graph.predecessors(2), &[0, 1]);
    }

    #[test]
    fn test_duplicate_edge_ignored() {
        let mut graph = chain();
        graph.add_edge("A", "B").unwrap();
        assert_eq!(graph.edge_count(), 2);
        assert_eq!(graph.successors(0), &[1]);
    }

    #[test]
    fn test_self_loop_rejected() {
        let mut graph = CausalGraph::new();
        let err = graph.add_edge("A", "A").unwrap_err();
        assert!(matches!(err, CausalError::InvalidGraph { .. }));
    }

    #[test]
    fn test_cycle_rejected_with_path() {
        let mut graph = chain();
        let err = graph.add_edge("C", "A").unwrap_err();
        assert_eq!(
            err,
            CausalError::InvalidGraph {
                cycle: vec![
                    "C".to_string(),
                    "A".to_string(),
                    "B".to_string(),
                    "C".to_string()
                ]
            }
        );
        assert_eq!(graph.edge_count(), 2, "rejected edge must not be inserted");
    }

    #[test]
    fn test_edges_in_node_then_successor_order() {
        let graph =
            CausalGraph::from_edges(["A", "B", "C"], [("B", "C"), ("A", "C"), ("A", "B")])
                .unwrap();
        let edges: Vec<_> = graph.edges().collect();
        assert_eq!(edges, vec![(0, 2), (0, 1), (1, 2)]);
    }

    #[test]
    fn test_reaches_and_ancestors() {
        let mut graph = chain();
        graph.add_node("D");
        assert!(graph.reaches(0, 2));
        assert!(!graph.reaches(2, 0));
        assert_eq!(graph.ancestors_inclusive(2), vec![true, true, true, false]);
        assert_eq!(graph.isolated_nodes().collect::<Vec<_>>(), vec![3]);
    }

    #[test]
    fn test_relabel_keeps_structure() {
        let graph = chain().relabel(&["x", "y", "z"]).unwrap();
        assert_eq!(graph.labels(), &["x", "y", "z"]);
        assert!(graph.has_edge(0, 1));
        assert!(graph.has_edge(1, 2));

        let err = chain().relabel(&["x", "y"]).unwrap_err();
        assert_eq!(
            err,
            CausalError::LabelCountMismatch {
                expected: 3,
                actual: 2
            }
        );
        assert!(chain().relabel(&["x", "x", "z"]).is_err());
    }

    #[test]
    fn test_require_unknown_node() {
        assert_eq!(
            chain().require_node("Q"),
            Err(CausalError::UnknownNode("Q".to_string()))
        );
    }
}
