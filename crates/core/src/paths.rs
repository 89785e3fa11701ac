//! Simple directed path enumeration between two variables.
//!
//! Every simple path is enumerated, so the number of paths (and the time
//! spent) grows exponentially with graph density: a complete DAG on `n`
//! nodes has `2^(n-2)` paths between its first and last node. Graphs in
//! the benchmark are small; callers handling larger graphs should set a
//! limit with [`PathAnalyzer::with_max_paths`].

use crate::error::CausalError;
use crate::facts::{FactId, FactSet};
use crate::graph::{CausalGraph, NodeId};

/// A simple directed path, as the sequence of nodes it visits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CausalPath {
    nodes: Vec<NodeId>,
}

impl CausalPath {
    pub fn new(nodes: Vec<NodeId>) -> Self {
        Self { nodes }
    }

    pub fn nodes(&self) -> &[NodeId] {
        &self.nodes
    }

    /// Number of edges traversed.
    pub fn len(&self) -> usize {
        self.nodes.len().saturating_sub(1)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Consecutive `(cause, effect)` pairs along the path.
    pub fn edges(&self) -> impl Iterator<Item = (NodeId, NodeId)> + '_ {
        self.nodes.windows(2).map(|pair| (pair[0], pair[1]))
    }

    /// Fact ids of the traversed edges, in path order.
    pub fn fact_ids(
        &self,
        graph: &CausalGraph,
        facts: &FactSet,
    ) -> Result<Vec<FactId>, CausalError> {
        self.edges()
            .map(|(from, to)| {
                facts
                    .fact_for_edge(from, to)
                    .ok_or_else(|| CausalError::MissingFact {
                        from: graph.label(from).to_string(),
                        to: graph.label(to).to_string(),
                    })
            })
            .collect()
    }
}

/// Shortest path of an ordered path list, i.e. its first element.
pub fn shortest(paths: &[CausalPath]) -> Option<&CausalPath> {
    paths.first()
}

/// Enumerates simple paths, optionally bounded.
#[derive(Debug, Clone, Copy, Default)]
pub struct PathAnalyzer {
    max_paths: Option<usize>,
}

impl PathAnalyzer {
    /// Analyzer without a path limit.
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail with [`CausalError::PathLimitExceeded`] once a pair has more
    /// than `limit` paths, instead of enumerating all of them.
    pub fn with_max_paths(limit: usize) -> Self {
        Self {
            max_paths: Some(limit),
        }
    }

    pub fn max_paths(&self) -> Option<usize> {
        self.max_paths
    }

    /// All simple directed paths from `source` to `target`.
    ///
    /// Paths are ordered by edge count; paths of equal length keep their
    /// discovery order, which follows successor insertion order. The first
    /// element is therefore the canonical shortest path. `source == target`
    /// yields no paths.
    pub fn paths(
        &self,
        graph: &CausalGraph,
        source: NodeId,
        target: NodeId,
    ) -> Result<Vec<CausalPath>, CausalError> {
        if source == target {
            return Ok(Vec::new());
        }

        // Only nodes that can still reach the target are worth expanding.
        let useful = graph.ancestors_inclusive(target);
        if !useful[source] {
            return Ok(Vec::new());
        }

        let mut found: Vec<CausalPath> = Vec::new();
        let mut on_path = vec![false; graph.node_count()];
        // Each frame is a node on the current path plus the index of the
        // next successor to try.
        let mut stack: Vec<(NodeId, usize)> = vec![(source, 0)];
        on_path[source] = true;

        while let Some(frame) = stack.last_mut() {
            let (current, cursor) = *frame;
            let successors = graph.successors(current);

            if cursor >= successors.len() {
                on_path[current] = false;
                stack.pop();
                continue;
            }
            frame.1 += 1;

            let next = successors[cursor];
            if !useful[next] || on_path[next] {
                continue;
            }

            if next == target {
                let mut nodes: Vec<NodeId> = stack.iter().map(|&(node, _)| node).collect();
                nodes.push(target);
                found.push(CausalPath::new(nodes));

                if let Some(limit) = self.max_paths {
                    if found.len() > limit {
                        return Err(CausalError::PathLimitExceeded {
                            from: graph.label(source).to_string(),
                            to: graph.label(target).to_string(),
                            limit,
                        });
                    }
                }
                continue;
            }

            on_path[next] = true;
            stack.push((next, 0));
        }

        // Stable: equal lengths keep discovery order.
        found.sort_by_key(CausalPath::len);

        tracing::trace!(
            source = graph.label(source),
            target = graph.label(target),
            paths = found.len(),
            "enumerated paths"
        );
        Ok(found)
    }

    /// Label-based convenience wrapper around [`paths`](Self::paths).
    pub fn paths_between(
        &self,
        graph: &CausalGraph,
        source: &str,
        target: &str,
    ) -> Result<Vec<CausalPath>, CausalError> {
        let source = graph.require_node(source)?;
        let target = graph.require_node(target)?;
        self.paths(graph, source, target)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::facts::generate_facts;

    fn labels(graph: &CausalGraph, path: &CausalPath) -> Vec<String> {
        path.nodes()
            .iter()
            .map(|&id| graph.label(id).to_string())
            .collect()
    }

    #[test]
    fn test_shortest_first_then_discovery_order() {
        // A -> B -> D, A -> C -> D, A -> D
        let graph = CausalGraph::from_edges(
            ["A", "B", "C", "D"],
            [("A", "B"), ("A", "C"), ("B", "D"), ("C", "D"), ("A", "D")],
        )
        .unwrap();
        let paths = PathAnalyzer::new().paths_between(&graph, "A", "D").unwrap();

        let rendered: Vec<Vec<String>> = paths.iter().map(|p| labels(&graph, p)).collect();
        assert_eq!(
            rendered,
            vec![
                vec!["A", "D"],
                vec!["A", "B", "D"],
                vec!["A", "C", "D"],
            ]
        );
        assert_eq!(shortest(&paths).map(CausalPath::len), Some(1));
    }

    #[test]
    fn test_no_path_against_edge_direction() {
        let graph = CausalGraph::from_edges(["A", "B"], [("A", "B")]).unwrap();
        let analyzer = PathAnalyzer::new();
        assert!(analyzer.paths_between(&graph, "B", "A").unwrap().is_empty());
        assert!(analyzer.paths_between(&graph, "A", "A").unwrap().is_empty());
    }

    #[test]
    fn test_fact_ids_follow_path() {
        let graph = CausalGraph::from_edges(["A", "B", "C"], [("B", "C"), ("A", "B")]).unwrap();
        let facts = generate_facts(&graph);
        let paths = PathAnalyzer::new().paths_between(&graph, "A", "C").unwrap();
        assert_eq!(paths.len(), 1);
        // A->B is fact 1 (node A first), B->C is fact 2.
        assert_eq!(paths[0].fact_ids(&graph, &facts).unwrap(), vec![1, 2]);
    }

    #[test]
    fn test_missing_fact_reported() {
        let graph = CausalGraph::from_edges(["A", "B"], [("A", "B")]).unwrap();
        let other = CausalGraph::from_edges(["A", "B"], Vec::<(&str, &str)>::new()).unwrap();
        let facts = generate_facts(&other);
        let path = CausalPath::new(vec![0, 1]);
        assert_eq!(
            path.fact_ids(&graph, &facts),
            Err(CausalError::MissingFact {
                from: "A".to_string(),
                to: "B".to_string()
            })
        );
    }

    #[test]
    fn test_path_limit_guard() {
        // Complete DAG on 6 nodes: 16 paths from first to last.
        let names = ["n0", "n1", "n2", "n3", "n4", "n5"];
        let mut edges = Vec::new();
        for i in 0..names.len() {
            for j in (i + 1)..names.len() {
                edges.push((names[i], names[j]));
            }
        }
        let graph = CausalGraph::from_edges(names, edges).unwrap();

        let all = PathAnalyzer::new().paths_between(&graph, "n0", "n5").unwrap();
        assert_eq!(all.len(), 16);
        assert!(all.windows(2).all(|w| w[0].len() <= w[1].len()));

        let err = PathAnalyzer::with_max_paths(10)
            .paths_between(&graph, "n0", "n5")
            .unwrap_err();
        assert!(matches!(err, CausalError::PathLimitExceeded { limit: 10, .. }));
    }

    #[test]
    fn test_unknown_node() {
        let graph = CausalGraph::from_edges(["A"], Vec::<(&str, &str)>::new()).unwrap();
        assert!(matches!(
            PathAnalyzer::new().paths_between(&graph, "A", "Z"),
            Err(CausalError::UnknownNode(_))
        ));
    }
}
