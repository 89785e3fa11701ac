//! Random benchmark graphs and node naming.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::error::CausalError;
use crate::graph::CausalGraph;

/// Symbolic label of the `index`-th generated variable.
pub fn symbolic_label(index: usize) -> String {
    format!("X{index}")
}

/// Sample an Erdős–Rényi DAG on `n` nodes labelled `X0..X{n-1}`.
///
/// Every pair below the diagonal of an `n x n` adjacency matrix becomes an
/// edge with probability `p`, which makes the matrix acyclic by
/// construction; rows and columns are then permuted together so the
/// causal order is hidden from node numbering.
pub fn generate_dag<R: Rng + ?Sized>(
    rng: &mut R,
    n: usize,
    p: f64,
) -> Result<CausalGraph, CausalError> {
    if !(0.0..=1.0).contains(&p) {
        return Err(CausalError::InvalidProbability(p));
    }

    let mut lower = vec![vec![false; n]; n];
    for (i, row) in lower.iter_mut().enumerate() {
        for cell in row.iter_mut().take(i) {
            *cell = rng.gen_bool(p);
        }
    }

    let mut permutation: Vec<usize> = (0..n).collect();
    permutation.shuffle(rng);

    let mut graph = CausalGraph::new();
    for index in 0..n {
        graph.add_node(symbolic_label(index));
    }
    for k in 0..n {
        for l in 0..n {
            if lower[permutation[k]][permutation[l]] {
                graph.add_edge(&symbolic_label(k), &symbolic_label(l))?;
            }
        }
    }

    tracing::debug!(
        nodes = n,
        edges = graph.edge_count(),
        probability = p,
        "generated random dag"
    );
    Ok(graph)
}

/// Relabel nodes positionally, e.g. with real words instead of `Xi`.
pub fn assign_labels<S: AsRef<str>>(
    graph: &CausalGraph,
    labels: &[S],
) -> Result<CausalGraph, CausalError> {
    graph.relabel(labels)
}

/// Same structure, existing labels shuffled across nodes.
pub fn shuffle_labels<R: Rng + ?Sized>(
    rng: &mut R,
    graph: &CausalGraph,
) -> Result<CausalGraph, CausalError> {
    let mut labels = graph.labels().to_vec();
    labels.shuffle(rng);
    graph.relabel(&labels)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_same_seed_same_graph() {
        let a = generate_dag(&mut StdRng::seed_from_u64(3), 6, 0.4).unwrap();
        let b = generate_dag(&mut StdRng::seed_from_u64(3), 6, 0.4).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.node_count(), 6);
        assert_eq!(a.labels()[5], "X5");
    }

    #[test]
    fn test_probability_extremes() {
        let mut rng = StdRng::seed_from_u64(0);
        let empty = generate_dag(&mut rng, 5, 0.0).unwrap();
        assert_eq!(empty.edge_count(), 0);

        let full = generate_dag(&mut rng, 5, 1.0).unwrap();
        assert_eq!(full.edge_count(), 10);
    }

    #[test]
    fn test_invalid_probability() {
        let mut rng = StdRng::seed_from_u64(0);
        assert_eq!(
            generate_dag(&mut rng, 3, 1.5),
            Err(CausalError::InvalidProbability(1.5))
        );
    }

    #[test]
    fn test_shuffle_labels_keeps_edge_count() {
        let mut rng = StdRng::seed_from_u64(7);
        let graph = generate_dag(&mut rng, 6, 0.5).unwrap();
        let shuffled = shuffle_labels(&mut rng, &graph).unwrap();
        assert_eq!(shuffled.edge_count(), graph.edge_count());

        let mut original = graph.labels().to_vec();
        let mut permuted = shuffled.labels().to_vec();
        original.sort();
        permuted.sort();
        assert_eq!(original, permuted);
    }

    #[test]
    fn test_assign_labels() {
        let graph = CausalGraph::from_edges(["X0", "X1"], [("X0", "X1")]).unwrap();
        let named = assign_labels(&graph, &["rain", "mud"]).unwrap();
        assert!(named.has_edge(0, 1));
        assert_eq!(named.label(1), "mud");
    }
}
