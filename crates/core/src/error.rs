/// Errors raised while building or analyzing a causal graph.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CausalError {
    /// The graph is not acyclic. `cycle` lists the labels along the cycle,
    /// starting and ending at the same node.
    #[error("invalid graph: edge would create cycle {}", .cycle.join(" -> "))]
    InvalidGraph { cycle: Vec<String> },

    /// A node label was referenced that the graph does not contain.
    #[error("unknown node: {0}")]
    UnknownNode(String),

    /// An edge has no fact assigned in the fact index. Indicates the facts
    /// were generated for a different graph.
    #[error("no fact recorded for edge {from} -> {to}")]
    MissingFact { from: String, to: String },

    /// Path enumeration for a pair exceeded the configured limit.
    #[error("more than {limit} paths from {from} to {to}")]
    PathLimitExceeded {
        from: String,
        to: String,
        limit: usize,
    },

    /// An edgelist line could not be parsed.
    #[error("edgelist line {line}: {message}")]
    Parse { line: usize, message: String },

    /// Edge probability outside `[0, 1]`.
    #[error("edge probability must be within [0, 1], got {0}")]
    InvalidProbability(f64),

    /// Relabelling was given the wrong number of labels.
    #[error("expected {expected} labels, got {actual}")]
    LabelCountMismatch { expected: usize, actual: usize },
}
