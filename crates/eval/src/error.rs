use crate::llm::LlmError;

/// Errors raised while sampling, scoring or running a benchmark.
#[derive(Debug, thiserror::Error)]
pub enum EvalError {
    /// Fact accuracy is undefined for a question without supporting facts
    /// (`chain_none`); callers must handle that category themselves.
    #[error("question {symbol} has no supporting fact sets to score against")]
    EmptySupport { symbol: String },

    /// More few-shot examples requested than eligible questions remain.
    #[error("requested {requested} examples but only {available} questions are eligible")]
    SamplingExhausted { requested: usize, available: usize },

    /// Balanced sampling with no question types left after exclusion.
    #[error("no question types remain for balanced sampling")]
    NoQuestionTypes,

    /// The weighted sampler rejected the weights.
    #[error("sampling failed: {0}")]
    Sampling(String),

    /// A question index outside the question list.
    #[error("question index {index} out of range ({len} questions)")]
    QuestionOutOfRange { index: usize, len: usize },

    /// The language model could not be queried.
    #[error(transparent)]
    Llm(#[from] LlmError),
}
