//! Language-model client seam and the reference Anthropic client.

/// Errors from a completion request.
#[derive(Debug, thiserror::Error)]
pub enum LlmError {
    /// Network or transport failure, or missing credentials.
    #[error("LLM network error: {0}")]
    Network(String),
    /// The API answered with an error status.
    #[error("LLM API error ({status}): {message}")]
    Api { status: u16, message: String },
    /// The response did not contain a completion.
    #[error("LLM parse error: {0}")]
    Parse(String),
}

/// Produces a text completion for a prompt.
///
/// Implementations own model selection and sampling settings; benchmark
/// runs expect deterministic (temperature 0) completions.
pub trait LlmClient {
    fn complete(&self, prompt: &str) -> Result<String, LlmError>;
}

impl<T: LlmClient + ?Sized> LlmClient for &T {
    fn complete(&self, prompt: &str) -> Result<String, LlmError> {
        (**self).complete(prompt)
    }
}

impl<T: LlmClient + ?Sized> LlmClient for Box<T> {
    fn complete(&self, prompt: &str) -> Result<String, LlmError> {
        (**self).complete(prompt)
    }
}

/// Default model used when none is configured.
pub const DEFAULT_MODEL: &str = "claude-sonnet-4-20250514";
/// Default completion budget.
pub const DEFAULT_MAX_TOKENS: u32 = 250;

#[cfg(feature = "anthropic")]
/// Client for the Anthropic Messages API over `ureq`.
///
/// Sends the prompt as a single user message with temperature 0.
pub struct AnthropicClient {
    pub api_key: String,
    /// Default: https://api.anthropic.com
    pub base_url: String,
    pub model: String,
    pub max_tokens: u32,
}

#[cfg(feature = "anthropic")]
impl AnthropicClient {
    /// Read the key from `ANTHROPIC_API_KEY`.
    pub fn from_env(model: impl Into<String>) -> Result<Self, LlmError> {
        let api_key = std::env::var("ANTHROPIC_API_KEY").map_err(|_| {
            LlmError::Network("ANTHROPIC_API_KEY environment variable not set".to_string())
        })?;
        Ok(Self::new(api_key, model))
    }

    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: "https://api.anthropic.com".to_string(),
            model: model.into(),
            max_tokens: DEFAULT_MAX_TOKENS,
        }
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }
}

#[cfg(feature = "anthropic")]
impl LlmClient for AnthropicClient {
    fn complete(&self, prompt: &str) -> Result<String, LlmError> {
        let body = serde_json::json!({
            "model": self.model,
            "max_tokens": self.max_tokens,
            "temperature": 0,
            "messages": [{ "role": "user", "content": prompt }],
        });

        let url = format!("{}/v1/messages", self.base_url);
        tracing::debug!(model = %self.model, prompt_len = prompt.len(), "querying model");

        let agent = ureq::Agent::new_with_defaults();
        let response = agent
            .post(&url)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", "2023-06-01")
            .header("content-type", "application/json")
            .send_json(body);

        match response {
            Ok(resp) => {
                let json: serde_json::Value = resp.into_body().read_json().map_err(|e| {
                    LlmError::Parse(format!("failed to parse Anthropic response: {}", e))
                })?;
                json["content"]
                    .as_array()
                    .and_then(|blocks| blocks.first())
                    .and_then(|block| block["text"].as_str())
                    .map(|text| text.trim().to_string())
                    .ok_or_else(|| {
                        LlmError::Parse("no text content in Anthropic response".to_string())
                    })
            }
            Err(ureq::Error::StatusCode(status)) => Err(LlmError::Api {
                status,
                message: format!("request to {} rejected", url),
            }),
            Err(e) => Err(LlmError::Network(e.to_string())),
        }
    }
}
