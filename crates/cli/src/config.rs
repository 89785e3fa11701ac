//! Run configuration loaded from `causeway.toml`.
//!
//! # Example
//!
//! ```toml
//! seed = 0
//!
//! [prompt]
//! style = "v6"
//! shots = 5
//! balanced = true
//!
//! [model]
//! name = "claude-sonnet-4-20250514"
//! max_tokens = 250
//! ```
//!
//! Every field is optional. Command-line flags take precedence.

use std::path::Path;

use causeway_eval::llm::{DEFAULT_MAX_TOKENS, DEFAULT_MODEL};
use causeway_eval::{PromptStyle, RunConfig, SamplingMode};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CausewayConfig {
    /// Seed for sampling few-shot examples and generating graphs.
    pub seed: u64,
    pub prompt: PromptSettings,
    pub model: ModelSettings,
}

/// `[prompt]` section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PromptSettings {
    pub style: PromptStyle,
    pub shots: usize,
    /// Type-balanced rather than uniform example sampling.
    pub balanced: bool,
}

impl Default for PromptSettings {
    fn default() -> Self {
        Self {
            style: PromptStyle::default(),
            shots: 5,
            balanced: true,
        }
    }
}

/// `[model]` section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ModelSettings {
    pub name: String,
    pub max_tokens: u32,
}

impl Default for ModelSettings {
    fn default() -> Self {
        Self {
            name: DEFAULT_MODEL.to_string(),
            max_tokens: DEFAULT_MAX_TOKENS,
        }
    }
}

impl CausewayConfig {
    pub fn run_config(&self) -> RunConfig {
        RunConfig {
            style: self.prompt.style,
            shots: self.prompt.shots,
            mode: if self.prompt.balanced {
                SamplingMode::Balanced
            } else {
                SamplingMode::Uniform
            },
        }
    }
}

/// Read and parse a config file.
pub fn read_config(path: &Path) -> Result<CausewayConfig, String> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| format!("could not read '{}': {}", path.display(), e))?;

    toml::from_str(&content).map_err(|e| format!("could not parse '{}': {}", path.display(), e))
}

/// The file at `path`, or defaults when no path is given.
pub fn load_config(path: Option<&Path>) -> Result<CausewayConfig, String> {
    match path {
        Some(path) => read_config(path),
        None => Ok(CausewayConfig::default()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_config_keeps_defaults() {
        let config: CausewayConfig = toml::from_str(
            r#"
seed = 7

[prompt]
style = "v3"
"#,
        )
        .unwrap();
        assert_eq!(config.seed, 7);
        assert_eq!(config.prompt.style, PromptStyle::V3);
        assert_eq!(config.prompt.shots, 5);
        assert!(config.prompt.balanced);
        assert_eq!(config.model, ModelSettings::default());
    }

    #[test]
    fn test_empty_config_is_default() {
        let config: CausewayConfig = toml::from_str("").unwrap();
        assert_eq!(config, CausewayConfig::default());
        assert_eq!(config.run_config(), RunConfig::default());
    }

    #[test]
    fn test_unknown_field_rejected() {
        let result: Result<CausewayConfig, _> = toml::from_str("[prompt]\nshot = 3\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_uniform_sampling_mode() {
        let config: CausewayConfig =
            toml::from_str("[prompt]\nbalanced = false\nshots = 0\n").unwrap();
        let run = config.run_config();
        assert_eq!(run.mode, SamplingMode::Uniform);
        assert_eq!(run.shots, 0);
    }

    #[test]
    fn test_missing_file() {
        let err = read_config(Path::new("/nonexistent/causeway.toml")).unwrap_err();
        assert!(err.contains("could not read"));
    }
}
