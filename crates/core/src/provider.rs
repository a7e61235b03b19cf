//! Provider trait: the abstraction over LLM backends.
//!
//! A Provider knows how to continue a plain-text prompt. The agent loop
//! relies on it honouring stop sequences: generation must halt before an
//! `Observation:` marker so the model never writes its own tool output.
//!
//! Implementations: OpenAI-compatible endpoints (OpenAI, OpenRouter, Ollama).

use async_trait::async_trait;
use crate::error::ProviderError;

/// The core Provider trait.
///
/// The agent loop calls `generate()` without knowing which backend is
/// being used.
#[async_trait]
pub trait Provider: Send + Sync {
    /// A human-readable name for this provider (e.g., "openai", "ollama").
    fn name(&self) -> &str;

    /// The model this provider generates with.
    fn model(&self) -> &str;

    /// Continue `prompt`, truncating the output at the first stop sequence.
    async fn generate(
        &self,
        prompt: &str,
        stop: &[String],
    ) -> std::result::Result<String, ProviderError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    struct EchoProvider;

    #[async_trait]
    impl Provider for EchoProvider {
        fn name(&self) -> &str {
            "echo"
        }

        fn model(&self) -> &str {
            "echo-1"
        }

        async fn generate(&self, prompt: &str, stop: &[String]) -> Result<String, ProviderError> {
            let cut = stop
                .iter()
                .filter_map(|s| prompt.find(s.as_str()))
                .min()
                .unwrap_or(prompt.len());
            Ok(prompt[..cut].to_string())
        }
    }

    #[tokio::test]
    async fn provider_is_object_safe() {
        let provider: Box<dyn Provider> = Box::new(EchoProvider);
        let out = provider
            .generate("Action: x\nObservation: y", &["\nObservation:".to_string()])
            .await
            .unwrap();
        assert_eq!(out, "Action: x");
        assert_eq!(provider.name(), "echo");
        assert_eq!(provider.model(), "echo-1");
    }
}
