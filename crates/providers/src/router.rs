//! Provider selection: builds the configured LLM backend.

use std::sync::Arc;
use minagent_config::AppConfig;
use minagent_core::error::ProviderError;
use minagent_core::provider::Provider;
use crate::openai_compat::OpenAiCompatProvider;

/// Build the default provider from configuration.
///
/// Per-provider settings in `[providers.<name>]` win over the top-level
/// `api_key` and `default_model`.
pub fn build_from_config(config: &AppConfig) -> Result<Arc<dyn Provider>, ProviderError> {
    let name = config.default_provider.as_str();
    let provider_config = config.providers.get(name);

    let api_key = provider_config
        .and_then(|p| p.api_key.clone())
        .or_else(|| config.api_key.clone());

    let api_key = match (name, api_key) {
        (_, Some(key)) => key,
        ("ollama" | "vllm" | "llamacpp", None) => String::new(),
        (_, None) => {
            return Err(ProviderError::NotConfigured(format!(
                "no API key for provider '{name}'"
            )));
        }
    };

    let base_url = provider_config
        .and_then(|p| p.api_url.clone())
        .map(Ok)
        .unwrap_or_else(|| default_base_url(name))?;

    let model = provider_config
        .and_then(|p| p.default_model.clone())
        .unwrap_or_else(|| config.default_model.clone());

    tracing::debug!(provider = name, %base_url, %model, "Building provider");

    let provider = OpenAiCompatProvider::new(name, base_url, api_key, model)?
        .with_temperature(config.default_temperature)
        .with_max_tokens(config.default_max_tokens);

    Ok(Arc::new(provider))
}

/// Get the default base URL for well-known providers.
fn default_base_url(provider_name: &str) -> Result<String, ProviderError> {
    let url = match provider_name {
        "openai" => "https://api.openai.com/v1",
        "openrouter" => "https://openrouter.ai/api/v1",
        "ollama" => "http://localhost:11434/v1",
        "deepseek" => "https://api.deepseek.com/v1",
        "groq" => "https://api.groq.com/openai/v1",
        "together" => "https://api.together.xyz/v1",
        "vllm" => "http://localhost:8000/v1",
        "llamacpp" => "http://localhost:8080/v1",
        other => {
            return Err(ProviderError::NotConfigured(format!(
                "unknown provider '{other}'; set [providers.{other}] api_url"
            )));
        }
    };
    Ok(url.to_string())
}
