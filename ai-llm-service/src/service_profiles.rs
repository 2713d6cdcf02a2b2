//! Shared LLM service with two profiles: `generation` and `embedding`.
//!
//! - Construct once at startup, wrap in `Arc`, and pass clones to dependents.
//! - Each profile owns the HTTP client of its provider; both may point to the
//!   same provider with different models.
//!
//! # Example
//! ```no_run
//! use std::sync::Arc;
//! use ai_llm_service::LlmServiceProfiles;
//! use ai_llm_service::config::default_config::{config_embedding, config_generation};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let svc = Arc::new(LlmServiceProfiles::new(config_generation()?, config_embedding()?)?);
//!
//! let txt = svc.generate("Hello world").await?;
//! let emb = svc.embed("Ferris").await?;
//! println!("{txt} / dim = {}", emb.len());
//! # Ok(()) }
//! ```

use tracing::info;

use crate::{
    config::{llm_model_config::LlmModelConfig, llm_provider::LlmProvider},
    error_handler::AiLlmError,
    services::{gemini_service::GeminiService, ollama_service::OllamaService},
};

/// Provider-specific client behind one profile.
enum ProviderClient {
    Gemini(GeminiService),
    Ollama(OllamaService),
}

impl ProviderClient {
    fn new(cfg: &LlmModelConfig) -> Result<Self, AiLlmError> {
        Ok(match cfg.provider {
            LlmProvider::Gemini => ProviderClient::Gemini(GeminiService::new(cfg.clone())?),
            LlmProvider::Ollama => ProviderClient::Ollama(OllamaService::new(cfg.clone())?),
        })
    }
}

/// Service handle managing the **generation** and **embedding** profiles.
pub struct LlmServiceProfiles {
    generation: LlmModelConfig,
    embedding: LlmModelConfig,
    generation_client: ProviderClient,
    embedding_client: ProviderClient,
}

impl LlmServiceProfiles {
    /// Creates the service and its HTTP clients.
    ///
    /// # Errors
    /// Returns [`AiLlmError`] if a config is malformed (bad endpoint, empty model).
    pub fn new(generation: LlmModelConfig, embedding: LlmModelConfig) -> Result<Self, AiLlmError> {
        let generation_client = ProviderClient::new(&generation)?;
        let embedding_client = ProviderClient::new(&embedding)?;

        info!(
            generation.provider = %generation.provider,
            generation.model = %generation.model,
            embedding.provider = %embedding.provider,
            embedding.model = %embedding.model,
            "LLM service profiles ready"
        );

        Ok(Self {
            generation,
            embedding,
            generation_client,
            embedding_client,
        })
    }

    /// Generates text for `prompt` using the **generation** profile.
    ///
    /// # Errors
    /// Returns [`AiLlmError`] if generation fails.
    pub async fn generate(&self, prompt: &str) -> Result<String, AiLlmError> {
        match &self.generation_client {
            ProviderClient::Gemini(cli) => cli.generate(prompt).await,
            ProviderClient::Ollama(cli) => cli.generate(prompt).await,
        }
    }

    /// Computes an embedding for `input` using the **embedding** profile.
    ///
    /// # Errors
    /// Returns [`AiLlmError`] if embedding fails.
    pub async fn embed(&self, input: &str) -> Result<Vec<f32>, AiLlmError> {
        match &self.embedding_client {
            ProviderClient::Gemini(cli) => cli.embeddings(input).await,
            ProviderClient::Ollama(cli) => cli.embeddings(input).await,
        }
    }

    /// Returns references to the current profiles `(generation, embedding)`.
    pub fn profiles(&self) -> (&LlmModelConfig, &LlmModelConfig) {
        (&self.generation, &self.embedding)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn ollama(endpoint: &str, model: &str) -> LlmModelConfig {
        LlmModelConfig {
            provider: LlmProvider::Ollama,
            model: model.into(),
            endpoint: endpoint.into(),
            api_key: None,
            max_tokens: None,
            temperature: None,
            top_p: None,
            timeout_secs: Some(5),
        }
    }

    #[test]
    fn malformed_endpoint_fails_construction() {
        let res = LlmServiceProfiles::new(
            ollama("localhost:11434", "llama3.1"),
            ollama("http://localhost:11434", "all-minilm"),
        );
        assert!(matches!(res, Err(AiLlmError::Config(_))));
    }

    #[tokio::test]
    async fn profiles_route_to_their_own_clients() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/generate"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "response": "answer" })))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/api/embeddings"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "embedding": [1.0] })))
            .expect(1)
            .mount(&server)
            .await;

        let svc = LlmServiceProfiles::new(
            ollama(&server.uri(), "llama3.1"),
            ollama(&server.uri(), "all-minilm"),
        )
        .unwrap();

        assert_eq!(svc.generate("q").await.unwrap(), "answer");
        assert_eq!(svc.embed("q").await.unwrap(), vec![1.0]);
        assert_eq!(svc.profiles().1.model, "all-minilm");
    }
}
