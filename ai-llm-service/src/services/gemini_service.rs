//! Google Generative Language API client (Gemini models).
//!
//! - `POST {endpoint}/models/{model}:generateContent`: single-turn generation
//! - `POST {endpoint}/models/{model}:embedContent`   : text embedding
//!
//! The key travels in the `x-goog-api-key` header. A config without a key is
//! accepted at construction; each call checks for it first and fails with
//! [`ConfigError::MissingVar`] before any network I/O.

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::{
    config::{llm_model_config::LlmModelConfig, llm_provider::LlmProvider},
    error_handler::{AiLlmError, ConfigError, Result, status_error},
    services::build_http_client,
};

/// Thin client for Gemini.
pub struct GeminiService {
    client: reqwest::Client,
    cfg: LlmModelConfig,
    url_generate: String,
    url_embed: String,
}

impl GeminiService {
    /// Creates a new [`GeminiService`] from the given config.
    ///
    /// # Errors
    /// - [`AiLlmError::InvalidProvider`] if `cfg.provider` is not `Gemini`
    /// - [`AiLlmError::Config`] for an empty model or malformed endpoint
    pub fn new(cfg: LlmModelConfig) -> Result<Self> {
        if cfg.provider != LlmProvider::Gemini {
            return Err(AiLlmError::InvalidProvider { expected: "gemini" });
        }
        if cfg.model.trim().is_empty() {
            return Err(ConfigError::EmptyModel.into());
        }

        let client = build_http_client(&cfg, "GEMINI_URL")?;

        let base = cfg.endpoint.trim().trim_end_matches('/');
        let model = cfg.model.trim().trim_start_matches("models/");
        let url_generate = format!("{base}/models/{model}:generateContent");
        let url_embed = format!("{base}/models/{model}:embedContent");

        Ok(Self {
            client,
            cfg,
            url_generate,
            url_embed,
        })
    }

    fn api_key(&self) -> Result<&str> {
        self.cfg
            .api_key
            .as_deref()
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| ConfigError::MissingVar("GOOGLE_API_KEY").into())
    }

    /// Generates a completion for a single user prompt.
    ///
    /// Returns the text parts of the first candidate, concatenated verbatim.
    ///
    /// # Errors
    /// - [`AiLlmError::Config`] if no API key is configured
    /// - [`AiLlmError::HttpStatus`] / [`AiLlmError::HttpTransport`] on HTTP failures
    /// - [`AiLlmError::Decode`] if the response has no candidate text (e.g. blocked)
    #[instrument(skip_all, fields(model = %self.cfg.model))]
    pub async fn generate(&self, prompt: &str) -> Result<String> {
        let key = self.api_key()?;
        let body = GenerateContentRequest::from_cfg(&self.cfg, prompt);

        debug!("POST {}", self.url_generate);
        let resp = self
            .client
            .post(&self.url_generate)
            .header("x-goog-api-key", key)
            .json(&body)
            .send()
            .await?;

        if !resp.status().is_success() {
            return Err(status_error(resp, &self.url_generate).await);
        }

        let out: GenerateContentResponse = resp
            .json()
            .await
            .map_err(|e| AiLlmError::Decode(format!("serde error: {e}")))?;

        out.into_text()
    }

    /// Embeds a single text via `embedContent`.
    ///
    /// # Errors
    /// Same as [`GeminiService::generate`].
    #[instrument(skip_all, fields(model = %self.cfg.model))]
    pub async fn embeddings(&self, input: &str) -> Result<Vec<f32>> {
        let key = self.api_key()?;
        let body = EmbedContentRequest {
            content: Content::user(input),
        };

        debug!("POST {}", self.url_embed);
        let resp = self
            .client
            .post(&self.url_embed)
            .header("x-goog-api-key", key)
            .json(&body)
            .send()
            .await?;

        if !resp.status().is_success() {
            return Err(status_error(resp, &self.url_embed).await);
        }

        let out: EmbedContentResponse = resp.json().await.map_err(|e| {
            AiLlmError::Decode(format!(
                "serde error: {e}; expected `{{ embedding: {{ values: number[] }} }}`"
            ))
        })?;

        Ok(out.embedding.values)
    }
}

/* ==========================
HTTP payloads
========================== */

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest<'a> {
    contents: Vec<Content<'a>>,
    #[serde(skip_serializing_if = "GenerationConfig::is_empty")]
    generation_config: GenerationConfig,
}

impl<'a> GenerateContentRequest<'a> {
    fn from_cfg(cfg: &LlmModelConfig, prompt: &'a str) -> Self {
        Self {
            contents: vec![Content::user(prompt)],
            generation_config: GenerationConfig {
                temperature: cfg.temperature,
                top_p: cfg.top_p,
                max_output_tokens: cfg.max_tokens,
            },
        }
    }
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    role: &'static str,
    parts: Vec<Part<'a>>,
}

impl<'a> Content<'a> {
    fn user(text: &'a str) -> Self {
        Self {
            role: "user",
            parts: vec![Part { text }],
        }
    }
}

#[derive(Debug, Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    top_p: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_output_tokens: Option<u32>,
}

impl GenerationConfig {
    fn is_empty(&self) -> bool {
        self.temperature.is_none() && self.top_p.is_none() && self.max_output_tokens.is_none()
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    #[serde(default)]
    prompt_feedback: Option<serde_json::Value>,
}

impl GenerateContentResponse {
    fn into_text(self) -> Result<String> {
        let Some(first) = self.candidates.into_iter().next() else {
            let why = self
                .prompt_feedback
                .map(|f| f.to_string())
                .unwrap_or_else(|| "no candidates".into());
            return Err(AiLlmError::Decode(format!("response has no candidates: {why}")));
        };

        let parts = first.content.map(|c| c.parts).unwrap_or_default();
        if parts.iter().all(|p| p.text.is_none()) {
            let reason = first.finish_reason.unwrap_or_else(|| "unknown".into());
            return Err(AiLlmError::Decode(format!(
                "candidate has no text parts (finishReason={reason})"
            )));
        }

        Ok(parts.into_iter().filter_map(|p| p.text).collect())
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    content: Option<CandidateContent>,
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

#[derive(Debug, Serialize)]
struct EmbedContentRequest<'a> {
    content: Content<'a>,
}

#[derive(Debug, Deserialize)]
struct EmbedContentResponse {
    embedding: EmbeddingValues,
}

#[derive(Debug, Deserialize)]
struct EmbeddingValues {
    values: Vec<f32>,
}
