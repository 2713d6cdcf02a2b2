//! Default LLM configs loaded from environment variables.
//!
//! Two roles are used by the chat service:
//!
//! - **Generation** → answers the user's question from the retrieved context
//! - **Embedding**  → encodes the question for the vector index
//!
//! # Environment variables
//!
//! Common:
//! - `LLM_PROVIDER`        = generation provider (`gemini` default, or `ollama`)
//! - `EMBEDDING_PROVIDER`  = embedding provider (`ollama` default, or `gemini`)
//! - `LLM_MAX_TOKENS`, `LLM_TEMPERATURE`, `LLM_TIMEOUT_SECS` = optional knobs
//!
//! Gemini-specific:
//! - `GOOGLE_API_KEY` = credential, read here but only required when a call is made
//! - `GEMINI_URL`     = API base (default `https://generativelanguage.googleapis.com/v1beta`)
//! - `GEMINI_MODEL`   = generation model (default `gemini-1.5-flash`)
//!
//! Ollama-specific:
//! - `OLLAMA_URL` or `OLLAMA_PORT` = endpoint (default `http://localhost:11434`)
//! - `OLLAMA_MODEL`                = generation model (default `llama3.1`)
//!
//! Embeddings:
//! - `EMBEDDING_MODEL` = default `all-minilm` on Ollama, `text-embedding-004` on Gemini

use crate::{
    config::{llm_model_config::LlmModelConfig, llm_provider::LlmProvider},
    error_handler::{
        AiLlmError, ConfigError, env_opt, env_opt_f32, env_opt_u32, env_opt_u64, env_or,
        validate_http_endpoint,
    },
};

pub const DEFAULT_GEMINI_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-1.5-flash";
pub const DEFAULT_GEMINI_EMBEDDING_MODEL: &str = "text-embedding-004";
pub const DEFAULT_OLLAMA_URL: &str = "http://localhost:11434";
pub const DEFAULT_OLLAMA_MODEL: &str = "llama3.1";
/// Ollama's build of all-MiniLM-L6-v2 (384 dimensions).
pub const DEFAULT_OLLAMA_EMBEDDING_MODEL: &str = "all-minilm";

/// Resolves the Ollama endpoint.
///
/// Precedence:
/// 1. `OLLAMA_URL` if present and non-empty
/// 2. `OLLAMA_PORT` → `http://localhost:{port}`
/// 3. [`DEFAULT_OLLAMA_URL`]
///
/// # Errors
///
/// - [`ConfigError::InvalidNumber`] if `OLLAMA_PORT` is invalid
/// - [`ConfigError::InvalidFormat`] if `OLLAMA_URL` has no http(s) scheme
fn ollama_endpoint() -> Result<String, AiLlmError> {
    resolve_ollama_endpoint(env_opt("OLLAMA_URL"), env_opt("OLLAMA_PORT"))
}

fn resolve_ollama_endpoint(
    url: Option<String>,
    port: Option<String>,
) -> Result<String, AiLlmError> {
    if let Some(url) = url {
        validate_http_endpoint("OLLAMA_URL", &url)?;
        return Ok(url);
    }
    if let Some(port) = port {
        let port = port
            .parse::<u16>()
            .ok()
            .filter(|p| *p != 0)
            .ok_or(ConfigError::InvalidNumber {
                var: "OLLAMA_PORT",
                reason: "expected u16 (1..=65535)",
            })?;
        return Ok(format!("http://localhost:{port}"));
    }
    Ok(DEFAULT_OLLAMA_URL.to_string())
}

fn gemini_endpoint() -> Result<String, AiLlmError> {
    let url = env_or("GEMINI_URL", DEFAULT_GEMINI_URL);
    validate_http_endpoint("GEMINI_URL", &url)?;
    Ok(url)
}

fn provider_from_env(var: &'static str, default: LlmProvider) -> Result<LlmProvider, AiLlmError> {
    match env_opt(var) {
        Some(raw) => Ok(raw.parse::<LlmProvider>()?),
        None => Ok(default),
    }
}

/// Constructs the **generation** profile.
///
/// # Defaults
/// - provider: Gemini, model `gemini-1.5-flash`
/// - sampling knobs: unset (provider defaults)
///
/// # Errors
/// Fails on malformed values only; a missing `GOOGLE_API_KEY` is reported by
/// the first generation call.
pub fn config_generation() -> Result<LlmModelConfig, AiLlmError> {
    let provider = provider_from_env("LLM_PROVIDER", LlmProvider::Gemini)?;

    let (model, endpoint, api_key) = match provider {
        LlmProvider::Gemini => (
            env_or("GEMINI_MODEL", DEFAULT_GEMINI_MODEL),
            gemini_endpoint()?,
            env_opt("GOOGLE_API_KEY"),
        ),
        LlmProvider::Ollama => (
            env_or("OLLAMA_MODEL", DEFAULT_OLLAMA_MODEL),
            ollama_endpoint()?,
            None,
        ),
    };

    Ok(LlmModelConfig {
        provider,
        model,
        endpoint,
        api_key,
        max_tokens: env_opt_u32("LLM_MAX_TOKENS")?,
        temperature: env_opt_f32("LLM_TEMPERATURE")?,
        top_p: None,
        timeout_secs: env_opt_u64("LLM_TIMEOUT_SECS")?,
    })
}

/// Constructs the **embedding** profile.
///
/// # Defaults
/// - provider: Ollama, model `all-minilm`
/// - `temperature = Some(0.0)` (ignored by embedding endpoints, kept deterministic)
pub fn config_embedding() -> Result<LlmModelConfig, AiLlmError> {
    let provider = provider_from_env("EMBEDDING_PROVIDER", LlmProvider::Ollama)?;

    let (model, endpoint, api_key) = match provider {
        LlmProvider::Gemini => (
            env_or("EMBEDDING_MODEL", DEFAULT_GEMINI_EMBEDDING_MODEL),
            gemini_endpoint()?,
            env_opt("GOOGLE_API_KEY"),
        ),
        LlmProvider::Ollama => (
            env_or("EMBEDDING_MODEL", DEFAULT_OLLAMA_EMBEDDING_MODEL),
            ollama_endpoint()?,
            None,
        ),
    };

    Ok(LlmModelConfig {
        provider,
        model,
        endpoint,
        api_key,
        max_tokens: None,
        temperature: Some(0.0),
        top_p: None,
        timeout_secs: env_opt_u64("LLM_TIMEOUT_SECS")?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn some(s: &str) -> Option<String> {
        Some(s.to_string())
    }

    #[test]
    fn ollama_defaults_to_localhost() {
        assert_eq!(resolve_ollama_endpoint(None, None).unwrap(), DEFAULT_OLLAMA_URL);
    }

    #[test]
    fn ollama_port_is_normalized_into_the_url() {
        assert_eq!(
            resolve_ollama_endpoint(None, some("011500")).unwrap(),
            "http://localhost:11500"
        );
    }

    #[test]
    fn ollama_url_wins_over_port() {
        assert_eq!(
            resolve_ollama_endpoint(some("http://ollama:11434"), some("9999")).unwrap(),
            "http://ollama:11434"
        );
    }

    #[test]
    fn bad_ollama_port_is_rejected() {
        for bad in ["0", "70000", "port"] {
            assert!(matches!(
                resolve_ollama_endpoint(None, some(bad)),
                Err(AiLlmError::Config(ConfigError::InvalidNumber { var: "OLLAMA_PORT", .. }))
            ));
        }
    }
}
