//! Model clients for the guideline chat service.
//!
//! Provides [`service_profiles::LlmServiceProfiles`], the single handle the
//! application builds at startup for text generation and query embeddings.

pub mod config;
pub mod error_handler;
pub mod service_profiles;
pub mod services;

pub use config::{llm_model_config::LlmModelConfig, llm_provider::LlmProvider};
pub use error_handler::{AiLlmError, ConfigError};
pub use service_profiles::LlmServiceProfiles;
