//! Model provider clients.
//!
//! The orchestrator only needs two capabilities: a plain text generation for
//! the primary path and a tool-calling chat step for the fallback path. Each
//! is a trait so the orchestrator can be driven by any backend.

pub mod google;
pub mod openai;

pub use google::GoogleProvider;
pub use openai::OpenAiProvider;

use async_trait::async_trait;
use secrecy::SecretString;
use std::time::Duration;

use super::types::{ChatMessage, ModelTurn};
use crate::error::ProviderError;
use crate::tools::ToolSchema;

/// Connection settings for one provider.
#[derive(Clone, Debug)]
pub struct ProviderConfig {
    /// `None` makes every request fail with a configuration error
    pub api_key: Option<SecretString>,
    pub model: String,
    pub base_url: String,
}

/// Single-shot text generation without tools.
#[async_trait]
pub trait GenerativeProvider: Send + Sync {
    fn name(&self) -> &'static str;

    async fn generate(&self, prompt: &str) -> Result<String, ProviderError>;
}

/// One step of a tool-calling conversation.
#[async_trait]
pub trait ToolCallingProvider: Send + Sync {
    fn name(&self) -> &'static str;

    async fn complete(
        &self,
        messages: &[ChatMessage],
        tools: &[ToolSchema],
    ) -> Result<ModelTurn, ProviderError>;
}

pub(crate) fn http_client() -> reqwest::Client {
    reqwest::Client::builder()
        .connect_timeout(Duration::from_secs(10))
        .build()
        .unwrap_or_default()
}
