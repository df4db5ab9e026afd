// src/agent/providers/openai.rs
// OpenAI-compatible chat completions client with function calling, used as the
// fallback provider. Non-streaming: one request per tool-loop step.

use async_trait::async_trait;
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::debug;

use super::{http_client, ProviderConfig, ToolCallingProvider};
use crate::agent::types::{ChatMessage, ModelTurn, RequestedToolCall};
use crate::error::{ConfigError, ProviderError};
use crate::tools::{ToolCall, ToolSchema};

const PROVIDER: &str = "openai";

pub struct OpenAiProvider {
    client: Client,
    base_url: String,
    api_key: Option<SecretString>,
    model: String,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: AssistantMessage,
}

#[derive(Debug, Deserialize)]
struct AssistantMessage {
    #[serde(default)]
    content: Option<String>,
    #[serde(default)]
    tool_calls: Option<Vec<ApiToolCall>>,
}

#[derive(Debug, Deserialize)]
struct ApiToolCall {
    id: String,
    function: ApiFunctionCall,
}

#[derive(Debug, Deserialize)]
struct ApiFunctionCall {
    name: String,
    #[serde(default)]
    arguments: String,
}

impl OpenAiProvider {
    pub fn new(config: &ProviderConfig) -> Self {
        Self {
            client: http_client(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
            model: config.model.clone(),
        }
    }

    fn format_messages(messages: &[ChatMessage]) -> Vec<Value> {
        messages
            .iter()
            .map(|msg| match msg {
                ChatMessage::System(text) => json!({"role": "system", "content": text}),
                ChatMessage::User(text) => json!({"role": "user", "content": text}),
                ChatMessage::Assistant { text, tool_calls } => {
                    let mut m = json!({
                        "role": "assistant",
                        "content": if text.is_empty() { Value::Null } else { json!(text) },
                    });
                    if !tool_calls.is_empty() {
                        let calls: Vec<Value> = tool_calls
                            .iter()
                            .map(|tc| {
                                json!({
                                    "id": tc.id,
                                    "type": "function",
                                    "function": {
                                        "name": tc.call.name,
                                        "arguments": tc.call.arguments.to_string(),
                                    }
                                })
                            })
                            .collect();
                        m["tool_calls"] = json!(calls);
                    }
                    m
                }
                ChatMessage::Tool { call_id, name, result } => json!({
                    "role": "tool",
                    "tool_call_id": call_id,
                    "name": name,
                    "content": result.to_string(),
                }),
            })
            .collect()
    }

    fn format_tools(tools: &[ToolSchema]) -> Vec<Value> {
        tools
            .iter()
            .map(|t| {
                json!({
                    "type": "function",
                    "function": {
                        "name": t.name,
                        "description": t.description,
                        "parameters": t.parameters,
                    }
                })
            })
            .collect()
    }

    fn into_turn(message: AssistantMessage) -> ModelTurn {
        let tool_calls = message
            .tool_calls
            .unwrap_or_default()
            .into_iter()
            .map(|tc| {
                // Unparseable arguments are passed through as a string; the
                // dispatcher reports them back to the model as a failed call.
                let arguments = serde_json::from_str(&tc.function.arguments)
                    .unwrap_or(Value::String(tc.function.arguments));
                RequestedToolCall {
                    id: tc.id,
                    call: ToolCall::new(tc.function.name, arguments),
                }
            })
            .collect();
        ModelTurn {
            text: message.content.unwrap_or_default(),
            tool_calls,
        }
    }
}

#[async_trait]
impl ToolCallingProvider for OpenAiProvider {
    fn name(&self) -> &'static str {
        PROVIDER
    }

    async fn complete(
        &self,
        messages: &[ChatMessage],
        tools: &[ToolSchema],
    ) -> Result<ModelTurn, ProviderError> {
        let api_key = self
            .api_key
            .as_ref()
            .ok_or(ConfigError::Missing("OPENAI_API_KEY"))?;

        let mut body = json!({
            "model": self.model,
            "messages": Self::format_messages(messages),
        });
        if !tools.is_empty() {
            body["tools"] = json!(Self::format_tools(tools));
            body["tool_choice"] = json!("auto");
        }
        debug!("OpenAI request: {} messages, model {}", messages.len(), self.model);

        let resp = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(api_key.expose_secret())
            .json(&body)
            .send()
            .await
            .map_err(|source| ProviderError::Http { provider: PROVIDER, source })?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(ProviderError::Api {
                provider: PROVIDER,
                status: status.as_u16(),
                body,
            });
        }

        let parsed: ChatCompletionResponse = resp
            .json()
            .await
            .map_err(|source| ProviderError::Http { provider: PROVIDER, source })?;

        parsed
            .choices
            .into_iter()
            .next()
            .map(|choice| Self::into_turn(choice.message))
            .ok_or(ProviderError::EmptyResponse { provider: PROVIDER })
    }
}
