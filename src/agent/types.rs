// src/agent/types.rs

use serde::Serialize;
use serde_json::Value;

use crate::tools::{ToolCall, ToolResult};

/// One entry of the conversation sent to the tool-calling provider.
#[derive(Debug, Clone, PartialEq)]
pub enum ChatMessage {
    System(String),
    User(String),
    /// A model turn, replayed so the provider sees its own tool requests.
    Assistant {
        text: String,
        tool_calls: Vec<RequestedToolCall>,
    },
    /// The result of one requested tool call.
    Tool {
        call_id: String,
        name: String,
        result: Value,
    },
}

/// A tool call as requested by the provider, with the provider's call id.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestedToolCall {
    pub id: String,
    pub call: ToolCall,
}

/// What the provider produced in one step.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ModelTurn {
    pub text: String,
    pub tool_calls: Vec<RequestedToolCall>,
}

/// Record of a dispatched tool call, as returned to the HTTP caller.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolInvocation {
    pub tool_call_id: String,
    pub tool_name: String,
    pub args: Value,
    pub result: ToolResult,
}

/// Final artifact of one orchestration.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrchestrationResult {
    pub response: String,
    /// One entry per provider step, in order
    pub tool_results: Vec<Vec<ToolInvocation>>,
}
