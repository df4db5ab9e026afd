//! Model orchestration: prompt composition, provider clients and the bounded
//! tool-calling loop.

pub mod orchestrator;
pub mod prompt;
pub mod providers;
pub mod types;

pub use orchestrator::{Orchestrator, MAX_TOOL_STEPS};
pub use types::{ChatMessage, ModelTurn, OrchestrationResult, RequestedToolCall, ToolInvocation};
