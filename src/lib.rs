// src/lib.rs

use std::sync::Arc;

// Re-export modules
pub mod agent;
pub mod api;
pub mod blockchain;
pub mod config;
pub mod error;
pub mod mcp;
pub mod tools;
pub mod utils;

/// Application state shared across all request handlers
#[derive(Clone)]
pub struct AppState {
    /// Application configuration
    pub config: Arc<config::Config>,
    /// Runs tool calls for the MCP surface and the orchestrator
    pub dispatcher: Arc<tools::ToolDispatcher>,
    /// Answers `/agent/message` prompts
    pub orchestrator: Arc<agent::Orchestrator>,
}
