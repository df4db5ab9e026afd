//! # API Module
//!
//! HTTP handlers for the agent service. Everything is mounted under `/api`.
//!
//! ## Available Endpoints
//!
//! - `POST /agent/message` - Run a natural-language prompt through the agent
//! - `GET /health` - Liveness check
//! - `POST /rpc` - JSON-RPC endpoint for MCP tool calls

pub mod agent;
pub mod health;

use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};

use crate::mcp::{
    handle_mcp_request,
    protocol::{error_codes, Request, Response},
};
use crate::AppState;

/// The `/api` router, with state applied.
pub fn router(state: AppState) -> Router {
    let api_router = Router::new()
        .route("/agent/message", post(agent::agent_message_handler))
        .route("/health", get(health::health_handler))
        // JSON-RPC endpoint for MCP tool calls
        .route("/rpc", post(rpc_handler));

    Router::new().nest("/api", api_router).with_state(state)
}

// Forward JSON-RPC requests over HTTP to the MCP handler
async fn rpc_handler(State(state): State<AppState>, Json(req): Json<Request>) -> Json<Response> {
    match handle_mcp_request(req, &state.dispatcher).await {
        Some(resp) => Json(resp),
        None => Json(Response::error(
            serde_json::Value::Null,
            error_codes::INVALID_REQUEST,
            "Notifications are not supported over HTTP".into(),
        )),
    }
}
