//! # MCP Handler Module
//!
//! Implements the Model Context Protocol over JSON-RPC for the tool
//! dispatcher, so the same four tools the agent uses can be driven directly by
//! an MCP client.
//!
//! ## Methods
//!
//! - `initialize` - Server info and capabilities
//! - `tools/list` - The tool schemas
//! - `tools/call` - Run one tool
//! - `swap_tokens`, `get_token_address`, `check_token_balance`,
//!   `transfer_token` - Direct aliases for `tools/call`

use serde_json::{json, Value};
use tracing::info;

use crate::mcp::protocol::{error_codes, Request, Response};
use crate::tools::{ToolCall, ToolDispatcher, ToolName, ToolResult};

// Helper: produce a result Value that always contains a text content array
// and preserves structured data for JSON-friendly clients.
fn make_texty_result(text: String, payload: Value) -> Value {
    let content = json!([{ "type": "text", "text": text }]);
    match payload {
        Value::Object(mut map) => {
            // Do not overwrite if caller already set content
            if !map.contains_key("content") {
                map.insert("content".into(), content);
            }
            Value::Object(map)
        }
        other => json!({
            "data": other,
            "content": content
        }),
    }
}

fn summarize(tool: &str, result: &ToolResult) -> String {
    match result {
        ToolResult::Err { error, .. } => error.clone(),
        ToolResult::Ok(payload) => match tool {
            "check_token_balance" => format!(
                "{} balance of {}: {}",
                payload["tokenName"].as_str().unwrap_or_default(),
                payload["walletAddress"].as_str().unwrap_or_default(),
                payload["balance"].as_str().unwrap_or_default()
            ),
            "get_token_address" if payload["found"] == json!(true) => format!(
                "{} address: {}",
                payload["tokenName"].as_str().unwrap_or_default(),
                payload["address"].as_str().unwrap_or_default()
            ),
            "get_token_address" => format!(
                "Token not found: {}",
                payload["tokenName"].as_str().unwrap_or_default()
            ),
            _ => format!(
                "Transaction submitted: {}",
                payload["transactionHash"].as_str().unwrap_or_default()
            ),
        },
    }
}

/// This is the main dispatcher for all incoming MCP requests.
pub async fn handle_mcp_request(req: Request, dispatcher: &ToolDispatcher) -> Option<Response> {
    info!("Handling MCP request for method: {}", req.method);

    if req.is_notification() {
        return None;
    }

    let response = match req.method.as_str() {
        "initialize" => handle_initialize(&req, dispatcher),
        "tools/list" => handle_tools_list(&req, dispatcher),
        "tools/call" => handle_tool_call(req, dispatcher).await,
        // Direct method calls are rewritten into tools/call to reuse the same logic
        method if ToolName::from_name(method).is_some() => {
            let wrapped = req.redirect(
                "tools/call",
                json!({
                    "name": method,
                    "arguments": req.params.clone().unwrap_or_else(|| json!({}))
                }),
            );
            handle_tool_call(wrapped, dispatcher).await
        }
        _ => Response::error(
            req.id,
            error_codes::METHOD_NOT_FOUND,
            format!("Method not found: {}", req.method),
        ),
    };

    Some(response)
}

/// Handles a 'tools/call' request. Tool failures are returned as results
/// flagged with `isError`, not as JSON-RPC errors.
async fn handle_tool_call(req: Request, dispatcher: &ToolDispatcher) -> Response {
    let Some(params) = req.params.as_ref() else {
        return Response::error(
            req.id,
            error_codes::INVALID_PARAMS,
            "Missing 'params' object".into(),
        );
    };

    let Some(tool_name) = params.get("name").and_then(|n| n.as_str()) else {
        return Response::error(
            req.id,
            error_codes::INVALID_PARAMS,
            "Missing 'name' field in params".into(),
        );
    };

    if ToolName::from_name(tool_name).is_none() {
        return Response::error(
            req.id,
            error_codes::METHOD_NOT_FOUND,
            format!("Unknown tool: {}", tool_name),
        );
    }

    let args = params.get("arguments").cloned().unwrap_or_else(|| json!({}));
    let result = dispatcher
        .dispatch(ToolCall::new(tool_name, args))
        .await;

    let text = summarize(tool_name, &result);
    let mut body = make_texty_result(text, result.to_value());
    if !result.is_ok() {
        body["isError"] = Value::Bool(true);
    }
    Response::success(req.id, body)
}

fn handle_initialize(req: &Request, dispatcher: &ToolDispatcher) -> Response {
    let server_info = json!({
        "name": "rootstock_agent",
        "version": env!("CARGO_PKG_VERSION")
    });
    let capabilities = json!({ "tools": { "listChanged": false } });
    let instructions = format!(
        "{} token agent: swap tokens, check balances, look up token addresses and transfer tokens.",
        dispatcher.chain_name()
    );

    Response::success(
        req.id.clone(),
        json!({
            "serverInfo": server_info,
            "protocolVersion": "2025-06-18",
            "capabilities": capabilities,
            "instructions": instructions
        }),
    )
}

/// Handles the 'tools/list' request by returning the dispatcher's schemas.
fn handle_tools_list(req: &Request, dispatcher: &ToolDispatcher) -> Response {
    Response::success(req.id.clone(), json!({ "tools": dispatcher.schemas() }))
}
