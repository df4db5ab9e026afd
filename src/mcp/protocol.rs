// src/mcp/protocol.rs
// JSON-RPC 2.0 envelopes for the MCP surface.

use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const JSONRPC_VERSION: &str = "2.0";

#[derive(Debug, Serialize, Deserialize)]
pub struct Request {
    #[serde(default = "default_jsonrpc")]
    pub jsonrpc: String,
    /// Absent or null for notifications
    #[serde(default)]
    pub id: Value,
    pub method: String,
    #[serde(default)]
    pub params: Option<Value>,
}

fn default_jsonrpc() -> String {
    JSONRPC_VERSION.to_string()
}

impl Request {
    pub fn is_notification(&self) -> bool {
        self.id.is_null()
    }

    /// The same request retargeted at another method with new params.
    pub fn redirect(&self, method: &str, params: Value) -> Request {
        Request {
            jsonrpc: self.jsonrpc.clone(),
            id: self.id.clone(),
            method: method.to_string(),
            params: Some(params),
        }
    }
}

/// Exactly one of `result` or `error`, flattened into the response object.
#[derive(Debug, Serialize, Deserialize)]
pub enum Outcome {
    #[serde(rename = "result")]
    Result(Value),
    #[serde(rename = "error")]
    Error(ErrorObject),
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Response {
    pub jsonrpc: String,
    pub id: Value,
    #[serde(flatten)]
    pub outcome: Outcome,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorObject {
    pub code: i32,
    pub message: String,
}

impl Response {
    pub fn success(id: Value, result: Value) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION.to_string(),
            id,
            outcome: Outcome::Result(result),
        }
    }

    pub fn error(id: Value, code: i32, message: String) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION.to_string(),
            id,
            outcome: Outcome::Error(ErrorObject { code, message }),
        }
    }

    pub fn result(&self) -> Option<&Value> {
        match &self.outcome {
            Outcome::Result(value) => Some(value),
            Outcome::Error(_) => None,
        }
    }

    pub fn error_object(&self) -> Option<&ErrorObject> {
        match &self.outcome {
            Outcome::Error(err) => Some(err),
            Outcome::Result(_) => None,
        }
    }
}

// Standard JSON-RPC error codes
pub mod error_codes {
    pub const PARSE_ERROR: i32 = -32700;
    pub const INVALID_REQUEST: i32 = -32600;
    pub const METHOD_NOT_FOUND: i32 = -32601;
    pub const INVALID_PARAMS: i32 = -32602;
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_response_carries_exactly_one_outcome() {
        let ok = serde_json::to_value(Response::success(json!(1), json!({"tools": []}))).unwrap();
        assert_eq!(ok, json!({"jsonrpc": "2.0", "id": 1, "result": {"tools": []}}));

        let err = serde_json::to_value(Response::error(json!("a"), error_codes::INVALID_PARAMS, "bad".into()))
            .unwrap();
        assert_eq!(
            err,
            json!({"jsonrpc": "2.0", "id": "a", "error": {"code": -32602, "message": "bad"}})
        );
    }

    #[test]
    fn test_request_defaults() {
        let req: Request = serde_json::from_str(r#"{"method": "tools/list"}"#).unwrap();
        assert_eq!(req.jsonrpc, "2.0");
        assert!(req.is_notification());
        assert!(req.params.is_none());

        let redirected = req.redirect("tools/call", json!({"name": "x"}));
        assert_eq!(redirected.method, "tools/call");
        assert_eq!(redirected.params, Some(json!({"name": "x"})));
    }
}
