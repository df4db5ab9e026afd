//! # Tool Dispatcher
//!
//! The fixed set of operations a model may invoke, and the single entry point
//! ([`ToolDispatcher::dispatch`]) that runs them.
//!
//! ## Supported Tools
//!
//! - `swap_tokens` - Swap one registry token for another through the swap contract
//! - `get_token_address` - Look up a token's contract address
//! - `check_token_balance` - Read a wallet's token balance
//! - `transfer_token` - Transfer tokens from the agent's signing wallet
//!
//! Every call yields exactly one [`ToolResult`]. Handler failures of any kind
//! are turned into [`ToolResult::Err`] here and never reach the caller as
//! errors, so the model can read them and decide what to do next.

pub mod handlers;
pub mod intent;
pub mod schema;

use std::fmt;
use std::sync::Arc;

use ethers_core::types::Address;
use serde::ser::{Serialize, SerializeMap, Serializer};
use serde_json::Value;
use tracing::{error, info, warn};

use crate::blockchain::ChainExecutor;
use crate::error::{ToolError, ValidationError};
pub use schema::ToolSchema;

const SWAP_FAILURE_DETAILS: &str = "The token swap transaction could not be completed. Please try again with a larger amount or different token pair.";
const TRANSFER_FAILURE_DETAILS: &str = "The token transfer could not be completed. Please check your wallet has sufficient balance and try again.";

/// The operations exposed to models.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolName {
    SwapTokens,
    GetTokenAddress,
    CheckTokenBalance,
    TransferToken,
}

impl ToolName {
    pub const ALL: [ToolName; 4] = [
        ToolName::SwapTokens,
        ToolName::GetTokenAddress,
        ToolName::CheckTokenBalance,
        ToolName::TransferToken,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ToolName::SwapTokens => "swap_tokens",
            ToolName::GetTokenAddress => "get_token_address",
            ToolName::CheckTokenBalance => "check_token_balance",
            ToolName::TransferToken => "transfer_token",
        }
    }

    pub fn from_name(name: &str) -> Option<ToolName> {
        Self::ALL.into_iter().find(|tool| tool.as_str() == name)
    }

    /// Shape a handler error into the result the model sees.
    fn failure(self, err: &ToolError) -> ToolResult {
        if let ToolError::Validation(
            ValidationError::InvalidArguments(_) | ValidationError::UnknownTool(_),
        ) = err
        {
            return ToolResult::err(format!("Invalid tool call: {}", err), None);
        }
        match self {
            ToolName::SwapTokens => ToolResult::err(
                format!("Failed to swap tokens: {}", err),
                Some(SWAP_FAILURE_DETAILS),
            ),
            ToolName::CheckTokenBalance => {
                ToolResult::err(format!("Failed to check token balance: {}", err), None)
            }
            ToolName::TransferToken => ToolResult::err(
                format!("Failed to transfer tokens: {}", err),
                Some(TRANSFER_FAILURE_DETAILS),
            ),
            ToolName::GetTokenAddress => {
                ToolResult::err(format!("Failed to look up token address: {}", err), None)
            }
        }
    }
}

impl fmt::Display for ToolName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A model-requested invocation. Consumed by [`ToolDispatcher::dispatch`].
#[derive(Debug, Clone, PartialEq)]
pub struct ToolCall {
    pub name: String,
    pub arguments: Value,
}

impl ToolCall {
    pub fn new(name: impl Into<String>, arguments: Value) -> Self {
        Self {
            name: name.into(),
            arguments,
        }
    }
}

/// Outcome of one tool invocation.
///
/// Serializes to the payload itself on success and to
/// `{"success": false, "error": ..., "details": ...}` on failure.
#[derive(Debug, Clone, PartialEq)]
pub enum ToolResult {
    Ok(Value),
    Err {
        error: String,
        details: Option<String>,
    },
}

impl ToolResult {
    pub fn err(error: impl Into<String>, details: Option<&str>) -> Self {
        ToolResult::Err {
            error: error.into(),
            details: details.map(str::to_string),
        }
    }

    pub fn is_ok(&self) -> bool {
        matches!(self, ToolResult::Ok(_))
    }

    pub fn to_value(&self) -> Value {
        match self {
            ToolResult::Ok(payload) => payload.clone(),
            ToolResult::Err { error, details } => {
                let mut map = serde_json::Map::new();
                map.insert("success".into(), Value::Bool(false));
                map.insert("error".into(), Value::String(error.clone()));
                if let Some(details) = details {
                    map.insert("details".into(), Value::String(details.clone()));
                }
                Value::Object(map)
            }
        }
    }
}

impl Serialize for ToolResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            ToolResult::Ok(payload) => payload.serialize(serializer),
            ToolResult::Err { error, details } => {
                let mut map = serializer.serialize_map(None)?;
                map.serialize_entry("success", &false)?;
                map.serialize_entry("error", error)?;
                if let Some(details) = details {
                    map.serialize_entry("details", details)?;
                }
                map.end()
            }
        }
    }
}

/// Routes [`ToolCall`]s to their handlers.
pub struct ToolDispatcher {
    executor: Arc<dyn ChainExecutor>,
    swap_contract: Address,
    chain_name: String,
    schemas: Vec<ToolSchema>,
}

impl ToolDispatcher {
    pub fn new(executor: Arc<dyn ChainExecutor>, swap_contract: Address, chain_name: &str) -> Self {
        Self {
            executor,
            swap_contract,
            chain_name: chain_name.to_string(),
            schemas: schema::tool_schemas(chain_name),
        }
    }

    pub fn schemas(&self) -> &[ToolSchema] {
        &self.schemas
    }

    pub fn chain_name(&self) -> &str {
        &self.chain_name
    }

    /// Run one tool call to completion. Never fails: errors come back as
    /// [`ToolResult::Err`].
    pub async fn dispatch(&self, call: ToolCall) -> ToolResult {
        let ToolCall { name, arguments } = call;
        let Some(tool) = ToolName::from_name(&name) else {
            warn!("Model requested unknown tool '{}'", name);
            return ToolResult::err(
                format!("Invalid tool call: {}", ValidationError::UnknownTool(name)),
                None,
            );
        };

        info!("Dispatching {} with {}", tool, arguments);
        match self.run(tool, arguments).await {
            Ok(payload) => ToolResult::Ok(payload),
            Err(e) => {
                error!("Error in {}: {}", tool, e);
                tool.failure(&e)
            }
        }
    }
}
