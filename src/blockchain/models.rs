// src/blockchain/models.rs
use ethers_core::types::{H256, U256};
use serde::{Deserialize, Serialize};
use serde_json::Value;

// --- JSON-RPC envelope returned by the node ---

#[derive(Debug, Deserialize)]
pub struct RpcResponse {
    #[serde(default)]
    pub result: Option<Value>,
    #[serde(default)]
    pub error: Option<RpcErrorObject>,
}

#[derive(Debug, Deserialize)]
pub struct RpcErrorObject {
    pub code: i64,
    pub message: String,
    #[serde(default)]
    pub data: Option<Value>,
}

// --- Results handed back to tool handlers ---

/// Outcome of a successful signed submission, merged into the tool payload
/// next to the echoed inputs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecutionResult {
    /// 0x-prefixed hash returned by `eth_sendRawTransaction`
    pub transaction_hash: String,
    /// Chain label, e.g. "Rootstock"
    pub chain: String,
    /// Base-unit integer that was encoded into the call, as a decimal string
    pub normalized_amount: String,
}

impl ExecutionResult {
    pub fn new(hash: H256, chain: &str, normalized_amount: U256) -> Self {
        Self {
            transaction_hash: format!("{:?}", hash),
            chain: chain.to_string(),
            normalized_amount: normalized_amount.to_string(),
        }
    }
}
