// src/tools/schema.rs

use serde::Serialize;
use serde_json::{json, Value};

use super::ToolName;

/// Name, description and JSON-Schema parameter shape of one tool.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolSchema {
    pub name: &'static str,
    pub description: String,
    #[serde(rename = "inputSchema")]
    pub parameters: Value,
}

pub fn tool_schemas(chain_name: &str) -> Vec<ToolSchema> {
    ToolName::ALL
        .into_iter()
        .map(|tool| schema_for(tool, chain_name))
        .collect()
}

fn schema_for(tool: ToolName, chain_name: &str) -> ToolSchema {
    let (description, parameters) = match tool {
        ToolName::SwapTokens => (
            format!("Swap one token for another on {}", chain_name),
            json!({
                "type": "object",
                "properties": {
                    "fromToken": {"type": "string", "description": "The token to swap from"},
                    "amount": {"type": "string", "description": "The amount to swap"},
                    "toToken": {"type": "string", "description": "The token to swap to"},
                    "walletAddress": {"type": "string", "description": "The wallet address to use for the swap"}
                },
                "required": ["fromToken", "amount", "walletAddress"],
                "additionalProperties": false
            }),
        ),
        ToolName::GetTokenAddress => (
            format!("Get the address for a given token name on {}", chain_name),
            json!({
                "type": "object",
                "properties": {
                    "tokenName": {"type": "string", "description": "The name of the token"}
                },
                "required": ["tokenName"],
                "additionalProperties": false
            }),
        ),
        ToolName::CheckTokenBalance => (
            format!("Check the balance of a token for a given wallet on {}", chain_name),
            json!({
                "type": "object",
                "properties": {
                    "tokenName": {"type": "string", "description": "The name of the token to check"},
                    "walletAddress": {"type": "string", "description": "The wallet address to check the balance for"}
                },
                "required": ["tokenName", "walletAddress"],
                "additionalProperties": false
            }),
        ),
        ToolName::TransferToken => (
            format!("Transfer tokens from one wallet to another on {}", chain_name),
            json!({
                "type": "object",
                "properties": {
                    "tokenName": {"type": "string", "description": "The name of the token to transfer"},
                    "amount": {"type": "string", "description": "The amount to transfer"},
                    "fromWallet": {"type": "string", "description": "The wallet address to transfer from"},
                    "toWallet": {"type": "string", "description": "The wallet address to transfer to"}
                },
                "required": ["tokenName", "amount", "fromWallet", "toWallet"],
                "additionalProperties": false
            }),
        ),
    };

    ToolSchema {
        name: tool.as_str(),
        description,
        parameters,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_one_schema_per_tool() {
        let schemas = tool_schemas("Rootstock");
        let names: Vec<&str> = schemas.iter().map(|s| s.name).collect();
        assert_eq!(
            names,
            vec!["swap_tokens", "get_token_address", "check_token_balance", "transfer_token"]
        );
    }

    #[test]
    fn test_swap_destination_is_optional() {
        let schemas = tool_schemas("Rootstock");
        let swap = &schemas[0];
        let required = swap.parameters["required"].as_array().unwrap();
        assert!(!required.iter().any(|r| r == "toToken"));
        assert!(swap.parameters["properties"]["toToken"].is_object());
        assert_eq!(swap.description, "Swap one token for another on Rootstock");
    }
}
