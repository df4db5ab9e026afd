// src/tools/intent.rs

use ethers_core::types::U256;
use serde::Deserialize;
use serde_json::Value;

use super::ToolName;
use crate::blockchain::{amount, tokens, TokenDescriptor};
use crate::error::ValidationError;
use crate::utils::{amount_text, parse_arguments};

/// Swap amounts are always scaled by 6 decimals, whatever the tokens involved.
pub const SWAP_AMOUNT_DECIMALS: u32 = 6;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SwapTokensParams {
    from_token: String,
    #[serde(deserialize_with = "amount_text")]
    amount: String,
    #[serde(default)]
    to_token: Option<String>,
    wallet_address: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GetTokenAddressParams {
    token_name: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CheckTokenBalanceParams {
    token_name: String,
    wallet_address: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TransferTokenParams {
    token_name: String,
    #[serde(deserialize_with = "amount_text")]
    amount: String,
    from_wallet: String,
    to_wallet: String,
}

/// A tool call whose tokens are resolved and whose amount is normalized.
///
/// Raw user strings are kept alongside the resolved values so results can
/// echo exactly what was asked for.
#[derive(Debug, Clone, PartialEq)]
pub enum TransactionIntent {
    Swap {
        from_input: String,
        from: &'static TokenDescriptor,
        to_input: String,
        to: &'static TokenDescriptor,
        amount_input: String,
        amount: U256,
        wallet: String,
    },
    Transfer {
        token_input: String,
        token: &'static TokenDescriptor,
        amount_input: String,
        amount: U256,
        from_wallet: String,
        to_wallet: String,
    },
    BalanceQuery {
        token_input: String,
        token: &'static TokenDescriptor,
        wallet: String,
    },
    AddressLookup {
        token_input: String,
        token: Option<&'static TokenDescriptor>,
    },
}

fn resolve(input: &str) -> Result<&'static TokenDescriptor, ValidationError> {
    tokens::resolve(input).ok_or_else(|| ValidationError::UnknownToken(input.to_string()))
}

impl TransactionIntent {
    /// Parse and validate a tool's arguments. Nothing here touches the chain.
    pub fn from_call(tool: ToolName, args: Value) -> Result<Self, ValidationError> {
        match tool {
            ToolName::SwapTokens => {
                let p: SwapTokensParams = parse_arguments(args)?;
                let to_input = p
                    .to_token
                    .filter(|t| !t.trim().is_empty())
                    .ok_or(ValidationError::MissingDestinationToken)?;
                let from = resolve(&p.from_token)?;
                let to = resolve(&to_input)?;
                let amount = amount::normalize(&p.amount, SWAP_AMOUNT_DECIMALS)?;
                Ok(TransactionIntent::Swap {
                    from_input: p.from_token,
                    from,
                    to_input,
                    to,
                    amount_input: p.amount,
                    amount,
                    wallet: p.wallet_address,
                })
            }
            ToolName::GetTokenAddress => {
                let p: GetTokenAddressParams = parse_arguments(args)?;
                Ok(TransactionIntent::AddressLookup {
                    token: tokens::resolve(&p.token_name),
                    token_input: p.token_name,
                })
            }
            ToolName::CheckTokenBalance => {
                let p: CheckTokenBalanceParams = parse_arguments(args)?;
                let token = resolve(&p.token_name)?;
                Ok(TransactionIntent::BalanceQuery {
                    token_input: p.token_name,
                    token,
                    wallet: p.wallet_address,
                })
            }
            ToolName::TransferToken => {
                let p: TransferTokenParams = parse_arguments(args)?;
                let token = resolve(&p.token_name)?;
                let amount = amount::normalize(&p.amount, token.token.balance_decimals())?;
                Ok(TransactionIntent::Transfer {
                    token_input: p.token_name,
                    token,
                    amount_input: p.amount,
                    amount,
                    from_wallet: p.from_wallet,
                    to_wallet: p.to_wallet,
                })
            }
        }
    }
}
