// src/tools/handlers.rs

use ethers_core::abi::Token;
use serde::Serialize;
use serde_json::Value;

use super::intent::TransactionIntent;
use super::{ToolDispatcher, ToolName};
use crate::blockchain::amount::format_units;
use crate::blockchain::models::ExecutionResult;
use crate::blockchain::services::abi::{
    decode_u256, parse_address, BALANCE_OF_SIGNATURE, SWAP_SIGNATURE, TRANSFER_SIGNATURE,
};
use crate::error::{ToolError, ValidationError};

const TOKEN_NOT_FOUND: &str = "Token not found";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SwapOutput {
    token_name: String,
    token_address: &'static str,
    amount: String,
    wallet_address: String,
    to_token: String,
    to_token_address: &'static str,
    #[serde(flatten)]
    execution: ExecutionResult,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct AddressLookupOutput {
    token_name: String,
    address: &'static str,
    found: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct BalanceOutput {
    token_name: String,
    token_address: &'static str,
    wallet_address: String,
    balance: String,
    raw_balance: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct TransferOutput {
    token_name: String,
    token_address: &'static str,
    amount: String,
    from_wallet: String,
    to_wallet: String,
    #[serde(flatten)]
    execution: ExecutionResult,
}

fn to_payload<T: Serialize>(output: T) -> Result<Value, ToolError> {
    serde_json::to_value(output)
        .map_err(|e| ValidationError::InvalidArguments(format!("unserializable result: {}", e)).into())
}

impl ToolDispatcher {
    pub(super) async fn run(&self, tool: ToolName, args: Value) -> Result<Value, ToolError> {
        match TransactionIntent::from_call(tool, args)? {
            TransactionIntent::Swap {
                from_input,
                from,
                to_input,
                to,
                amount_input,
                amount,
                wallet,
            } => {
                let token_out = parse_address(to.address)?;
                let user_wallet = parse_address(&wallet)?;
                let hash = self
                    .executor
                    .write_call(
                        self.swap_contract,
                        SWAP_SIGNATURE,
                        vec![Token::Uint(amount), Token::Address(token_out), Token::Address(user_wallet)],
                    )
                    .await?;
                to_payload(SwapOutput {
                    token_name: from_input,
                    token_address: from.address,
                    amount: amount_input,
                    wallet_address: wallet,
                    to_token: to_input,
                    to_token_address: to.address,
                    execution: ExecutionResult::new(hash, &self.chain_name, amount),
                })
            }
            TransactionIntent::AddressLookup { token_input, token } => to_payload(AddressLookupOutput {
                token_name: token_input,
                address: token.map_or(TOKEN_NOT_FOUND, |t| t.address),
                found: token.is_some(),
            }),
            TransactionIntent::BalanceQuery {
                token_input,
                token,
                wallet,
            } => {
                let contract = parse_address(token.address)?;
                let owner = parse_address(&wallet)?;
                let raw = self
                    .executor
                    .read_call(contract, BALANCE_OF_SIGNATURE, vec![Token::Address(owner)])
                    .await?;
                let balance = decode_u256(&raw)?;
                to_payload(BalanceOutput {
                    token_name: token_input,
                    token_address: token.address,
                    wallet_address: wallet,
                    balance: format_units(balance, token.token.balance_decimals()),
                    raw_balance: balance.to_string(),
                })
            }
            TransactionIntent::Transfer {
                token_input,
                token,
                amount_input,
                amount,
                from_wallet,
                to_wallet,
            } => {
                let contract = parse_address(token.address)?;
                let recipient = parse_address(&to_wallet)?;
                // the process signing key pays; fromWallet is only echoed back
                let hash = self
                    .executor
                    .write_call(
                        contract,
                        TRANSFER_SIGNATURE,
                        vec![Token::Address(recipient), Token::Uint(amount)],
                    )
                    .await?;
                to_payload(TransferOutput {
                    token_name: token_input,
                    token_address: token.address,
                    amount: amount_input,
                    from_wallet,
                    to_wallet,
                    execution: ExecutionResult::new(hash, &self.chain_name, amount),
                })
            }
        }
    }
}
