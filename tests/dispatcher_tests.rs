//! Tool dispatcher behaviour against an in-memory chain.

mod common;

use std::sync::Arc;

use common::{dispatcher, ChainCall, FakeExecutor, SWAP_CONTRACT, WALLET_A, WALLET_B};
use ethers_core::abi::Token;
use ethers_core::types::{Address, U256};
use rootstock_agent::tools::{ToolCall, ToolResult};
use serde_json::json;

const RUSDT: &str = "0xEf213441a85DF4d7acBdAe0Cf78004E1e486BB96";
const DOC: &str = "0xe700691dA7b9851F2F35f8b8182c69c53CcaD9Db";
const RIF: &str = "0x2aCC95758f8b5F583470bA265Eb685a8f45fC9D5";

fn addr(s: &str) -> Address {
    s.parse().unwrap()
}

#[tokio::test]
async fn swap_without_destination_is_an_error_and_never_reaches_the_chain() {
    let executor = Arc::new(FakeExecutor::default());
    let result = dispatcher(executor.clone())
        .dispatch(ToolCall::new(
            "swap_tokens",
            json!({"fromToken": "DOC", "amount": "5", "walletAddress": WALLET_A}),
        ))
        .await;

    match result {
        ToolResult::Err { error, details } => {
            assert_eq!(error, "Failed to swap tokens: toToken is required");
            assert!(details.is_some());
        }
        other => panic!("expected an error, got {:?}", other),
    }
    assert!(executor.calls().is_empty());
}

#[tokio::test]
async fn swap_scales_by_six_decimals_and_targets_the_swap_contract() {
    let executor = Arc::new(FakeExecutor::default());
    let result = dispatcher(executor.clone())
        .dispatch(ToolCall::new(
            "swap_tokens",
            json!({"fromToken": "doc", "amount": "5", "toToken": "RIF", "walletAddress": WALLET_A}),
        ))
        .await;

    assert_eq!(
        executor.calls(),
        vec![ChainCall::Write {
            contract: addr(SWAP_CONTRACT),
            signature: "swap(uint256,address,address)".into(),
            args: vec![
                Token::Uint(U256::from(5_000_000u64)),
                Token::Address(addr(RIF)),
                Token::Address(addr(WALLET_A)),
            ],
        }]
    );

    let payload = match result {
        ToolResult::Ok(payload) => payload,
        other => panic!("expected success, got {:?}", other),
    };
    assert_eq!(payload["tokenName"], "doc");
    assert_eq!(payload["tokenAddress"], DOC);
    assert_eq!(payload["toToken"], "RIF");
    assert_eq!(payload["toTokenAddress"], RIF);
    assert_eq!(payload["amount"], "5");
    assert_eq!(payload["walletAddress"], WALLET_A);
    assert_eq!(payload["normalizedAmount"], "5000000");
    assert_eq!(payload["chain"], "Rootstock");
    assert_eq!(payload["transactionHash"], format!("0x{}", "ab".repeat(32)));
}

#[tokio::test]
async fn transfer_of_two_rusdt_sends_two_million_base_units() {
    let executor = Arc::new(FakeExecutor::default());
    let result = dispatcher(executor.clone())
        .dispatch(ToolCall::new(
            "transfer_token",
            json!({"tokenName": "RUSDT", "amount": 2, "fromWallet": WALLET_A, "toWallet": WALLET_B}),
        ))
        .await;

    assert!(result.is_ok(), "{:?}", result);
    assert_eq!(
        executor.calls(),
        vec![ChainCall::Write {
            contract: addr(RUSDT),
            signature: "transfer(address,uint256)".into(),
            args: vec![
                Token::Address(addr(WALLET_B)),
                Token::Uint(U256::from(2_000_000u64)),
            ],
        }]
    );
    let payload = result.to_value();
    assert_eq!(payload["fromWallet"], WALLET_A);
    assert_eq!(payload["toWallet"], WALLET_B);
    assert_eq!(payload["amount"], "2");
    assert_eq!(payload["normalizedAmount"], "2000000");
}

#[tokio::test]
async fn transfer_of_a_tiny_amount_is_clamped_to_one_unit() {
    let executor = Arc::new(FakeExecutor::default());
    let result = dispatcher(executor.clone())
        .dispatch(ToolCall::new(
            "transfer_token",
            json!({"tokenName": "RUSDT", "amount": "0.0000001", "fromWallet": WALLET_A, "toWallet": WALLET_B}),
        ))
        .await;

    assert_eq!(result.to_value()["normalizedAmount"], "1");
}

#[tokio::test]
async fn transfer_accepts_json_number_amounts_in_exponent_form() {
    let executor = Arc::new(FakeExecutor::default());
    let result = dispatcher(executor.clone())
        .dispatch(ToolCall::new(
            "transfer_token",
            json!({"tokenName": "RUSDT", "amount": 0.0000001, "fromWallet": WALLET_A, "toWallet": WALLET_B}),
        ))
        .await;

    assert!(result.is_ok(), "{:?}", result);
    assert_eq!(result.to_value()["normalizedAmount"], "1");
    match &executor.calls()[..] {
        [ChainCall::Write { args, .. }] => assert_eq!(args[1], Token::Uint(U256::one())),
        other => panic!("expected one write call, got {:?}", other),
    }
}

#[tokio::test]
async fn balance_of_unknown_token() {
    let executor = Arc::new(FakeExecutor::default());
    let result = dispatcher(executor.clone())
        .dispatch(ToolCall::new(
            "check_token_balance",
            json!({"tokenName": "XYZ", "walletAddress": WALLET_A}),
        ))
        .await;

    assert_eq!(
        result,
        ToolResult::err("Failed to check token balance: Unknown token: XYZ", None)
    );
    assert!(executor.calls().is_empty());
}

#[tokio::test]
async fn balance_is_formatted_with_token_decimals() {
    let executor = Arc::new(FakeExecutor {
        balance: U256::from(1_250_000u64),
        ..FakeExecutor::default()
    });
    let result = dispatcher(executor.clone())
        .dispatch(ToolCall::new(
            "check_token_balance",
            json!({"tokenName": "rusdt", "walletAddress": WALLET_A}),
        ))
        .await;

    assert_eq!(
        result.to_value(),
        json!({
            "tokenName": "rusdt",
            "tokenAddress": RUSDT,
            "walletAddress": WALLET_A,
            "balance": "1.25",
            "rawBalance": "1250000"
        })
    );
    assert_eq!(
        executor.calls(),
        vec![ChainCall::Read {
            contract: addr(RUSDT),
            signature: "balanceOf(address)".into(),
            args: vec![Token::Address(addr(WALLET_A))],
        }]
    );
}

#[tokio::test]
async fn chain_failures_keep_the_node_message() {
    let executor = Arc::new(FakeExecutor::failing("insufficient funds for gas * price + value"));
    let result = dispatcher(executor)
        .dispatch(ToolCall::new(
            "transfer_token",
            json!({"tokenName": "DOC", "amount": "1", "fromWallet": WALLET_A, "toWallet": WALLET_B}),
        ))
        .await;

    assert_eq!(
        result.to_value(),
        json!({
            "success": false,
            "error": "Failed to transfer tokens: RPC error: insufficient funds for gas * price + value",
            "details": "The token transfer could not be completed. Please check your wallet has sufficient balance and try again."
        })
    );
}

#[tokio::test]
async fn invalid_recipient_address_is_reported() {
    let executor = Arc::new(FakeExecutor::default());
    let result = dispatcher(executor.clone())
        .dispatch(ToolCall::new(
            "transfer_token",
            json!({"tokenName": "DOC", "amount": "1", "fromWallet": WALLET_A, "toWallet": "B"}),
        ))
        .await;

    assert_eq!(
        result.to_value()["error"],
        "Failed to transfer tokens: Invalid address: B"
    );
    assert!(executor.calls().is_empty());
}

#[tokio::test]
async fn token_address_lookup_hit_and_miss() {
    let d = dispatcher(Arc::new(FakeExecutor::default()));

    let hit = d
        .dispatch(ToolCall::new("get_token_address", json!({"tokenName": "Sov"})))
        .await;
    assert_eq!(
        hit.to_value(),
        json!({"tokenName": "Sov", "address": "0xEFc78fc7d48b64958315949279Ba181c2114ABBd", "found": true})
    );

    let miss = d
        .dispatch(ToolCall::new("get_token_address", json!({"tokenName": "XYZ"})))
        .await;
    assert_eq!(
        miss.to_value(),
        json!({"tokenName": "XYZ", "address": "Token not found", "found": false})
    );
}

#[tokio::test]
async fn malformed_calls_are_errors_not_panics() {
    let d = dispatcher(Arc::new(FakeExecutor::default()));

    let unknown = d.dispatch(ToolCall::new("get_price", json!({}))).await;
    assert_eq!(unknown, ToolResult::err("Invalid tool call: Unknown tool: get_price", None));

    let bad_amount = d
        .dispatch(ToolCall::new(
            "transfer_token",
            json!({"tokenName": "DOC", "amount": "-1", "fromWallet": WALLET_A, "toWallet": WALLET_B}),
        ))
        .await;
    assert_eq!(
        bad_amount.to_value()["error"],
        "Failed to transfer tokens: Invalid amount. Must be a positive number."
    );

    let not_json = d
        .dispatch(ToolCall::new("check_token_balance", json!("{oops")))
        .await;
    match not_json {
        ToolResult::Err { error, .. } => assert!(error.starts_with("Invalid tool call: "), "{}", error),
        other => panic!("expected an error, got {:?}", other),
    }
}
