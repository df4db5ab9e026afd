// src/blockchain/services/abi.rs

use crate::error::ChainError;
use ethers_core::abi::{decode, encode, ParamType, Token};
use ethers_core::types::{Address, Bytes, U256};
use ethers_core::utils::keccak256;
use std::str::FromStr;

/// `swap(uint256 amount, address tokenOut, address userWallet) returns (uint256)`
pub const SWAP_SIGNATURE: &str = "swap(uint256,address,address)";
/// `balanceOf(address) returns (uint256)`
pub const BALANCE_OF_SIGNATURE: &str = "balanceOf(address)";
/// `transfer(address,uint256) returns (bool)`
pub const TRANSFER_SIGNATURE: &str = "transfer(address,uint256)";

pub fn selector(sig: &str) -> [u8; 4] {
    let mut sel = [0u8; 4];
    sel.copy_from_slice(&keccak256(sig.as_bytes())[0..4]);
    sel
}

pub fn encode_call(sig: &str, tokens: &[Token]) -> Bytes {
    let mut out = selector(sig).to_vec();
    out.extend_from_slice(&encode(tokens));
    Bytes::from(out)
}

/// Decode a single `uint256` return value.
pub fn decode_u256(raw: &[u8]) -> Result<U256, ChainError> {
    let tokens = decode(&[ParamType::Uint(256)], raw)
        .map_err(|e| ChainError::Malformed(format!("expected uint256 return: {}", e)))?;
    match tokens.first() {
        Some(Token::Uint(n)) => Ok(*n),
        other => Err(ChainError::Malformed(format!(
            "expected uint256 return, got {:?}",
            other
        ))),
    }
}

/// Parse a 0x-prefixed hex address. Case is not checked against EIP-55.
pub fn parse_address(input: &str) -> Result<Address, ChainError> {
    Address::from_str(input.trim()).map_err(|_| ChainError::InvalidAddress(input.to_string()))
}

pub fn hex_to_bytes(s: &str) -> Result<Vec<u8>, ChainError> {
    let s = s.strip_prefix("0x").unwrap_or(s);
    hex::decode(s).map_err(|e| ChainError::Malformed(format!("invalid hex {:?}: {}", s, e)))
}

/// Parse a JSON-RPC hex quantity (`"0x1f"`).
pub fn parse_quantity(s: &str) -> Result<U256, ChainError> {
    U256::from_str_radix(s.trim_start_matches("0x"), 16)
        .map_err(|e| ChainError::Malformed(format!("invalid quantity {:?}: {}", s, e)))
}
