// src/blockchain/mod.rs

pub mod amount;
pub mod client;
pub mod evm_client;
pub mod models;
pub mod nonce_manager;
pub mod services;
pub mod tokens;

pub use client::{ChainConfig, ChainExecutor};
pub use evm_client::EvmExecutor;
pub use tokens::{Token, TokenDescriptor};

// Re-export commonly used types
pub use ethers::types::{Address, Bytes, H256, U256};
