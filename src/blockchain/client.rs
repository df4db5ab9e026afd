//! Chain execution seam.
//!
//! Tool handlers talk to the network only through [`ChainExecutor`], which
//! has two modes: read-only `eth_call` queries and signed, state-changing
//! submissions. [`EvmExecutor`](super::evm_client::EvmExecutor) is the
//! JSON-RPC implementation used by the server.

use async_trait::async_trait;
use ethers_core::abi::Token;
use ethers_core::types::{Address, Bytes, H256};
use ethers_signers::LocalWallet;

use crate::error::ChainError;

/// Everything the executor needs, built once at startup from [`Config`](crate::config::Config).
#[derive(Clone, Debug)]
pub struct ChainConfig {
    /// The single JSON-RPC endpoint all calls go to
    pub rpc_url: String,
    /// Process-wide signing key. `None` makes every write call fail.
    pub signer: Option<LocalWallet>,
}

#[async_trait]
pub trait ChainExecutor: Send + Sync {
    /// Run a view function and return the raw ABI-encoded return data.
    ///
    /// Idempotent and safe to retry.
    async fn read_call(
        &self,
        contract: Address,
        signature: &str,
        args: Vec<Token>,
    ) -> Result<Bytes, ChainError>;

    /// Sign and broadcast a call, returning the transaction hash as soon as the
    /// node accepts it.
    ///
    /// Not idempotent and never retried here: every successful call is a
    /// separate on-chain transaction.
    async fn write_call(
        &self,
        contract: Address,
        signature: &str,
        args: Vec<Token>,
    ) -> Result<H256, ChainError>;
}
