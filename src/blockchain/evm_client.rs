// src/blockchain/evm_client.rs

use crate::blockchain::{
    client::{ChainConfig, ChainExecutor},
    models::RpcResponse,
    nonce_manager::{NonceManager, NonceSlot},
    services::abi::{encode_call, hex_to_bytes, parse_quantity},
};
use crate::error::{ChainError, ConfigError};
use async_trait::async_trait;
use ethers_core::abi::Token;
use ethers_core::types::{
    transaction::eip2718::TypedTransaction, Address, Bytes, TransactionRequest, H256, U256,
};
use ethers_signers::{LocalWallet, Signer};
use reqwest::Client;
use serde_json::{json, Value};
use std::str::FromStr;
use std::sync::Arc;
use tokio::sync::OnceCell;
use tracing::{debug, info, warn};

/// JSON-RPC backed [`ChainExecutor`] bound to one endpoint and one signing key.
#[derive(Clone)]
pub struct EvmExecutor {
    http: Client,
    rpc_url: String,
    signer: Option<LocalWallet>,
    nonce_manager: NonceManager,
    chain_id: Arc<OnceCell<u64>>,
}

impl EvmExecutor {
    pub fn new(config: ChainConfig) -> Self {
        Self {
            http: Client::new(),
            rpc_url: config.rpc_url,
            signer: config.signer,
            nonce_manager: NonceManager::new(),
            chain_id: Arc::new(OnceCell::new()),
        }
    }

    /// Address of the configured signing key, if any.
    pub fn signer_address(&self) -> Option<Address> {
        self.signer.as_ref().map(|w| w.address())
    }

    async fn rpc(&self, method: &str, params: Value) -> Result<Value, ChainError> {
        let payload = json!({
            "jsonrpc": "2.0",
            "method": method,
            "params": params,
            "id": 1
        });
        debug!("RPC {} -> {}", method, self.rpc_url);

        let response: RpcResponse = self
            .http
            .post(&self.rpc_url)
            .json(&payload)
            .send()
            .await?
            .json()
            .await?;

        if let Some(err) = response.error {
            return Err(ChainError::Rpc(err.message));
        }
        response
            .result
            .ok_or_else(|| ChainError::Malformed(format!("{} returned no result", method)))
    }

    async fn rpc_quantity(&self, method: &str, params: Value) -> Result<U256, ChainError> {
        let value = self.rpc(method, params).await?;
        let quantity = value
            .as_str()
            .ok_or_else(|| ChainError::Malformed(format!("{} result is not a string", method)))?;
        parse_quantity(quantity)
    }

    async fn chain_id(&self) -> Result<u64, ChainError> {
        self.chain_id
            .get_or_try_init(|| async {
                let id = self.rpc_quantity("eth_chainId", json!([])).await?;
                Ok::<u64, ChainError>(id.low_u64())
            })
            .await
            .copied()
    }

    async fn submit(
        &self,
        wallet: &LocalWallet,
        slot: &mut NonceSlot,
        contract: Address,
        data: Bytes,
    ) -> Result<H256, ChainError> {
        let from = wallet.address();
        let chain_id = self.chain_id().await?;

        let nonce = match slot.cached() {
            Some(nonce) => nonce,
            None => {
                self.rpc_quantity(
                    "eth_getTransactionCount",
                    json!([format!("{:?}", from), "pending"]),
                )
                .await?
            }
        };

        let call_obj = json!({
            "from": format!("{:?}", from),
            "to": format!("{:?}", contract),
            "data": format!("0x{}", hex::encode(&data)),
        });
        let gas = self.rpc_quantity("eth_estimateGas", json!([call_obj])).await?;
        let gas_price = self.rpc_quantity("eth_gasPrice", json!([])).await?;

        let tx: TypedTransaction = TransactionRequest::new()
            .from(from)
            .to(contract)
            .data(data)
            .nonce(nonce)
            .gas(gas)
            .gas_price(gas_price)
            .chain_id(chain_id)
            .into();

        let signature = wallet
            .sign_transaction(&tx)
            .await
            .map_err(|e| ChainError::Signing(e.to_string()))?;
        let raw_tx = tx.rlp_signed(&signature);

        let result = self
            .rpc(
                "eth_sendRawTransaction",
                json!([format!("0x{}", hex::encode(&raw_tx))]),
            )
            .await?;
        let hash_str = result
            .as_str()
            .ok_or_else(|| ChainError::Malformed("transaction hash is not a string".into()))?;
        let hash = H256::from_str(hash_str)
            .map_err(|e| ChainError::Malformed(format!("invalid transaction hash: {}", e)))?;

        slot.commit(nonce);
        info!(
            "Broadcast tx {:?} from {:?} (nonce {}, chain {})",
            hash, from, nonce, chain_id
        );
        Ok(hash)
    }
}

#[async_trait]
impl ChainExecutor for EvmExecutor {
    async fn read_call(
        &self,
        contract: Address,
        signature: &str,
        args: Vec<Token>,
    ) -> Result<Bytes, ChainError> {
        let data = encode_call(signature, &args);
        let result = self
            .rpc(
                "eth_call",
                json!([
                    {"to": format!("{:?}", contract), "data": format!("0x{}", hex::encode(&data))},
                    "latest"
                ]),
            )
            .await?;
        let raw = result
            .as_str()
            .ok_or_else(|| ChainError::Malformed("eth_call result is not a string".into()))?;
        Ok(Bytes::from(hex_to_bytes(raw)?))
    }

    async fn write_call(
        &self,
        contract: Address,
        signature: &str,
        args: Vec<Token>,
    ) -> Result<H256, ChainError> {
        let wallet = self
            .signer
            .as_ref()
            .ok_or(ConfigError::Missing("WALLET_PRIVATE_KEY"))?;
        let data = encode_call(signature, &args);

        let mut slot = self.nonce_manager.acquire(wallet.address()).await;
        let result = self.submit(wallet, &mut slot, contract, data).await;
        if let Err(e) = &result {
            warn!("Submission of {} to {:?} failed: {}", signature, contract, e);
            slot.invalidate();
        }
        result
    }
}
