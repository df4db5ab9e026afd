// src/blockchain/nonce_manager.rs

use dashmap::DashMap;
use ethers_core::types::{Address, U256};
use std::sync::Arc;
use tokio::sync::{Mutex, OwnedMutexGuard};

// Serializes signed submissions per sender address. Holding a slot means no
// other submission from the same key can pick a nonce until it is dropped.
#[derive(Debug, Clone, Default)]
pub struct NonceManager {
    nonces: Arc<DashMap<Address, Arc<Mutex<NonceState>>>>,
}

#[derive(Debug, Default)]
pub struct NonceState {
    next_nonce: Option<U256>,
}

impl NonceState {
    /// The cached nonce, if the last submission from this address succeeded.
    pub fn cached(&self) -> Option<U256> {
        self.next_nonce
    }

    /// Record that `used` was accepted by the node.
    pub fn commit(&mut self, used: U256) {
        self.next_nonce = Some(used + U256::one());
    }

    /// Forget the cached value so the next submission re-reads it from the node.
    pub fn invalidate(&mut self) {
        self.next_nonce = None;
    }
}

pub type NonceSlot = OwnedMutexGuard<NonceState>;

impl NonceManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wait for exclusive use of `address`'s nonce sequence.
    pub async fn acquire(&self, address: Address) -> NonceSlot {
        let lock = self
            .nonces
            .entry(address)
            .or_insert_with(|| Arc::new(Mutex::new(NonceState::default())))
            .clone();
        lock.lock_owned().await
    }
}
