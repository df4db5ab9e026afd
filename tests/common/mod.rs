//! Shared in-memory fakes for the integration tests.
#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use ethers_core::abi::Token;
use ethers_core::types::{Address, Bytes, H256, U256};
use rootstock_agent::{
    agent::{
        providers::{GenerativeProvider, ToolCallingProvider},
        ChatMessage, ModelTurn, Orchestrator, RequestedToolCall,
    },
    blockchain::ChainExecutor,
    config::Config,
    error::{ChainError, ConfigError, ProviderError},
    tools::{ToolCall, ToolDispatcher, ToolSchema},
    AppState,
};
use serde_json::Value;

pub const SWAP_CONTRACT: &str = "0xF9816F5CD44092F6d57b167b559fA237069Fe0FF";
pub const WALLET_A: &str = "0x1111111111111111111111111111111111111111";
pub const WALLET_B: &str = "0x2222222222222222222222222222222222222222";

#[derive(Debug, Clone, PartialEq)]
pub enum ChainCall {
    Read { contract: Address, signature: String, args: Vec<Token> },
    Write { contract: Address, signature: String, args: Vec<Token> },
}

/// Records every call; reads return `balance`, writes return `hash` unless
/// `fail_with` is set.
pub struct FakeExecutor {
    pub calls: Mutex<Vec<ChainCall>>,
    pub balance: U256,
    pub hash: H256,
    pub fail_with: Option<String>,
}

impl Default for FakeExecutor {
    fn default() -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            balance: U256::zero(),
            hash: H256::repeat_byte(0xab),
            fail_with: None,
        }
    }
}

impl FakeExecutor {
    pub fn failing(message: &str) -> Self {
        Self {
            fail_with: Some(message.to_string()),
            ..Self::default()
        }
    }

    pub fn calls(&self) -> Vec<ChainCall> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl ChainExecutor for FakeExecutor {
    async fn read_call(
        &self,
        contract: Address,
        signature: &str,
        args: Vec<Token>,
    ) -> Result<Bytes, ChainError> {
        self.calls.lock().unwrap().push(ChainCall::Read {
            contract,
            signature: signature.to_string(),
            args,
        });
        if let Some(msg) = &self.fail_with {
            return Err(ChainError::Rpc(msg.clone()));
        }
        Ok(Bytes::from(ethers_core::abi::encode(&[Token::Uint(self.balance)])))
    }

    async fn write_call(
        &self,
        contract: Address,
        signature: &str,
        args: Vec<Token>,
    ) -> Result<H256, ChainError> {
        self.calls.lock().unwrap().push(ChainCall::Write {
            contract,
            signature: signature.to_string(),
            args,
        });
        if let Some(msg) = &self.fail_with {
            return Err(ChainError::Rpc(msg.clone()));
        }
        Ok(self.hash)
    }
}

/// Primary provider that either answers with fixed text or fails.
pub struct ScriptedPrimary {
    pub answer: Option<String>,
    pub prompts: Mutex<Vec<String>>,
}

impl ScriptedPrimary {
    pub fn answering(text: &str) -> Self {
        Self {
            answer: Some(text.to_string()),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn failing() -> Self {
        Self {
            answer: None,
            prompts: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl GenerativeProvider for ScriptedPrimary {
    fn name(&self) -> &'static str {
        "scripted-primary"
    }

    async fn generate(&self, prompt: &str) -> Result<String, ProviderError> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        self.answer
            .clone()
            .ok_or(ProviderError::Config(ConfigError::Missing("GOOGLE_API_KEY")))
    }
}

/// Fallback provider replaying a queue of turns. When the queue runs dry it
/// repeats `repeat` forever, or fails if there is none.
pub struct ScriptedFallback {
    turns: Mutex<VecDeque<ModelTurn>>,
    repeat: Option<ModelTurn>,
    pub calls: AtomicUsize,
    pub seen: Mutex<Vec<Vec<ChatMessage>>>,
}

impl ScriptedFallback {
    pub fn new(turns: Vec<ModelTurn>) -> Self {
        Self {
            turns: Mutex::new(turns.into()),
            repeat: None,
            calls: AtomicUsize::new(0),
            seen: Mutex::new(Vec::new()),
        }
    }

    pub fn forever(turn: ModelTurn) -> Self {
        Self {
            repeat: Some(turn),
            ..Self::new(Vec::new())
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ToolCallingProvider for ScriptedFallback {
    fn name(&self) -> &'static str {
        "scripted-fallback"
    }

    async fn complete(
        &self,
        messages: &[ChatMessage],
        _tools: &[ToolSchema],
    ) -> Result<ModelTurn, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.seen.lock().unwrap().push(messages.to_vec());
        let next = self.turns.lock().unwrap().pop_front();
        next.or_else(|| self.repeat.clone()).ok_or(ProviderError::Api {
            provider: "scripted-fallback",
            status: 503,
            body: "script exhausted".into(),
        })
    }
}

pub fn tool_turn(id: &str, name: &str, args: Value) -> ModelTurn {
    ModelTurn {
        text: String::new(),
        tool_calls: vec![RequestedToolCall {
            id: id.to_string(),
            call: ToolCall::new(name, args),
        }],
    }
}

pub fn text_turn(text: &str) -> ModelTurn {
    ModelTurn {
        text: text.to_string(),
        tool_calls: Vec::new(),
    }
}

pub fn dispatcher(executor: Arc<FakeExecutor>) -> Arc<ToolDispatcher> {
    let swap_contract = SWAP_CONTRACT.parse().unwrap();
    Arc::new(ToolDispatcher::new(executor, swap_contract, "Rootstock"))
}

pub fn app_state(
    executor: Arc<FakeExecutor>,
    primary: Arc<ScriptedPrimary>,
    fallback: Arc<ScriptedFallback>,
) -> AppState {
    let dispatcher = dispatcher(executor);
    AppState {
        config: Arc::new(Config::default()),
        orchestrator: Arc::new(Orchestrator::new(primary, fallback, dispatcher.clone())),
        dispatcher,
    }
}
