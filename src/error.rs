// src/error.rs

use thiserror::Error;

/// Bad input from the model or the caller: unknown tokens, unusable amounts,
/// malformed tool arguments.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Unknown token: {0}")]
    UnknownToken(String),
    #[error("toToken is required")]
    MissingDestinationToken,
    #[error("Invalid amount. Must be a positive number.")]
    InvalidAmount,
    #[error("Amount too large")]
    AmountTooLarge,
    #[error("{0}")]
    InvalidArguments(String),
    #[error("Unknown tool: {0}")]
    UnknownTool(String),
}

/// Missing or unusable process configuration. Fatal at first use.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} is not configured")]
    Missing(&'static str),
    #[error("{var} is invalid: {reason}")]
    Invalid { var: &'static str, reason: String },
}

/// Failures reported by, or while talking to, the chain node.
#[derive(Error, Debug)]
pub enum ChainError {
    #[error("Invalid address: {0}")]
    InvalidAddress(String),
    #[error("RPC error: {0}")]
    Rpc(String),
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("malformed node response: {0}")]
    Malformed(String),
    #[error("signing failed: {0}")]
    Signing(String),
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Failures of a generative model provider.
#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("{provider} request failed: {source}")]
    Http {
        provider: &'static str,
        #[source]
        source: reqwest::Error,
    },
    #[error("{provider} returned {status}: {body}")]
    Api {
        provider: &'static str,
        status: u16,
        body: String,
    },
    #[error("{provider} returned no usable content")]
    EmptyResponse { provider: &'static str },
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Anything a tool handler can fail with. Never escapes the dispatcher.
#[derive(Error, Debug)]
pub enum ToolError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Chain(#[from] ChainError),
}

/// Terminal orchestration failure, surfaced as an HTTP 500.
#[derive(Error, Debug)]
pub enum AgentError {
    #[error("fallback provider failed: {0}")]
    Provider(#[from] ProviderError),
}
