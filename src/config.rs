// src/config.rs

use std::env;
use std::net::{IpAddr, SocketAddr};

use anyhow::{Context, Result};
use ethers::types::{Address, H160};
use ethers_signers::LocalWallet;
use secrecy::{ExposeSecret, SecretString};
use url::Url;

use crate::agent::providers::ProviderConfig;
use crate::blockchain::ChainConfig;

const DEFAULT_RPC_URL: &str = "https://mycrypto.rsk.co";
// 0xF9816F5CD44092F6d57b167b559fA237069Fe0FF
const DEFAULT_SWAP_CONTRACT: Address = H160([
    0xf9, 0x81, 0x6f, 0x5c, 0xd4, 0x40, 0x92, 0xf6, 0xd5, 0x7b, 0x16, 0x7b, 0x55, 0x9f, 0xa2, 0x37,
    0x06, 0x9f, 0xe0, 0xff,
]);
const DEFAULT_GEMINI_MODEL: &str = "gemini-1.5-pro-latest";
const DEFAULT_GOOGLE_BASE_URL: &str = "https://generativelanguage.googleapis.com";
const DEFAULT_OPENAI_MODEL: &str = "gpt-4o-mini";
const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com/v1";

// A struct to hold all configuration, loaded once at startup from the .env file.
#[derive(Clone, Debug)]
pub struct Config {
    // Server settings
    pub bind_address: IpAddr,
    pub port: u16,
    /// `None` means any origin
    pub cors_allowed_origin: Option<String>,

    // Chain settings
    pub rpc_url: String,
    pub chain_name: String,
    pub swap_contract: Address,
    pub wallet_private_key: Option<SecretString>,

    // Model providers
    pub google: ProviderConfig,
    pub openai: ProviderConfig,

    pub mcp_mode: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_address: IpAddr::from([127, 0, 0, 1]),
            port: 3000,
            cors_allowed_origin: Some("http://localhost:3001".to_string()),
            rpc_url: DEFAULT_RPC_URL.to_string(),
            chain_name: "Rootstock".to_string(),
            swap_contract: DEFAULT_SWAP_CONTRACT,
            wallet_private_key: None,
            google: ProviderConfig {
                api_key: None,
                model: DEFAULT_GEMINI_MODEL.to_string(),
                base_url: DEFAULT_GOOGLE_BASE_URL.to_string(),
            },
            openai: ProviderConfig {
                api_key: None,
                model: DEFAULT_OPENAI_MODEL.to_string(),
                base_url: DEFAULT_OPENAI_BASE_URL.to_string(),
            },
            mcp_mode: false,
        }
    }
}

impl Config {
    /// Loads configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        // Load variables from the .env file into the environment
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds configuration from an arbitrary variable lookup. Empty values
    /// count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let defaults = Self::default();

        let bind_address = match var("BIND_ADDRESS") {
            Some(v) => v.parse().context("BIND_ADDRESS must be a valid IP address")?,
            None => defaults.bind_address,
        };
        let port = match var("PORT") {
            Some(v) => v.parse().context("PORT must be a valid number")?,
            None => defaults.port,
        };
        let cors_allowed_origin = match var("CORS_ALLOWED_ORIGIN") {
            Some(v) if v.trim() == "*" => None,
            Some(v) => Some(v),
            None => defaults.cors_allowed_origin,
        };

        let rpc_url = var("RPC_PROVIDER_URL").unwrap_or(defaults.rpc_url);
        Url::parse(&rpc_url).context("RPC_PROVIDER_URL must be a valid URL")?;

        let swap_contract = match var("SWAP_CONTRACT_ADDRESS") {
            Some(v) => v
                .parse()
                .context("SWAP_CONTRACT_ADDRESS must be a valid address")?,
            None => defaults.swap_contract,
        };

        let google_base_url = var("GOOGLE_API_BASE_URL").unwrap_or(defaults.google.base_url);
        Url::parse(&google_base_url).context("GOOGLE_API_BASE_URL must be a valid URL")?;
        let openai_base_url = var("OPENAI_BASE_URL").unwrap_or(defaults.openai.base_url);
        Url::parse(&openai_base_url).context("OPENAI_BASE_URL must be a valid URL")?;

        let config = Config {
            bind_address,
            port,
            cors_allowed_origin,
            rpc_url,
            chain_name: var("CHAIN_NAME").unwrap_or(defaults.chain_name),
            swap_contract,
            wallet_private_key: var("WALLET_PRIVATE_KEY").map(SecretString::new),
            google: ProviderConfig {
                api_key: var("GOOGLE_API_KEY").map(SecretString::new),
                model: var("GEMINI_MODEL").unwrap_or(defaults.google.model),
                base_url: google_base_url,
            },
            openai: ProviderConfig {
                api_key: var("OPENAI_API_KEY").map(SecretString::new),
                model: var("OPENAI_MODEL").unwrap_or(defaults.openai.model),
                base_url: openai_base_url,
            },
            mcp_mode: var("MCP_MODE").is_some(),
        };

        // Fail at startup on a malformed key rather than on the first transfer
        config.chain_config()?;
        Ok(config)
    }

    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.bind_address, self.port)
    }

    /// Settings for the chain executor. The signer is absent when no key is
    /// configured; write calls then fail with a configuration error.
    pub fn chain_config(&self) -> Result<ChainConfig> {
        let signer = self
            .wallet_private_key
            .as_ref()
            .map(|key| {
                key.expose_secret()
                    .trim()
                    .trim_start_matches("0x")
                    .parse::<LocalWallet>()
                    .context("WALLET_PRIVATE_KEY must be a valid hex private key")
            })
            .transpose()?;

        Ok(ChainConfig {
            rpc_url: self.rpc_url.clone(),
            signer,
        })
    }
}
