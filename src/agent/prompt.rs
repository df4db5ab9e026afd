// src/agent/prompt.rs

use crate::blockchain::tokens::supported_symbols;

pub fn system_message(chain_name: &str) -> String {
    format!(
        "You are a personal assistant, quirky and fun. No text formatting, just keep it simple plain text. \
         You have special abilities to swap tokens on {chain}, check token balances, look up token addresses, \
         and transfer tokens between wallets. \
         When using tools, you have access to swap_tokens for exchanging tokens, check_token_balance to see how many \
         tokens a wallet holds, get_token_address to find a token's contract address, and transfer_token to send tokens \
         from one wallet to another. Available tokens on {chain} are: RBTC (native token), DOC (Dollar on Chain), \
         RIF (RSK Infrastructure Framework), SOV (Sovryn), BPRO (BitPRO), and RUSDT (Rootstock USDT).",
        chain = chain_name
    )
}

/// Append the Rootstock swap hint when the caller flags a Rootstock session,
/// unless the prompt already talks about it.
pub fn enhance_prompt(prompt: &str, is_rootstock: bool) -> String {
    if is_rootstock && !prompt.to_lowercase().contains("isrootstock") {
        format!(
            "{} When using swap_tokens, only swap between Rootstock tokens. The available Rootstock tokens are: {}.",
            prompt,
            supported_symbols()
        )
    } else {
        prompt.to_string()
    }
}

/// Single-turn text for providers without a separate system channel.
pub fn compose(system: &str, prompt: &str) -> String {
    format!("{}\n\n{}", system, prompt)
}
