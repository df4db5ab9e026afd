//! Fixed registry of the tokens the agent can trade on Rootstock.
//!
//! The table is closed: every supported symbol is a [`Token`] variant and
//! lookups never allocate or fail loudly. Absence is reported as `None`.

use std::fmt;

/// Symbols known to the registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Token {
    /// Native RBTC (wrapped token contract)
    Rbtc,
    /// Dollar on Chain stablecoin
    Doc,
    /// RSK Infrastructure Framework
    Rif,
    /// Sovryn
    Sov,
    /// BitPRO
    Bpro,
    /// Rootstock USDT
    Rusdt,
}

/// Registry entry for one token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenDescriptor {
    pub token: Token,
    /// Canonical upper-case symbol
    pub symbol: &'static str,
    /// 0x-prefixed contract address
    pub address: &'static str,
    pub decimals: u32,
}

const REGISTRY: [TokenDescriptor; 6] = [
    TokenDescriptor {
        token: Token::Rbtc,
        symbol: "RBTC",
        address: "0x542fDA317318eBF1d3DEAf76E0b632741A7e677d",
        decimals: 18,
    },
    TokenDescriptor {
        token: Token::Doc,
        symbol: "DOC",
        address: "0xe700691dA7b9851F2F35f8b8182c69c53CcaD9Db",
        decimals: 18,
    },
    TokenDescriptor {
        token: Token::Rif,
        symbol: "RIF",
        address: "0x2aCC95758f8b5F583470bA265Eb685a8f45fC9D5",
        decimals: 18,
    },
    TokenDescriptor {
        token: Token::Sov,
        symbol: "SOV",
        address: "0xEFc78fc7d48b64958315949279Ba181c2114ABBd",
        decimals: 18,
    },
    TokenDescriptor {
        token: Token::Bpro,
        symbol: "BPRO",
        address: "0x440bBd6a888a36DE6e2F6A25f65bc4e16874faa9",
        decimals: 18,
    },
    TokenDescriptor {
        token: Token::Rusdt,
        symbol: "RUSDT",
        address: "0xEf213441a85DF4d7acBdAe0Cf78004E1e486BB96",
        decimals: 6,
    },
];

impl Token {
    pub const ALL: [Token; 6] = [
        Token::Rbtc,
        Token::Doc,
        Token::Rif,
        Token::Sov,
        Token::Bpro,
        Token::Rusdt,
    ];

    /// Case-insensitive symbol lookup.
    pub fn from_symbol(symbol: &str) -> Option<Token> {
        let symbol = symbol.trim();
        REGISTRY
            .iter()
            .find(|d| d.symbol.eq_ignore_ascii_case(symbol))
            .map(|d| d.token)
    }

    pub fn descriptor(self) -> &'static TokenDescriptor {
        match self {
            Token::Rbtc => &REGISTRY[0],
            Token::Doc => &REGISTRY[1],
            Token::Rif => &REGISTRY[2],
            Token::Sov => &REGISTRY[3],
            Token::Bpro => &REGISTRY[4],
            Token::Rusdt => &REGISTRY[5],
        }
    }

    pub fn symbol(self) -> &'static str {
        self.descriptor().symbol
    }

    /// Decimals used by the balance and transfer tools.
    ///
    /// Keyed on the symbol rather than the registry entry: the designated
    /// stable token gets 6, everything else 18.
    pub fn balance_decimals(self) -> u32 {
        match self {
            Token::Rusdt => 6,
            _ => 18,
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Resolve a symbol (any case) to its registry entry.
pub fn resolve(symbol: &str) -> Option<&'static TokenDescriptor> {
    Token::from_symbol(symbol).map(Token::descriptor)
}

/// Resolve a contract address (any case, `0x` prefix required) back to its symbol.
pub fn reverse_resolve(address: &str) -> Option<&'static str> {
    let address = address.trim();
    REGISTRY
        .iter()
        .find(|d| d.address.eq_ignore_ascii_case(address))
        .map(|d| d.symbol)
}

/// Comma separated list of supported symbols, for prompts and error text.
pub fn supported_symbols() -> String {
    REGISTRY
        .iter()
        .map(|d| d.symbol)
        .collect::<Vec<_>>()
        .join(", ")
}
