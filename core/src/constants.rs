use crate::types::{Token, TokenKind};
use alloy_primitives::{address, Address};
use eip1193::{hex_chain_id, AddEthereumChainParameter, NativeCurrency};
use std::{collections::HashMap, sync::LazyLock};

// Compile-time configuration for chain and contract details
pub const CHAIN_ID: u64 = 11_155_111;
pub const CHAIN_NAME: &str = "Sepolia";
pub const RPC_URL: &str = "https://rpc.sepolia.org";
pub const EXPLORER_URL: &str = "https://sepolia.etherscan.io";

pub const EXCHANGE_CONTRACT: Address = address!("0x52E3A076DdA8816eaFBB16c8b5a3b91C8e4E6fa0");

/// Gas limit attached to every swap call. Approvals are left to the wallet's estimate.
pub const SWAP_GAS_LIMIT: u64 = 300_000;

/// Number of confirmed exchanges kept in the recent history list.
pub const HISTORY_LIMIT: usize = 5;

/// Native amount (in whole units) the MAX button leaves behind for gas.
pub const NATIVE_GAS_RESERVE: &str = "0.01";

pub static SEPOLIA: LazyLock<AddEthereumChainParameter> =
    LazyLock::new(|| AddEthereumChainParameter {
        chain_id: hex_chain_id(CHAIN_ID),
        chain_name: "Sepolia Test Network".to_string(),
        rpc_urls: vec![RPC_URL.to_string()],
        native_currency: NativeCurrency {
            name: "Sepolia Ether".to_string(),
            symbol: "SEP".to_string(),
            decimals: 18,
        },
        block_explorer_urls: vec![EXPLORER_URL.to_string()],
    });

// The token list is fixed at compile time. Order matters: it is the display order.
pub static TOKENS: LazyLock<Vec<Token>> = LazyLock::new(|| {
    let json = include_str!(concat!(
        env!("CARGO_MANIFEST_DIR"),
        "/../public/tokens_sepolia.json"
    ));
    serde_json::from_str(json).expect("Failed to deserialize tokens_sepolia.json")
});

pub static SYMBOL_TO_TOKEN: LazyLock<HashMap<String, Token>> = LazyLock::new(|| {
    TOKENS
        .iter()
        .map(|token| (token.symbol.clone(), token.clone()))
        .collect()
});

pub fn get_token(symbol: &str) -> Option<&'static Token> {
    SYMBOL_TO_TOKEN.get(symbol)
}

pub fn native_token() -> &'static Token {
    TOKENS
        .iter()
        .find(|token| token.kind == TokenKind::Native)
        .expect("token list has no native asset")
}
