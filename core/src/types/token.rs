use alloy_primitives::Address;
use serde::{Deserialize, Serialize};

/// How a token is treated by the display-rate estimate.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum TokenKind {
    /// The chain's native asset. Has no contract address.
    Native,
    /// Priced 1:1 against the native asset.
    Stable,
    /// Converted through the fixed volatile ratio.
    Volatile,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Token {
    pub symbol: String,
    pub name: String,
    #[serde(default)]
    pub address: Option<Address>,
    pub decimals: u8,
    /// Static unit price. Display only.
    pub price: f64,
    pub kind: TokenKind,
}

impl Token {
    pub fn is_native(&self) -> bool {
        self.kind == TokenKind::Native
    }

    pub fn is_volatile(&self) -> bool {
        self.kind == TokenKind::Volatile
    }
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.symbol)
    }
}
