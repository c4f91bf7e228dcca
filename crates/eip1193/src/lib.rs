//! Bindings to browser wallets that implement [EIP-1193].
//!
//! [EIP-1193]: https://eips.ethereum.org/EIPS/eip-1193

use async_trait::async_trait;
use serde_json::Value;

mod client;
mod error;
mod injected;
mod types;

pub use client::{hex_chain_id, Ethereum, RECEIPT_POLL_INTERVAL_MS};
pub use error::{Error, UNRECOGNIZED_CHAIN, USER_REJECTED_REQUEST};
pub use injected::{Injected, Subscription};
pub use types::{
    AddEthereumChainParameter, NativeCurrency, ProviderEvent, TransactionReceipt,
    TransactionRequest,
};

/// The single request method every EIP-1193 provider exposes.
#[async_trait(?Send)]
pub trait Eip1193Provider {
    async fn request(&self, method: &str, params: Value) -> Result<Value, Error>;
}
