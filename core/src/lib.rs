pub mod constants;
mod error;
pub mod exchange;
pub mod network;
pub mod rate;
pub mod selection;
pub mod state;
pub mod support;
pub mod types;
pub mod utils;
pub mod wallet;

pub use constants::{get_token, CHAIN_ID, EXCHANGE_CONTRACT, TOKENS};
pub use error::Error;
pub use state::{Balances, NetworkStatus, WalletProvider, WalletSession, WalletSignals};
